// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use stack2md::{
    archive_account, ArchiveConfig, ArchiveReport, CommandLineInput,
    StackExchangeClient, TokioPause,
};
use std::fs;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("stack2md.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)
        .with_context(|| format!("cannot open log file {}", log_file_path.display()))?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stdout", Box::new(stdout_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Prints one line per site and a total.
fn print_summary(config: &ArchiveConfig, report: &ArchiveReport) {
    for site in &report.sites {
        println!(
            "{}: questions {} new / {} kept, answered {} new / {} kept{}",
            site.site,
            site.asked.written,
            site.asked.skipped,
            site.answered.written,
            site.answered.skipped,
            if site.missing_parents > 0 {
                format!(", {} unavailable", site.missing_parents)
            } else {
                String::new()
            }
        );
    }
    println!(
        "✓ {} document(s) written, {} already present, under {}",
        report.written(),
        report.skipped(),
        config.output_root.display()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = ArchiveConfig::resolve(cli)?;
    let client = StackExchangeClient::new(&config)?;

    match archive_account(&config, &client, &TokioPause).await {
        Ok(report) => {
            print_summary(&config, &report);
            Ok(())
        }
        Err(err) if !err.is_fatal() => {
            eprintln!("⚠️  {}. Nothing to archive.", err);
            Ok(())
        }
        Err(err) => Err(err).context("archive run aborted; re-run to resume"),
    }
}
