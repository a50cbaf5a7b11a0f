// src/config.rs
use crate::constants::{API_PAGE_SIZE, DEFAULT_API_BASE, DEFAULT_ARCHIVE_ROOT};
use crate::error::AppError;
use crate::types::{AccessToken, AccountId, ApiKey, ValidatedUrl};
use clap::Parser;
use std::path::PathBuf;

const ENV_KEY: &str = "STACKEXCHANGE_KEY";
const ENV_ACCESS_TOKEN: &str = "STACKEXCHANGE_ACCESS_TOKEN";
const ENV_API_BASE: &str = "STACKEXCHANGE_API_BASE";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Stack Exchange network account id (the number in your network profile URL)
    pub account_id: String,

    /// Directory the archive is written to
    #[arg(short, long, default_value = DEFAULT_ARCHIVE_ROOT)]
    pub output_dir: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved run configuration, validated once and passed by reference.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    pub account_id: AccountId,
    /// Application key; raises the daily request quota.
    pub key: Option<ApiKey>,
    pub access_token: Option<AccessToken>,
    pub api_base: ValidatedUrl,
    pub output_root: PathBuf,
    pub page_size: u32,
}

impl ArchiveConfig {
    /// Resolves a complete configuration from CLI input and environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        let account_id: AccountId = cli.account_id.parse()?;

        let key = optional_env(ENV_KEY).map(ApiKey::new).transpose()?;
        let access_token = optional_env(ENV_ACCESS_TOKEN)
            .map(AccessToken::new)
            .transpose()?;
        let api_base = match optional_env(ENV_API_BASE) {
            Some(base) => ValidatedUrl::parse(&base)?,
            None => ValidatedUrl::parse(DEFAULT_API_BASE)?,
        };

        Ok(Self {
            account_id,
            key,
            access_token,
            api_base,
            output_root: PathBuf::from(cli.output_dir),
            page_size: API_PAGE_SIZE,
        })
    }

    /// Configuration with defaults and no credentials.
    pub fn for_account(account_id: AccountId, output_root: impl Into<PathBuf>) -> Result<Self, AppError> {
        Ok(Self {
            account_id,
            key: None,
            access_token: None,
            api_base: ValidatedUrl::parse(DEFAULT_API_BASE)?,
            output_root: output_root.into(),
            page_size: API_PAGE_SIZE,
        })
    }
}

/// Reads an environment variable, treating unset and blank alike.
fn optional_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}
