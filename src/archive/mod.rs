// src/archive/mod.rs
//! Drives one archive run: filters, site enumeration, then both passes for
//! every site, one request at a time.

mod collector;
mod report;
mod sites;

use crate::api::{ApiTransport, BackoffGovernor, FilterSet, Pause};
use crate::config::ArchiveConfig;
use crate::error::AppError;
use crate::formatting::DocumentRenderer;
use crate::output::ArchiveLayout;

// Re-export the public interface
pub use collector::Archiver;
pub use report::{ArchiveReport, SiteReport};
pub use sites::enumerate_sites;

/// Archives every question the account asked or answered, on every site.
///
/// All requests go through `transport` sequentially and every backoff hint is
/// honoured through `pause`. Documents already on disk are left untouched, so
/// an interrupted run can simply be repeated.
pub async fn archive_account(
    config: &ArchiveConfig,
    transport: &dyn ApiTransport,
    pause: &dyn Pause,
) -> Result<ArchiveReport, AppError> {
    let renderer = DocumentRenderer::new()?;
    let layout = ArchiveLayout::new(config.output_root.clone());
    let mut governor = BackoffGovernor::new(pause);

    let filters = FilterSet::create(transport, &mut governor).await?;
    let sites = enumerate_sites(
        transport,
        &filters,
        config.account_id,
        config.page_size,
        &mut governor,
    )
    .await?;

    let archiver = Archiver::new(transport, &filters, &layout, &renderer, config.page_size);
    let mut report = ArchiveReport::default();

    for site in &sites {
        report.sites.push(archiver.archive_site(site, &mut governor).await?);
    }

    report.total_paused = governor.total_paused();
    log::info!(
        "Archive of account {} complete: {} written, {} already present, {}s spent backing off",
        config.account_id,
        report.written(),
        report.skipped(),
        report.total_paused.as_secs()
    );
    Ok(report)
}
