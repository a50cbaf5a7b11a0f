// src/archive/report.rs
//! Summary of one archive run.

use crate::output::CollectionTally;
use crate::types::SiteName;
use std::time::Duration;

/// What the run did on one site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteReport {
    pub site: SiteName,
    pub asked: CollectionTally,
    pub answered: CollectionTally,
    /// Parent questions the server did not return (deleted or inaccessible).
    pub missing_parents: usize,
}

impl SiteReport {
    pub fn new(site: SiteName) -> Self {
        Self {
            site,
            asked: CollectionTally::default(),
            answered: CollectionTally::default(),
            missing_parents: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.asked.written + self.answered.written
    }

    pub fn skipped(&self) -> usize {
        self.asked.skipped + self.answered.skipped
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    pub sites: Vec<SiteReport>,
    pub total_paused: Duration,
}

impl ArchiveReport {
    pub fn written(&self) -> usize {
        self.sites.iter().map(SiteReport::written).sum()
    }

    pub fn skipped(&self) -> usize {
        self.sites.iter().map(SiteReport::skipped).sum()
    }

    pub fn site(&self, name: &str) -> Option<&SiteReport> {
        self.sites.iter().find(|report| report.site.as_str() == name)
    }
}
