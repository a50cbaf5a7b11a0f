// src/output/types.rs
//! Outcomes of materializing documents.

use std::path::PathBuf;

/// What happened to one question document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Materialized {
    /// Rendered and written in this run.
    Written { path: PathBuf, bytes: usize },
    /// A document for this question was already on disk; nothing was fetched
    /// into it or rewritten.
    AlreadyPresent { path: PathBuf },
}

impl Materialized {
    pub fn path(&self) -> &PathBuf {
        match self {
            Materialized::Written { path, .. } | Materialized::AlreadyPresent { path } => path,
        }
    }
}

/// Counts for one collection directory of one site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionTally {
    pub written: usize,
    pub skipped: usize,
    pub bytes_written: usize,
}

impl CollectionTally {
    pub fn record(&mut self, outcome: &Materialized) {
        match outcome {
            Materialized::Written { bytes, .. } => {
                self.written += 1;
                self.bytes_written += bytes;
            }
            Materialized::AlreadyPresent { .. } => self.skipped += 1,
        }
    }
}
