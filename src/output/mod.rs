// src/output/mod.rs
//! On-disk archive: path planning kept apart from the single writer that
//! performs file I/O.

mod paths;
mod types;
mod writer;

// Re-export the public interface
pub use paths::{document_path, ArchiveLayout, Collection};
pub use types::{CollectionTally, Materialized};
pub use writer::materialize;
