// src/output/writer.rs
//! Writes question documents to disk.
//!
//! This is the only place where archive files are created. A document that
//! already exists is never rewritten, so the on-disk tree doubles as the record
//! of what earlier runs completed.

use super::paths::{document_path, partial_path};
use super::types::Materialized;
use crate::error::AppError;
use crate::formatting::DocumentRenderer;
use crate::model::Question;
use std::fs;
use std::path::Path;

/// Writes `question` into `dir` as `<question_id>.md` unless that file exists.
///
/// The document is written to a `.partial` sibling first and renamed into
/// place, so an interrupted run never leaves a truncated document that a later
/// run would mistake for a finished one. `dir` is created on first write.
pub fn materialize(
    dir: &Path,
    question: &Question,
    renderer: &DocumentRenderer,
) -> Result<Materialized, AppError> {
    let path = document_path(dir, question.question_id);

    if path.exists() {
        log::debug!("Already archived: {}", path.display());
        return Ok(Materialized::AlreadyPresent { path });
    }

    let content = renderer.render(question)?;

    fs::create_dir_all(dir)?;
    let staging = partial_path(&path);
    fs::write(&staging, &content)?;
    fs::rename(&staging, &path)?;

    log::info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(Materialized::Written {
        path,
        bytes: content.len(),
    })
}
