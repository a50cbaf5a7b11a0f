// src/output/paths.rs
//! Pure path calculations for the archive layout.
//!
//! ```text
//! <root>/<site>/questions/<question_id>.md
//! <root>/<site>/answers/<question_id>.md
//! ```
//!
//! Nothing here touches the filesystem.

use crate::constants::{DOCUMENT_EXTENSION, PARTIAL_SUFFIX};
use crate::types::{QuestionId, SiteName};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which pass a document belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    /// Questions the user asked.
    Questions,
    /// Questions the user answered.
    Answers,
}

impl Collection {
    pub fn dir_name(&self) -> &'static str {
        match self {
            Collection::Questions => "questions",
            Collection::Answers => "answers",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Root of an archive on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    root: PathBuf,
}

impl ArchiveLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn site_dir(&self, site: &SiteName) -> PathBuf {
        self.root.join(site.as_str())
    }

    pub fn collection_dir(&self, site: &SiteName, collection: Collection) -> PathBuf {
        self.site_dir(site).join(collection.dir_name())
    }
}

/// `<dir>/<id>.md`
pub fn document_path(dir: &Path, id: QuestionId) -> PathBuf {
    dir.join(format!("{}.{}", id, DOCUMENT_EXTENSION))
}

/// Staging path a document is written to before being renamed into place.
pub fn partial_path(document: &Path) -> PathBuf {
    let mut name = document.as_os_str().to_owned();
    name.push(".");
    name.push(PARTIAL_SUFFIX);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collection_dirs() {
        let layout = ArchiveLayout::new("q_and_a");
        let site = SiteName::new("stats").unwrap();

        assert_eq!(
            layout.collection_dir(&site, Collection::Questions),
            PathBuf::from("q_and_a/stats/questions")
        );
        assert_eq!(
            layout.collection_dir(&site, Collection::Answers),
            PathBuf::from("q_and_a/stats/answers")
        );
    }

    #[test]
    fn test_document_and_partial_paths() {
        let doc = document_path(Path::new("out/stats/answers"), QuestionId::new(633692));
        assert_eq!(doc, PathBuf::from("out/stats/answers/633692.md"));
        assert_eq!(
            partial_path(&doc),
            PathBuf::from("out/stats/answers/633692.md.partial")
        );
    }
}
