// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Stack Exchange API boundaries
// ---------------------------------------------------------------------------

/// Root of the Stack Exchange API, version included.
pub const DEFAULT_API_BASE: &str = "https://api.stackexchange.com/2.3";

/// How many items the API returns per page of results. 100 is the maximum.
pub const API_PAGE_SIZE: u32 = 100;

/// How many ids a vectorized request such as `/questions/{ids}` accepts.
pub const API_MAX_IDS_PER_REQUEST: usize = 100;

/// Site types requested from the associated-accounts resource.
pub const ASSOCIATED_SITE_TYPES: &str = "main_site;meta_site";

/// Seconds added on top of the largest observed backoff before the next
/// request, to absorb clock skew against the server's throttle window.
pub const BACKOFF_SAFETY_MARGIN_SECS: u64 = 1;

/// Remaining daily quota below which every page logs a warning.
pub const QUOTA_WARNING_THRESHOLD: u32 = 50;

// ---------------------------------------------------------------------------
// Archive layout
// ---------------------------------------------------------------------------

/// Default root directory of the archive.
pub const DEFAULT_ARCHIVE_ROOT: &str = "q_and_a";

/// Extension of every materialized question document.
pub const DOCUMENT_EXTENSION: &str = "md";

/// Suffix of a document that is still being written.
pub const PARTIAL_SUFFIX: &str = "partial";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing unparseable response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
