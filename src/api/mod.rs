// src/api/mod.rs
//! Stack Exchange API interaction.
//!
//! Transport, parsing and traversal are kept apart: the transport moves raw
//! bytes, the parser validates them into typed pages, and the pager walks
//! pages lazily while leaving rate-limit decisions to the caller.

pub mod backoff;
pub mod client;
pub mod filters;
pub mod pagination;
pub mod parser;
pub mod responses;
pub mod types;

use crate::error::AppError;
use client::ApiResponse;
use types::ApiRequest;

/// The ability to issue one GET request against the API.
///
/// Business logic depends on this trait, never on HTTP details. A request
/// either completes with a status and body or fails with a transport error.
#[async_trait::async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse<String>, AppError>;
}

// Re-export the public interface
pub use backoff::{merge_backoff, BackoffGovernor, Pause, TokioPause};
pub use client::StackExchangeClient;
pub use filters::{FieldSet, FilterSet};
pub use types::{PageResult, ResourceQuery, RetrievalBatch};
