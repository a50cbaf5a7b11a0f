// src/lib.rs
//! stack2md library: archives a Stack Exchange account's questions and
//! answered questions as markdown documents.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ApiErrorCode`, `ValidationError`
//! - **Configuration**: `ArchiveConfig`, `CommandLineInput`
//! - **Domain model**: `Question`, `Answer`, `Comment`, `SiteIdentity`, etc.
//! - **API client**: `ApiTransport`, `StackExchangeClient`, the pager and the
//!   backoff governor
//! - **Archive**: `archive_account`, `materialize`, `DocumentRenderer`

pub mod api;
pub mod archive;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod model;
pub mod output;
pub mod types;

// --- Error Handling ---
pub use crate::error::{ApiErrorCode, AppError};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{ArchiveConfig, CommandLineInput};

// --- Domain Model ---
pub use crate::model::{Answer, AnswerRef, Attribution, Comment, Owner, Question, SiteIdentity};

// --- Domain Types ---
pub use crate::types::{
    AccessToken, AccountId, ApiKey, FilterToken, QuestionId, SiteName, SiteUserId, ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    client::ApiResponse,
    merge_backoff,
    pagination::{fetch_all, pages},
    types::ApiRequest,
    ApiTransport, BackoffGovernor, FieldSet, FilterSet, PageResult, Pause, ResourceQuery,
    RetrievalBatch, StackExchangeClient, TokioPause,
};

// --- Archive ---
pub use crate::archive::{archive_account, enumerate_sites, ArchiveReport, Archiver, SiteReport};
pub use crate::formatting::DocumentRenderer;
pub use crate::output::{materialize, ArchiveLayout, Collection, CollectionTally, Materialized};
