// src/error.rs
//! Application error types with structured error handling.
//!
//! Failures fall into three classes: transport (the request did not complete
//! or the server refused it), schema (a successful response lacks a field we
//! rely on), and empty results (the account has nothing to archive). Only the
//! last one is non-fatal.

use crate::types::AccountId;
use std::fmt;
use thiserror::Error;

/// Stack Exchange API `error_name` values as a typed vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Too many requests, or the daily quota is spent
    ThrottleViolation,
    /// The method needs an application key
    KeyRequired,
    /// The method needs an access token
    AccessTokenRequired,
    /// The access token is invalid, expired or revoked
    InvalidAccessToken,
    /// The token lacks the scope this method needs
    AccessDenied,
    /// A query parameter was rejected
    BadParameter,
    /// The method does not exist
    NoMethod,
    /// The requested resource does not exist
    NotFound,
    /// Unexpected failure on the server
    InternalError,
    /// The API is down for maintenance
    TemporarilyUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error name this client doesn't recognize yet
    Unknown(String),
}

impl ApiErrorCode {
    /// Parse an API `error_name` into the typed vocabulary.
    pub fn from_api_response(name: &str) -> Self {
        match name {
            "throttle_violation" => Self::ThrottleViolation,
            "key_required" => Self::KeyRequired,
            "access_token_required" => Self::AccessTokenRequired,
            "invalid_access_token" | "access_token_compromised" => Self::InvalidAccessToken,
            "access_denied" => Self::AccessDenied,
            "bad_parameter" => Self::BadParameter,
            "no_method" => Self::NoMethod,
            "not_found" => Self::NotFound,
            "internal_error" => Self::InternalError,
            "temporarily_unavailable" => Self::TemporarilyUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether re-running later is likely to succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ThrottleViolation | Self::TemporarilyUnavailable | Self::InternalError
        )
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThrottleViolation => write!(f, "throttle_violation"),
            Self::KeyRequired => write!(f, "key_required"),
            Self::AccessTokenRequired => write!(f, "access_token_required"),
            Self::InvalidAccessToken => write!(f, "invalid_access_token"),
            Self::AccessDenied => write!(f, "access_denied"),
            Self::BadParameter => write!(f, "bad_parameter"),
            Self::NoMethod => write!(f, "no_method"),
            Self::NotFound => write!(f, "not_found"),
            Self::InternalError => write!(f, "internal_error"),
            Self::TemporarilyUnavailable => write!(f, "temporarily_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(name) => write!(f, "{}", name),
        }
    }
}

fn resume_hint(code: &ApiErrorCode) -> &'static str {
    if code.is_transient() {
        " (re-run later to resume)"
    } else {
        ""
    }
}

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Stack Exchange API returned an error ({code}, HTTP {status}): {message}{}", resume_hint(.code))]
    ApiService {
        code: ApiErrorCode,
        message: String,
        status: u16,
    },

    #[error("Unexpected response shape from {url}: {reason}")]
    Schema { url: String, reason: String },

    #[error("No sites are associated with account {account_id}")]
    NoAssociatedSites { account_id: AccountId },

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template render error for template {name}: {message}")]
    TemplateRender { name: String, message: String },

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),
}

impl AppError {
    /// Whether this error should abort the run. An account without sites just
    /// has nothing to archive.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, AppError::NoAssociatedSites { .. })
    }

    /// Whether the failure is in the transport class (request failed or refused).
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::NetworkFailure(_) | AppError::ApiService { .. }
        )
    }

    /// Whether a successful response did not match the expected schema.
    pub fn is_schema(&self) -> bool {
        matches!(self, AppError::Schema { .. })
    }
}
