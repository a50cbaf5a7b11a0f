// src/api/responses.rs
//! Wire shapes of API responses, reduced to the fields this tool consumes.

use crate::error::AppError;
use crate::model::SiteIdentity;
use crate::types::{FilterToken, SiteName, SiteUserId};
use serde::Deserialize;

/// Common wrapper around every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    pub backoff: Option<u64>,
    pub quota_remaining: Option<u32>,
    pub error_id: Option<i64>,
    pub error_name: Option<String>,
    pub error_message: Option<String>,
}

/// Body of a non-success response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error_id: i64,
    pub error_name: String,
    pub error_message: String,
}

/// One per-site profile of a network account.
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkUser {
    pub site_url: String,
    pub user_id: SiteUserId,
    pub site_name: Option<String>,
}

/// Result item of `filters/create`.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterItem {
    pub filter: String,
}

/// Trait for converting wire types to domain types
pub trait ToDomain<T> {
    fn to_domain(self) -> Result<T, AppError>;
}

impl ToDomain<SiteIdentity> for NetworkUser {
    fn to_domain(self) -> Result<SiteIdentity, AppError> {
        let site_name = SiteName::from_site_url(&self.site_url).map_err(|e| AppError::Schema {
            url: self.site_url.clone(),
            reason: format!("site URL does not yield a usable site name: {}", e),
        })?;

        Ok(SiteIdentity {
            site_name,
            site_user_id: self.user_id,
        })
    }
}

impl ToDomain<FilterToken> for FilterItem {
    fn to_domain(self) -> Result<FilterToken, AppError> {
        FilterToken::new(self.filter).map_err(|e| AppError::Schema {
            url: "filters/create".to_string(),
            reason: e.to_string(),
        })
    }
}
