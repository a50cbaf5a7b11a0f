// src/api/types.rs
//! Type definitions for the API module.
//!
//! Requests are plain data: an endpoint path plus query parameters. The
//! transport adds the base URL and credentials.

use crate::constants::{API_PAGE_SIZE, ASSOCIATED_SITE_TYPES};
use crate::types::{AccountId, FilterToken, QuestionId, SiteName, SiteUserId};

// --- Request Types ---

/// One concrete GET request against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    /// Path relative to the API root, e.g. `users/42/questions`.
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Looks up the first value of a query parameter.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The 1-based page index, if this is a paged request.
    pub fn page(&self) -> Option<u32> {
        self.param("page").and_then(|p| p.parse().ok())
    }
}

/// Describes one logical "list resource" query, independent of page index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceQuery {
    endpoint: String,
    params: Vec<(String, String)>,
    page_size: u32,
}

impl ResourceQuery {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: Vec::new(),
            page_size: API_PAGE_SIZE,
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn with_site(self, site: &SiteName) -> Self {
        self.with_param("site", site.as_str())
    }

    pub fn with_filter(self, filter: &FilterToken) -> Self {
        self.with_param("filter", filter.as_str())
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Builds the request for one page.
    pub fn request_for_page(&self, page: u32) -> ApiRequest {
        let mut request = ApiRequest::new(self.endpoint.clone());
        request.params = self.params.clone();
        request
            .with_param("page", page.to_string())
            .with_param("pagesize", self.page_size.to_string())
    }

    // --- The resources this tool reads ---

    /// Every main and meta site the network account has a profile on.
    pub fn associated_sites(account: AccountId, filter: &FilterToken) -> Self {
        Self::new(format!("users/{}/associated", account))
            .with_param("types", ASSOCIATED_SITE_TYPES)
            .with_filter(filter)
    }

    /// Questions the user asked on one site, oldest first.
    pub fn user_questions(site: &SiteName, user: SiteUserId, filter: &FilterToken) -> Self {
        Self::new(format!("users/{}/questions", user))
            .with_site(site)
            .with_param("sort", "creation")
            .with_param("order", "asc")
            .with_filter(filter)
    }

    /// Answers the user wrote on one site, oldest first.
    pub fn user_answers(site: &SiteName, user: SiteUserId, filter: &FilterToken) -> Self {
        Self::new(format!("users/{}/answers", user))
            .with_site(site)
            .with_param("sort", "creation")
            .with_param("order", "asc")
            .with_filter(filter)
    }

    /// Questions looked up by id. Callers keep `ids` within the per-request id cap.
    pub fn questions_by_id(site: &SiteName, ids: &[QuestionId], filter: &FilterToken) -> Self {
        Self::new(format!("questions/{}", QuestionId::join(ids)))
            .with_site(site)
            .with_filter(filter)
    }
}

// --- Response Types ---

/// One page of results, validated at the fetch boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub has_more: bool,
    /// Seconds the server asks us to wait before calling this method again.
    pub backoff: Option<u64>,
    pub quota_remaining: Option<u32>,
}

/// Items of every page of one logical query, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalBatch<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    pub quota_remaining: Option<u32>,
}

impl<T> Default for RetrievalBatch<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pages_fetched: 0,
            quota_remaining: None,
        }
    }
}

impl<T> RetrievalBatch<T> {
    /// Appends one page, keeping page order and item order within the page.
    pub fn absorb(&mut self, page: PageResult<T>) {
        self.items.extend(page.items);
        self.pages_fetched += 1;
        if page.quota_remaining.is_some() {
            self.quota_remaining = page.quota_remaining;
        }
    }
}
