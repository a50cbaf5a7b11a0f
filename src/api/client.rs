// src/api/client.rs
//! Pure HTTP client wrapper for the Stack Exchange API.
//!
//! This module provides a thin wrapper around reqwest. It resolves endpoint
//! paths against the configured API root and appends credentials; it does
//! not parse bodies.

use super::types::ApiRequest;
use super::ApiTransport;
use crate::config::ArchiveConfig;
use crate::error::AppError;
use crate::types::{AccessToken, ApiKey, ValidatedUrl};
use reqwest::{header, Client, Response, StatusCode};

const USER_AGENT: &str = concat!("stack2md/", env!("CARGO_PKG_VERSION"));

/// A thin wrapper around reqwest Client for API requests.
#[derive(Clone)]
pub struct StackExchangeClient {
    client: Client,
    api_base: ValidatedUrl,
    key: Option<ApiKey>,
    access_token: Option<AccessToken>,
}

impl StackExchangeClient {
    /// Creates a new HTTP client from the resolved configuration.
    pub fn new(config: &ArchiveConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers())
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()?;

        if config.key.is_none() {
            log::warn!("No application key configured; the anonymous daily quota is small");
        }

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            key: config.key.clone(),
            access_token: config.access_token.clone(),
        })
    }

    fn create_headers() -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers
    }
}

#[async_trait::async_trait]
impl ApiTransport for StackExchangeClient {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse<String>, AppError> {
        let url = self.api_base.endpoint(&request.endpoint);
        log::debug!("GET {} {:?}", url, request.params);

        let mut query: Vec<(&str, &str)> = request
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        if let Some(key) = &self.key {
            query.push(("key", key.as_str()));
        }
        if let Some(token) = &self.access_token {
            query.push(("access_token", token.as_str()));
        }

        let response = self.client.get(&url).query(&query).send().await?;
        log::debug!("{} -> {}", request.endpoint, response.status());

        extract_response_text(response).await
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: StatusCode,
    pub url: String,
}

impl<T> ApiResponse<T> {
    pub fn new(status: StatusCode, url: impl Into<String>, data: T) -> Self {
        Self {
            data,
            status,
            url: url.into(),
        }
    }
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}
