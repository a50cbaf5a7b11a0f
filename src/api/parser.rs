// src/api/parser.rs
//! Turns raw responses into validated pages.
//!
//! Every response passes through [`parse_page`], so this is the one place
//! where field presence is checked and where HTTP failures are classified.

use super::client::ApiResponse;
use super::responses::{Envelope, ErrorBody};
use super::types::PageResult;
use crate::constants::{ERROR_BODY_PREVIEW_LENGTH, QUOTA_WARNING_THRESHOLD};
use crate::error::{ApiErrorCode, AppError};
use serde::de::DeserializeOwned;

/// Parses one API response into a page of `T`.
///
/// Non-success statuses and API error bodies become [`AppError::ApiService`];
/// a success body that does not match the envelope or item schema becomes
/// [`AppError::Schema`].
pub fn parse_page<T>(response: ApiResponse<String>) -> Result<PageResult<T>, AppError>
where
    T: DeserializeOwned,
{
    if !response.status.is_success() {
        return Err(parse_error_response(&response));
    }

    // Error bodies can arrive with a success status and carry no `items`.
    if let Ok(body) = serde_json::from_str::<ErrorBody>(&response.data) {
        return Err(api_service_error(&response, body));
    }

    let envelope: Envelope<T> = serde_json::from_str(&response.data).map_err(|e| {
        log::error!(
            "Failed to parse response from {}: {}\nBody: {}",
            response.url,
            e,
            preview(&response.data)
        );
        AppError::Schema {
            url: response.url.clone(),
            reason: e.to_string(),
        }
    })?;

    if let Some(name) = envelope.error_name {
        return Err(AppError::ApiService {
            code: ApiErrorCode::from_api_response(&name),
            message: envelope.error_message.unwrap_or_default(),
            status: response.status.as_u16(),
        });
    }

    match envelope.quota_remaining {
        Some(remaining) if remaining < QUOTA_WARNING_THRESHOLD => {
            log::warn!("Only {} API requests left in today's quota", remaining);
        }
        Some(remaining) => log::debug!("Quota remaining: {}", remaining),
        None => {}
    }

    Ok(PageResult {
        items: envelope.items,
        has_more: envelope.has_more,
        backoff: envelope.backoff,
        quota_remaining: envelope.quota_remaining,
    })
}

fn api_service_error(response: &ApiResponse<String>, body: ErrorBody) -> AppError {
    log::error!(
        "API error {} ({}) from {}",
        body.error_id,
        body.error_name,
        response.url
    );
    AppError::ApiService {
        code: ApiErrorCode::from_api_response(&body.error_name),
        message: body.error_message,
        status: response.status.as_u16(),
    }
}

/// Classifies a non-success response, using the API error body when present.
fn parse_error_response(response: &ApiResponse<String>) -> AppError {
    let status = response.status.as_u16();

    if let Ok(body) = serde_json::from_str::<ErrorBody>(&response.data) {
        return api_service_error(response, body);
    }

    AppError::ApiService {
        code: ApiErrorCode::from_http_status(status),
        message: format!(
            "HTTP {} from {}: {}",
            response.status,
            response.url,
            preview(&response.data)
        ),
        status,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let head: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", head)
    } else {
        body.to_string()
    }
}
