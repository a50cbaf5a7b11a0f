// tests/common/mod.rs
//! Shared helpers: an in-memory API and a pause that only records.

#![allow(dead_code)]

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use stack2md::{ApiRequest, ApiResponse, ApiTransport, AppError, Pause};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

type ScriptKey = (String, Option<String>, Option<u32>);

/// Serves canned responses keyed by endpoint, `site` and `page`.
///
/// Every request is recorded. Anything unscripted gets a 404 `no_method`
/// error body, which surfaces as an API error in the code under test.
#[derive(Default)]
pub struct ScriptedApi {
    script: HashMap<ScriptKey, (StatusCode, String)>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers every `filters/create` call with the same token.
    pub fn with_filters(self) -> Self {
        self.respond(
            "filters/create",
            None,
            None,
            json!({"items": [{"filter": "!test"}], "has_more": false}),
        )
    }

    pub fn respond(self, endpoint: &str, site: Option<&str>, page: Option<u32>, body: Value) -> Self {
        self.reply(endpoint, site, page, StatusCode::OK, body.to_string())
    }

    pub fn reply(
        mut self,
        endpoint: &str,
        site: Option<&str>,
        page: Option<u32>,
        status: StatusCode,
        body: impl Into<String>,
    ) -> Self {
        self.script.insert(
            (endpoint.to_string(), site.map(str::to_string), page),
            (status, body.into()),
        );
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.endpoint).collect()
    }
}

#[async_trait]
impl ApiTransport for ScriptedApi {
    async fn get(&self, request: &ApiRequest) -> Result<ApiResponse<String>, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        let key = (
            request.endpoint.clone(),
            request.param("site").map(str::to_string),
            request.page(),
        );
        let url = format!("https://api.test/2.3/{}", request.endpoint);
        Ok(match self.script.get(&key) {
            Some((status, body)) => ApiResponse::new(*status, url, body.clone()),
            None => ApiResponse::new(
                StatusCode::NOT_FOUND,
                url,
                json!({"error_id": 404, "error_name": "no_method", "error_message": "unscripted"})
                    .to_string(),
            ),
        })
    }
}

/// Records requested pauses instead of sleeping.
#[derive(Default)]
pub struct RecordingPause {
    pauses: Mutex<Vec<Duration>>,
}

impl RecordingPause {
    pub fn pauses(&self) -> Vec<Duration> {
        self.pauses.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pause for RecordingPause {
    async fn pause(&self, duration: Duration) {
        self.pauses.lock().unwrap().push(duration);
    }
}

// --- Response builders ---

pub fn page(items: Vec<Value>, has_more: bool) -> Value {
    json!({"items": items, "has_more": has_more, "quota_remaining": 9000})
}

pub fn page_with_backoff(items: Vec<Value>, has_more: bool, backoff: u64) -> Value {
    let mut body = page(items, has_more);
    body["backoff"] = json!(backoff);
    body
}

pub fn site(url: &str, user_id: u64) -> Value {
    json!({"site_url": url, "user_id": user_id})
}

pub fn question(site: &str, id: u64) -> Value {
    json!({
        "question_id": id,
        "title": format!("Question {}", id),
        "body_markdown": format!("Body of question {}", id),
        "link": format!("https://{}/q/{}", site, id),
        "creation_date": 1700000000 + id,
        "up_vote_count": 2,
        "down_vote_count": 0,
        "score": 2,
        "owner": {"display_name": "alice"},
        "comments": [],
        "answers": []
    })
}

pub fn answer_ref(question_id: u64) -> Value {
    json!({"question_id": question_id})
}
