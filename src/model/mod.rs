// src/model/mod.rs
//! Domain model for archived Q&A content.
//!
//! Records are decoded straight from the API's JSON via serde at the fetch
//! boundary. Required fields are non-optional, so a response missing one fails
//! to parse there and no later stage has to re-check field presence.

use crate::types::{QuestionId, SiteName, SiteUserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One site the account participates in, together with the user's id there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteIdentity {
    pub site_name: SiteName,
    pub site_user_id: SiteUserId,
}

/// Author of a post. Absent entirely for community-owned posts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Owner {
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "body_markdown")]
    pub body: String,
    #[serde(rename = "creation_date", with = "chrono::serde::ts_seconds")]
    pub creation_time: DateTime<Utc>,
    pub score: i64,
    pub owner: Option<Owner>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Back-reference to the parent question.
    pub question_id: QuestionId,
    pub is_accepted: bool,
    #[serde(rename = "body_markdown")]
    pub body: String,
    #[serde(rename = "creation_date", with = "chrono::serde::ts_seconds")]
    pub creation_time: DateTime<Utc>,
    #[serde(rename = "up_vote_count")]
    pub up_votes: u64,
    #[serde(rename = "down_vote_count")]
    pub down_votes: u64,
    pub score: i64,
    pub owner: Option<Owner>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: QuestionId,
    pub title: String,
    #[serde(rename = "body_markdown")]
    pub body: String,
    pub link: String,
    #[serde(rename = "creation_date", with = "chrono::serde::ts_seconds")]
    pub creation_time: DateTime<Utc>,
    #[serde(rename = "up_vote_count")]
    pub up_votes: u64,
    #[serde(rename = "down_vote_count")]
    pub down_votes: u64,
    pub score: i64,
    pub owner: Option<Owner>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// The slice of an answer the answers pass needs: which question it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct AnswerRef {
    pub question_id: QuestionId,
}

/// Who a post is credited to when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution<'a> {
    Named(&'a str),
    /// Community wiki, deleted owner, or an owner without a display name.
    Unattributed,
}

impl<'a> Attribution<'a> {
    pub fn of(owner: Option<&'a Owner>) -> Self {
        match owner.and_then(|o| o.display_name.as_deref()) {
            Some(name) if !name.trim().is_empty() => Attribution::Named(name),
            _ => Attribution::Unattributed,
        }
    }
}
