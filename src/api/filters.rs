// src/api/filters.rs
//! Field projection filters.
//!
//! Each field set is turned into a server-side filter token once per run and
//! the token is reused for every call that needs that field set.

use super::backoff::BackoffGovernor;
use super::parser::parse_page;
use super::responses::{FilterItem, ToDomain};
use super::types::ApiRequest;
use super::ApiTransport;
use crate::error::AppError;
use crate::types::FilterToken;

/// Wrapper fields every filter keeps. With `base=none` nothing is implied.
const ENVELOPE_FIELDS: &[&str] = &[
    ".backoff",
    ".error_id",
    ".error_message",
    ".error_name",
    ".has_more",
    ".items",
    ".quota_remaining",
];

const SITE_FIELDS: &[&str] = &[
    "network_user.site_name",
    "network_user.site_url",
    "network_user.user_id",
];

const ANSWER_REF_FIELDS: &[&str] = &["answer.question_id"];

const QUESTION_FIELDS: &[&str] = &[
    "question.question_id",
    "question.title",
    "question.body_markdown",
    "question.link",
    "question.creation_date",
    "question.up_vote_count",
    "question.down_vote_count",
    "question.score",
    "question.owner",
    "question.comments",
    "question.answers",
    "answer.question_id",
    "answer.is_accepted",
    "answer.body_markdown",
    "answer.creation_date",
    "answer.up_vote_count",
    "answer.down_vote_count",
    "answer.score",
    "answer.owner",
    "answer.comments",
    "comment.body_markdown",
    "comment.creation_date",
    "comment.score",
    "comment.owner",
    "shallow_user.display_name",
];

/// The shapes of data this tool reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSet {
    /// Per-site profiles of a network account.
    Sites,
    /// Just enough of an answer to find its question.
    AnswerRefs,
    /// Complete questions with their comments and answers.
    Questions,
}

impl FieldSet {
    fn fields(&self) -> &'static [&'static str] {
        match self {
            FieldSet::Sites => SITE_FIELDS,
            FieldSet::AnswerRefs => ANSWER_REF_FIELDS,
            FieldSet::Questions => QUESTION_FIELDS,
        }
    }

    /// The `filters/create` request for this field set.
    ///
    /// `unsafe=false` keeps markdown bodies entity-encoded, which the renderer
    /// decodes before writing.
    pub fn create_request(&self) -> ApiRequest {
        let include = ENVELOPE_FIELDS
            .iter()
            .chain(self.fields())
            .copied()
            .collect::<Vec<_>>()
            .join(";");

        ApiRequest::new("filters/create")
            .with_param("include", include)
            .with_param("base", "none")
            .with_param("unsafe", "false")
    }
}

/// One filter token per field set, created at the start of a run.
#[derive(Debug, Clone)]
pub struct FilterSet {
    sites: FilterToken,
    answer_refs: FilterToken,
    questions: FilterToken,
}

impl FilterSet {
    /// Creates every filter the run needs, one request per field set.
    pub async fn create(
        transport: &dyn ApiTransport,
        governor: &mut BackoffGovernor<'_>,
    ) -> Result<Self, AppError> {
        let sites = create_filter(transport, FieldSet::Sites, governor).await?;
        let answer_refs = create_filter(transport, FieldSet::AnswerRefs, governor).await?;
        let questions = create_filter(transport, FieldSet::Questions, governor).await?;

        Ok(Self {
            sites,
            answer_refs,
            questions,
        })
    }

    /// Builds a filter set from tokens that are already known.
    pub fn from_tokens(sites: FilterToken, answer_refs: FilterToken, questions: FilterToken) -> Self {
        Self {
            sites,
            answer_refs,
            questions,
        }
    }

    pub fn token(&self, set: FieldSet) -> &FilterToken {
        match set {
            FieldSet::Sites => &self.sites,
            FieldSet::AnswerRefs => &self.answer_refs,
            FieldSet::Questions => &self.questions,
        }
    }
}

async fn create_filter(
    transport: &dyn ApiTransport,
    set: FieldSet,
    governor: &mut BackoffGovernor<'_>,
) -> Result<FilterToken, AppError> {
    let response = transport.get(&set.create_request()).await?;
    let url = response.url.clone();
    let page = parse_page::<FilterItem>(response)?;
    log::debug!("Created filter for {:?}", set);

    governor.observe(page.backoff);
    governor.settle().await;

    page.items
        .into_iter()
        .next()
        .ok_or_else(|| AppError::Schema {
            url,
            reason: format!("no filter returned for {:?}", set),
        })?
        .to_domain()
}
