// src/formatting/document.rs
//! Renders a question, with its comments and answers, into one markdown
//! document.
//!
//! Section order is fixed by the template: provenance block (source link,
//! attribution, votes), title, body, comments on the question, then each
//! answer with its own metadata, body and comments.

use super::text::{block_quote, decode_entities, decode_markdown, format_timestamp};
use crate::error::AppError;
use crate::model::{Answer, Attribution, Comment, Owner, Question};
use handlebars::Handlebars;
use serde_json::{json, Value};

const TEMPLATE_NAME: &str = "question";
const QUESTION_TEMPLATE: &str = include_str!("../../templates/question.md.hbs");

/// Line used when a post has no named author.
pub const UNATTRIBUTED: &str = "no named author (community wiki)";

/// Compiled question template.
pub struct DocumentRenderer {
    engine: Handlebars<'static>,
}

impl DocumentRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut engine = Handlebars::new();
        // Output is markdown, not HTML.
        engine.register_escape_fn(handlebars::no_escape);
        engine
            .register_template_string(TEMPLATE_NAME, QUESTION_TEMPLATE)
            .map_err(|e| AppError::TemplateRender {
                name: TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self { engine })
    }

    /// Renders one question into its document text.
    pub fn render(&self, question: &Question) -> Result<String, AppError> {
        self.engine
            .render(TEMPLATE_NAME, &question_view(question))
            .map_err(|e| AppError::TemplateRender {
                name: TEMPLATE_NAME.to_string(),
                message: e.to_string(),
            })
    }
}

/// Attribution line such as `Asked by alice`.
pub fn attribution_line(verb: &str, owner: Option<&Owner>) -> String {
    match Attribution::of(owner) {
        Attribution::Named(name) => format!("{} by {}", verb, decode_entities(name)),
        Attribution::Unattributed => format!("{} by {}", verb, UNATTRIBUTED),
    }
}

fn question_view(question: &Question) -> Value {
    json!({
        "link": question.link,
        "attribution": attribution_line("Asked", question.owner.as_ref()),
        "created": format_timestamp(&question.creation_time),
        "up_votes": question.up_votes,
        "down_votes": question.down_votes,
        "score": question.score,
        "title": decode_markdown(&question.title),
        "body": decode_markdown(&question.body),
        "comments": question.comments.iter().map(comment_view).collect::<Vec<_>>(),
        "answers": question
            .answers
            .iter()
            .enumerate()
            .map(|(index, answer)| answer_view(index + 1, answer))
            .collect::<Vec<_>>(),
    })
}

fn answer_view(number: usize, answer: &Answer) -> Value {
    json!({
        "number": number,
        "accepted": answer.is_accepted,
        "attribution": attribution_line("Answered", answer.owner.as_ref()),
        "created": format_timestamp(&answer.creation_time),
        "up_votes": answer.up_votes,
        "down_votes": answer.down_votes,
        "score": answer.score,
        "body": decode_markdown(&answer.body),
        "comments": answer.comments.iter().map(comment_view).collect::<Vec<_>>(),
    })
}

fn comment_view(comment: &Comment) -> Value {
    json!({
        "quoted_body": block_quote(&decode_markdown(&comment.body)),
        "attribution": attribution_line("Commented", comment.owner.as_ref()),
        "created": format_timestamp(&comment.creation_time),
        "score": comment.score,
    })
}
