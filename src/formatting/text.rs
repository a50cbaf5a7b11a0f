// src/formatting/text.rs
//! Text helpers shared by the document renderer.

use chrono::{DateTime, Utc};

/// Decodes HTML entities. The API entity-encodes markdown and titles when the
/// filter is not `unsafe`.
pub fn decode_entities(text: &str) -> String {
    html_escape::decode_html_entities(text).into_owned()
}

/// Decodes entities and converts `\r\n` line endings to `\n`.
pub fn decode_markdown(text: &str) -> String {
    decode_entities(text).replace("\r\n", "\n")
}

/// Prefixes every line with `> ` so multi-line text stays inside one quote.
pub fn block_quote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
