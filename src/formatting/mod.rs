// src/formatting/mod.rs
//! Renders archived questions into markdown documents.

pub mod document;
mod text;

pub use self::document::{attribution_line, DocumentRenderer};
pub use self::text::decode_entities;
