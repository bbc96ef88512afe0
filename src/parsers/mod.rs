//! Parsers for ChatGPT backend payloads
//!
//! # Error Handling Strategy
//!
//! A conversation payload is a single JSON document, so parsing is all-or-nothing:
//!
//! - **Validated parse**: The body is decoded into typed models up front. Any shape
//!   mismatch becomes an `ExtractorError::Extraction` naming the offending node, rather
//!   than an empty field discovered halfway through extraction.
//!
//! - **Tolerated gaps**: Fields the backend routinely omits or sends as `null`
//!   (`metadata`, `chunks`, `finished`, `children`) fall back to empty defaults.
//!
//! - **Ignored extras**: Unknown fields and unrecognized content types are accepted and
//!   skipped, so new backend features don't break extraction.

pub mod conversation;
pub mod deserializers;

pub use conversation::{conversation_from_value, parse_conversation, parse_conversation_file};
