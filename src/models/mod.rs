//! Data models for ChatGPT conversation payloads and extraction results.
//!
//! - [`Conversation`] - The backend tree of nodes, parsed from `backend-api/conversation/<id>`
//! - [`Node`], [`Message`], [`Content`], [`Thought`] - Pieces of that tree
//! - [`ExtractionResult`] - The four derived views produced by the extractor
//!
//! Parsing goes through serde with the custom deserializers in
//! `parsers::deserializers` (node mapping order, null-tolerant defaults, content variants).

pub mod conversation;
pub mod extraction;

pub use conversation::{
    Author, Content, Conversation, Message, Metadata, Node, SearchModelQueries, Thought,
};
pub use extraction::{ExtractionResult, ExtractionSummary, MessageEntry, SearchNode, ThoughtNode};
