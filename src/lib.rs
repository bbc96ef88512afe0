//! ChatGPT Query Extractor - Pull messages, search queries and reasoning thoughts out of
//! ChatGPT conversations
//!
//! This library fetches a conversation from the ChatGPT backend using the browser's
//! session cookie and walks its node mapping. It supports:
//!
//! - Exchanging the session cookie for a bearer token and fetching conversation JSON
//! - Extracting message text, web search queries and reasoning thoughts in mapping order
//! - A request/response bridge that lazily installs a responder in the page context
//! - Rendering results as text, JSON or the popup's HTML views
//!
//! # Example
//!
//! ```no_run
//! use chatgpt_query_extractor::{extract, parse_conversation};
//!
//! let json = std::fs::read_to_string("conversation.json")?;
//! let conversation = parse_conversation(&json)?;
//! let result = extract(&conversation);
//! println!("Found {} search queries", result.queries.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod bridge;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod extractor;
pub mod models;
pub mod parsers;
pub mod presenter;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use bridge::run_extraction;
pub use config::ExtractorConfig;
pub use error::{ExtractorError, Result};
pub use extractor::extract;
pub use models::{Conversation, ExtractionResult};
pub use parsers::{parse_conversation, parse_conversation_file};
pub use transport::SessionClient;
