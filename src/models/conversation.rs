use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::parsers::deserializers::{RawContent, deserialize_mapping, deserialize_null_default};

/// A conversation as returned by `backend-api/conversation/<id>`.
///
/// `mapping` keeps the key order of the JSON object it was parsed from. That order is
/// whatever the backend happened to emit and is not a chronological ordering of the chat.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conversation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub create_time: Option<f64>,
    #[serde(default)]
    pub update_time: Option<f64>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(deserialize_with = "deserialize_mapping")]
    pub mapping: Vec<Node>,
}

impl Conversation {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.create_time.and_then(seconds_to_datetime)
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.update_time.and_then(seconds_to_datetime)
    }
}

fn seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((seconds * 1000.0) as i64)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    /// Falls back to the mapping key when the node carries no id of its own
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub author: Author,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub content: Content,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub metadata: Metadata,
}

impl Message {
    pub fn role(&self) -> &str {
        &self.author.role
    }

    /// Search queries the model issued for this message, empty if none
    pub fn search_queries(&self) -> &[String] {
        self.metadata.search_model_queries.as_ref().map(|s| s.queries.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub role: String,
}

/// Message content, keyed by what the extractor cares about.
///
/// Any content object with a `parts` array is text-bearing regardless of its
/// `content_type` (plain `text` and `multimodal_text` both qualify). Non-string
/// parts such as image pointers are dropped during parsing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawContent")]
pub enum Content {
    Text { content_type: String, parts: Vec<String> },
    Thoughts(Vec<Thought>),
    Other(String),
}

impl Default for Content {
    fn default() -> Self {
        Content::Other(String::new())
    }
}

impl Content {
    pub fn content_type(&self) -> &str {
        match self {
            Content::Text { content_type, .. } => content_type,
            Content::Thoughts(_) => "thoughts",
            Content::Other(content_type) => content_type,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub search_model_queries: Option<SearchModelQueries>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchModelQueries {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub queries: Vec<String>,
}

/// One reasoning fragment of a `thoughts` message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thought {
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub content: String,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub chunks: Vec<Value>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub finished: bool,
}
