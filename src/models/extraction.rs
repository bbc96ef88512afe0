use serde::{Deserialize, Serialize};

use super::conversation::Thought;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageEntry {
    pub role: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNode {
    pub node_id: String,
    pub role: String,
    pub queries: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThoughtNode {
    pub node_id: String,
    pub role: String,
    pub thoughts: Vec<Thought>,
}

/// The four views derived from one conversation.
///
/// Serialized with the field names the bridge protocol uses
/// (`messages`, `searchNodes`, `queries`, `thoughts`, `conversationId`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub messages: Vec<MessageEntry>,
    pub search_nodes: Vec<SearchNode>,
    pub queries: Vec<String>,
    pub thoughts: Vec<ThoughtNode>,
    #[serde(default)]
    pub conversation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ExtractionResult {
    pub fn summary(&self) -> ExtractionSummary {
        ExtractionSummary {
            messages: self.messages.len(),
            queries: self.queries.len(),
            search_nodes: self.search_nodes.len(),
            thought_nodes: self.thoughts.len(),
            thoughts: self.thoughts.iter().map(|node| node.thoughts.len()).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
            && self.search_nodes.is_empty()
            && self.queries.is_empty()
            && self.thoughts.is_empty()
    }
}

/// Counts shown as badges next to each list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionSummary {
    pub messages: usize,
    pub queries: usize,
    pub search_nodes: usize,
    pub thought_nodes: usize,
    pub thoughts: usize,
}
