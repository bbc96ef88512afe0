//! Conversation tree reader.
//!
//! Walks the node mapping once and derives four views: text messages, nodes that
//! issued search queries, the flattened query list, and reasoning thought nodes.
//!
//! # Ordering
//!
//! Output follows the order of the `mapping` object as delivered by the backend. That
//! order is not guaranteed to be chronological, and no attempt is made to rebuild the
//! chat order from `parent`/`children` links. Callers must not read the position of an
//! entry as its position in the conversation.

use crate::models::{
    Content, Conversation, ExtractionResult, MessageEntry, Node, SearchNode, ThoughtNode,
};

/// Separator used when joining the parts of a text message
const PART_SEPARATOR: &str = "\n";

/// Derive messages, search nodes, queries and thoughts from a conversation.
///
/// Pure and deterministic: the same conversation always yields the same result.
/// Nodes without a message contribute nothing. `queries` is filled in the same pass
/// as `search_nodes`, so its length always equals the total of the per-node query lists.
pub fn extract(conversation: &Conversation) -> ExtractionResult {
    let mut result = ExtractionResult {
        messages: Vec::new(),
        search_nodes: Vec::new(),
        queries: Vec::new(),
        thoughts: Vec::new(),
        conversation_id: conversation.conversation_id.clone().unwrap_or_default(),
        title: conversation.title.clone(),
    };

    for node in &conversation.mapping {
        read_node(node, &mut result);
    }

    result
}

fn read_node(node: &Node, result: &mut ExtractionResult) {
    let Some(message) = &node.message else {
        return;
    };
    let role = message.role();

    match &message.content {
        Content::Text { parts, .. } => {
            result
                .messages
                .push(MessageEntry { role: role.to_string(), text: parts.join(PART_SEPARATOR) });
        }
        Content::Thoughts(thoughts) if !thoughts.is_empty() => {
            result.thoughts.push(ThoughtNode {
                node_id: node.id.clone(),
                role: role.to_string(),
                thoughts: thoughts.clone(),
            });
        }
        _ => {}
    }

    let queries = message.search_queries();
    if !queries.is_empty() {
        result.search_nodes.push(SearchNode {
            node_id: node.id.clone(),
            role: role.to_string(),
            queries: queries.to_vec(),
        });
        result.queries.extend_from_slice(queries);
    }
}
