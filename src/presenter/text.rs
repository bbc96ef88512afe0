use std::fmt::Write;

use crate::models::ExtractionResult;

/// Plain-text rendering of the four lists for the terminal
pub fn render_text(result: &ExtractionResult) -> String {
    let mut out = String::new();
    let summary = result.summary();

    let _ = writeln!(out, "ChatGPT Conversation Extraction");
    let _ = writeln!(out, "================================");
    if let Some(title) = &result.title {
        let _ = writeln!(out, "Title: {}", title);
    }
    if !result.conversation_id.is_empty() {
        let _ = writeln!(out, "Conversation: {}", result.conversation_id);
    }
    let _ = writeln!(out, "Search queries: {}", summary.queries);
    let _ = writeln!(out, "Messages: {}", summary.messages);
    let _ = writeln!(out, "Thought nodes: {} ({} thoughts)", summary.thought_nodes, summary.thoughts);
    let _ = writeln!(out, "Search nodes: {}", summary.search_nodes);

    if !result.queries.is_empty() {
        let _ = writeln!(out, "\nSearch Queries");
        let _ = writeln!(out, "--------------");
        for (index, query) in result.queries.iter().enumerate() {
            let _ = writeln!(out, "{:>3}. {}", index + 1, query);
        }
    }

    if !result.search_nodes.is_empty() {
        let _ = writeln!(out, "\nSearch Nodes");
        let _ = writeln!(out, "------------");
        for (index, node) in result.search_nodes.iter().enumerate() {
            let _ = writeln!(
                out,
                "Node {} [{}] (ID: {}), {} queries",
                index + 1,
                node.role,
                node.node_id,
                node.queries.len()
            );
            for query in &node.queries {
                let _ = writeln!(out, "    - {}", query);
            }
        }
    }

    if !result.thoughts.is_empty() {
        let _ = writeln!(out, "\nThoughts");
        let _ = writeln!(out, "--------");
        for (index, node) in result.thoughts.iter().enumerate() {
            let _ = writeln!(out, "Thought Node {} [{}] (ID: {})", index + 1, node.role, node.node_id);
            for (t_index, thought) in node.thoughts.iter().enumerate() {
                let status = if thought.finished { " (finished)" } else { "" };
                let summary = thought.summary.as_deref().unwrap_or("No summary");
                let _ = writeln!(out, "  {}. {}{}", t_index + 1, summary, status);
                for line in thought.content.lines() {
                    let _ = writeln!(out, "     {}", line);
                }
            }
        }
    }

    if !result.messages.is_empty() {
        let _ = writeln!(out, "\nMessages");
        let _ = writeln!(out, "--------");
        for (index, message) in result.messages.iter().enumerate() {
            let _ = writeln!(out, "Message {} [{}]", index + 1, message.role);
            for line in message.text.lines() {
                let _ = writeln!(out, "    {}", line);
            }
        }
    }

    out
}
