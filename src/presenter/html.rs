//! HTML rendering of the popup views.
//!
//! Every piece of conversation-controlled text (roles, node ids, message text, queries,
//! thoughts) goes through [`escape_html`] before it is embedded.

use std::fmt::Write;

use super::state::UiState;
use crate::models::{ExtractionResult, MessageEntry, SearchNode, ThoughtNode};

const STYLE: &str = "\
body { font-family: system-ui, sans-serif; width: 420px; margin: 0; padding: 12px; }
.view { display: flex; flex-direction: column; gap: 8px; }
.accordion-header { font-weight: 600; cursor: pointer; }
.badge { background: #10a37f; color: #fff; border-radius: 8px; padding: 0 6px; margin-left: 4px; }
.role-badge { font-size: 11px; text-transform: uppercase; margin-right: 6px; }
.thought-status { color: #10a37f; margin-left: 6px; }
.error-message { color: #c62828; }
.text-content, .query-text { white-space: normal; word-break: break-word; }";

/// Escape text for embedding in HTML. Newlines become `<br>`.
pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            '\n' => escaped.push_str("<br>"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render a complete popup document showing the view for `state`
pub fn render_page(state: &UiState) -> String {
    let body = match state {
        UiState::Idle => render_initial_view(),
        UiState::Extracting => render_loading_view(),
        UiState::Success(result) => render_results_view(result),
        UiState::Error(message) => render_error_view(message),
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>ChatGPT Query Extractor</title>\n<style>\n{}\n</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        STYLE, body
    )
}

fn render_initial_view() -> String {
    "<div id=\"initial-view\" class=\"view\">\n\
     <button id=\"gpt-extractor-button\">Extract Queries</button>\n\
     </div>\n"
        .to_string()
}

fn render_loading_view() -> String {
    "<div id=\"loading-view\" class=\"view\">\n<p>Extracting...</p>\n</div>\n".to_string()
}

fn render_error_view(message: &str) -> String {
    format!(
        "<div id=\"error-view\" class=\"view\">\n\
         <p id=\"error-message\" class=\"error-message\">{}</p>\n\
         <button id=\"retry-button\">Try Again</button>\n\
         </div>\n",
        escape_html(message)
    )
}

/// Results view: summary line, then one accordion per list with its badge count
pub fn render_results_view(result: &ExtractionResult) -> String {
    let mut html = String::from("<div id=\"results-view\" class=\"view\">\n");

    if let Some(title) = &result.title {
        let _ = writeln!(html, "<h2 class=\"conversation-title\">{}</h2>", escape_html(title));
    }

    let _ = writeln!(
        html,
        "<p id=\"results-summary\">Found <strong>{}</strong> search queries, \
         <strong>{}</strong> messages, <strong>{}</strong> thought nodes, and \
         <strong>{}</strong> search nodes.</p>",
        result.queries.len(),
        result.messages.len(),
        result.thoughts.len(),
        result.search_nodes.len()
    );

    let sections = [
        ("messages", "Messages", result.messages.len(), render_messages(&result.messages)),
        ("queries", "Search Queries", result.queries.len(), render_queries(&result.queries)),
        ("thoughts", "Thoughts", result.thoughts.len(), render_thoughts(&result.thoughts)),
        (
            "nodes",
            "Search Nodes",
            result.search_nodes.len(),
            render_search_nodes(&result.search_nodes),
        ),
    ];
    for (id, title, count, items) in sections {
        push_accordion(&mut html, id, title, count, &items);
    }

    html.push_str("<button id=\"back-button\">Back</button>\n</div>\n");
    html
}

fn push_accordion(html: &mut String, id: &str, title: &str, count: usize, items: &str) {
    let _ = write!(
        html,
        "<div class=\"accordion\">\n\
         <div class=\"accordion-header\">{} <span id=\"{}-badge\" class=\"badge\">{}</span></div>\n\
         <div id=\"{}-list\" class=\"accordion-content\">\n{}</div>\n\
         </div>\n",
        title, id, count, id, items
    );
}

fn render_messages(messages: &[MessageEntry]) -> String {
    let mut html = String::new();
    for (index, message) in messages.iter().enumerate() {
        let role = escape_html(&message.role);
        let _ = writeln!(
            html,
            "<div class=\"message-item {role}\"><div><span class=\"role-badge {role}\">{role}</span>\
             <strong>Message {}</strong></div><div class=\"text-content\">{}</div></div>",
            index + 1,
            escape_html(&message.text)
        );
    }
    html
}

fn render_queries(queries: &[String]) -> String {
    let mut html = String::new();
    for (index, query) in queries.iter().enumerate() {
        let _ = writeln!(
            html,
            "<div class=\"query-item\"><strong>Query {}</strong><div class=\"query-text\">{}</div></div>",
            index + 1,
            escape_html(query)
        );
    }
    html
}

fn render_thoughts(nodes: &[ThoughtNode]) -> String {
    let mut html = String::new();
    for (index, node) in nodes.iter().enumerate() {
        let role = escape_html(&node.role);
        let _ = write!(
            html,
            "<div class=\"thought-item\"><div><span class=\"role-badge {role}\">{role}</span>\
             <strong>Thought Node {}</strong> <small>(ID: {})</small></div><div class=\"text-content\">",
            index + 1,
            escape_html(&node.node_id)
        );
        for (t_index, thought) in node.thoughts.iter().enumerate() {
            let status =
                if thought.finished { "<span class=\"thought-status\">Finished</span>" } else { "" };
            let _ = write!(
                html,
                "<div class=\"thought-entry\"><div class=\"thought-summary\">{}. {}{}</div>\
                 <div class=\"thought-content\">{}</div></div>",
                t_index + 1,
                escape_html(thought.summary.as_deref().unwrap_or("No summary")),
                status,
                escape_html(&thought.content)
            );
        }
        html.push_str("</div></div>\n");
    }
    html
}

fn render_search_nodes(nodes: &[SearchNode]) -> String {
    let mut html = String::new();
    for (index, node) in nodes.iter().enumerate() {
        let role = escape_html(&node.role);
        let _ = write!(
            html,
            "<div class=\"node-item\"><div><span class=\"role-badge {role}\">{role}</span>\
             <strong>Node {}</strong> <small>(ID: {})</small></div>\
             <div class=\"text-content\"><strong>Queries ({}):</strong>",
            index + 1,
            escape_html(&node.node_id),
            node.queries.len()
        );
        for (q_index, query) in node.queries.iter().enumerate() {
            let _ = write!(
                html,
                "<div class=\"query-text\">{}. {}</div>",
                q_index + 1,
                escape_html(query)
            );
        }
        html.push_str("</div></div>\n");
    }
    html
}
