//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::Router;
use axum::extract::{Path as UrlPath, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use parking_lot::Mutex;
use serde_json::{Value, json};

use chatgpt_query_extractor::ExtractorConfig;

pub const ACCESS_TOKEN: &str = "test-access-token";
pub const SESSION_COOKIE: &str = "test-session-cookie";

/// Builder for a single mapping node
#[derive(Clone)]
pub struct NodeBuilder {
    id: String,
    role: String,
    content: Option<Value>,
    queries: Option<Vec<String>>,
    has_message: bool,
    parent: Option<String>,
    children: Vec<String>,
}

impl NodeBuilder {
    /// Node with an empty text message from `assistant`
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            role: "assistant".to_string(),
            content: None,
            queries: None,
            has_message: true,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Node without a message, like the synthetic root the backend sends
    pub fn empty(id: &str) -> Self {
        Self { has_message: false, ..Self::new(id) }
    }

    pub fn role(mut self, role: &str) -> Self {
        self.role = role.to_string();
        self
    }

    pub fn text(mut self, parts: &[&str]) -> Self {
        self.content = Some(json!({"content_type": "text", "parts": parts}));
        self
    }

    pub fn thoughts(mut self, thoughts: Vec<Value>) -> Self {
        self.content = Some(json!({"content_type": "thoughts", "thoughts": thoughts}));
        self
    }

    pub fn content(mut self, content: Value) -> Self {
        self.content = Some(content);
        self
    }

    pub fn queries(mut self, queries: &[&str]) -> Self {
        self.queries = Some(queries.iter().map(|q| q.to_string()).collect());
        self
    }

    pub fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    pub fn child(mut self, child: &str) -> Self {
        self.children.push(child.to_string());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn to_json(&self) -> Value {
        let message = if self.has_message {
            let content = self
                .content
                .clone()
                .unwrap_or_else(|| json!({"content_type": "text", "parts": [""]}));
            let metadata = match &self.queries {
                Some(queries) => json!({"search_model_queries": {"queries": queries}}),
                None => json!({}),
            };
            json!({
                "id": self.id,
                "author": {"role": self.role},
                "content": content,
                "metadata": metadata,
            })
        } else {
            Value::Null
        };

        json!({
            "id": self.id,
            "message": message,
            "parent": self.parent,
            "children": self.children,
        })
    }
}

/// A reasoning thought as the backend sends it
pub fn thought(summary: Option<&str>, content: &str, finished: bool) -> Value {
    let mut thought = json!({"content": content, "chunks": [content], "finished": finished});
    if let Some(summary) = summary {
        thought["summary"] = json!(summary);
    }
    thought
}

/// Builder for a full conversation response body
pub struct ConversationBuilder {
    conversation_id: String,
    title: Option<String>,
    create_time: Option<f64>,
    nodes: Vec<NodeBuilder>,
}

impl ConversationBuilder {
    pub fn new(conversation_id: &str) -> Self {
        Self {
            conversation_id: conversation_id.to_string(),
            title: None,
            create_time: None,
            nodes: Vec::new(),
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn create_time(mut self, seconds: f64) -> Self {
        self.create_time = Some(seconds);
        self
    }

    /// Nodes keep the order they are added in
    pub fn node(mut self, node: NodeBuilder) -> Self {
        self.nodes.push(node);
        self
    }

    pub fn to_json(&self) -> Value {
        let mut mapping = serde_json::Map::new();
        for node in &self.nodes {
            mapping.insert(node.id().to_string(), node.to_json());
        }

        let mut body = json!({
            "conversation_id": self.conversation_id,
            "mapping": mapping,
        });
        if let Some(title) = &self.title {
            body["title"] = json!(title);
        }
        if let Some(create_time) = self.create_time {
            body["create_time"] = json!(create_time);
            body["update_time"] = json!(create_time + 60.0);
        }
        body
    }

    pub fn to_json_string(&self) -> String {
        self.to_json().to_string()
    }

    /// Write the body to `<dir>/<name>` and return the path
    pub fn write_to(&self, dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, self.to_json_string()).expect("Failed to write conversation file");
        path
    }
}

/// A conversation exercising all four extraction lists
pub fn sample_conversation(conversation_id: &str) -> ConversationBuilder {
    ConversationBuilder::new(conversation_id)
        .title("Weekend trip")
        .create_time(1_700_000_000.0)
        .node(NodeBuilder::empty("root").child("u1"))
        .node(NodeBuilder::new("u1").role("user").text(&["Plan a weekend in Lisbon"]).parent("root"))
        .node(
            NodeBuilder::new("t1")
                .thoughts(vec![
                    thought(Some("Checking weather"), "Look up the forecast", true),
                    thought(None, "Consider museums", false),
                ])
                .parent("u1"),
        )
        .node(
            NodeBuilder::new("s1")
                .role("assistant")
                .content(json!({"content_type": "code", "text": "search(...)"}))
                .queries(&["Lisbon weather this weekend", "Lisbon museums open Sunday"])
                .parent("t1"),
        )
        .node(NodeBuilder::new("a1").text(&["Here is a plan:", "Day 1: Alfama"]).parent("s1"))
}

/// What the mock backend should answer
#[derive(Clone)]
pub struct BackendSpec {
    pub session_status: u16,
    /// Raw session body; defaults to `{"accessToken": ACCESS_TOKEN}`
    pub session_body: String,
    pub conversations: HashMap<String, String>,
}

impl Default for BackendSpec {
    fn default() -> Self {
        Self {
            session_status: 200,
            session_body: json!({"accessToken": ACCESS_TOKEN}).to_string(),
            conversations: HashMap::new(),
        }
    }
}

impl BackendSpec {
    pub fn with_conversation(mut self, builder: &ConversationBuilder) -> Self {
        self.conversations.insert(builder.conversation_id.clone(), builder.to_json_string());
        self
    }

    pub fn session_status(mut self, status: u16) -> Self {
        self.session_status = status;
        self
    }

    pub fn session_body(mut self, body: &str) -> Self {
        self.session_body = body.to_string();
        self
    }
}

#[derive(Default)]
struct Recorded {
    cookies: Vec<String>,
    authorizations: Vec<String>,
    conversation_requests: Vec<String>,
}

struct BackendState {
    spec: BackendSpec,
    recorded: Mutex<Recorded>,
}

/// Local stand-in for the session and conversation endpoints
pub struct MockBackend {
    pub base_url: String,
    state: Arc<BackendState>,
}

impl MockBackend {
    pub async fn spawn(spec: BackendSpec) -> Self {
        let state = Arc::new(BackendState { spec, recorded: Mutex::new(Recorded::default()) });

        let app = Router::new()
            .route("/api/auth/session", get(session_handler))
            .route("/backend-api/conversation/{id}", get(conversation_handler))
            .with_state(state.clone());

        let listener =
            tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("Failed to bind listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock backend failed");
        });

        Self { base_url: format!("http://{}", addr), state }
    }

    /// Config pointing at this backend with a session cookie and no settle delay
    pub fn config(&self) -> ExtractorConfig {
        ExtractorConfig {
            base_url: self.base_url.clone(),
            session_token: Some(SESSION_COOKIE.to_string()),
            settle_delay_ms: 0,
            ..Default::default()
        }
    }

    pub fn cookies(&self) -> Vec<String> {
        self.state.recorded.lock().cookies.clone()
    }

    pub fn authorizations(&self) -> Vec<String> {
        self.state.recorded.lock().authorizations.clone()
    }

    pub fn conversation_requests(&self) -> Vec<String> {
        self.state.recorded.lock().conversation_requests.clone()
    }
}

async fn session_handler(
    State(state): State<Arc<BackendState>>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    if let Some(cookie) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) {
        state.recorded.lock().cookies.push(cookie.to_string());
    }

    let status = StatusCode::from_u16(state.spec.session_status).unwrap_or(StatusCode::OK);
    (status, state.spec.session_body.clone())
}

async fn conversation_handler(
    State(state): State<Arc<BackendState>>,
    UrlPath(id): UrlPath<String>,
    headers: HeaderMap,
) -> (StatusCode, String) {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    {
        let mut recorded = state.recorded.lock();
        recorded.authorizations.push(authorization.clone());
        recorded.conversation_requests.push(id.clone());
    }

    if authorization != format!("Bearer {}", ACCESS_TOKEN) {
        return (StatusCode::UNAUTHORIZED, "{\"detail\":\"Unauthorized\"}".to_string());
    }

    match state.spec.conversations.get(&id) {
        Some(body) => (StatusCode::OK, body.clone()),
        None => (StatusCode::NOT_FOUND, "{\"detail\":\"Conversation not found\"}".to_string()),
    }
}
