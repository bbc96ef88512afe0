use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, COOKIE};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ExtractorConfig;
use crate::error::{ExtractorError, Result};
use crate::models::Conversation;
use crate::parsers::parse_conversation;

/// Something that can produce the raw conversation for an id.
///
/// The page-context responder only depends on this, so tests can swap in a fixed
/// conversation without a backend.
#[async_trait]
pub trait ConversationSource: Send + Sync {
    async fn fetch_conversation(&self, conversation_id: &str) -> Result<Conversation>;
}

#[derive(Debug, Deserialize)]
struct SessionResponse {
    #[serde(rename = "accessToken", default)]
    access_token: Option<String>,
}

/// HTTP client for the session and conversation endpoints.
///
/// Requests have no timeout; a fetch runs until the backend answers or the connection fails.
pub struct SessionClient {
    client: reqwest::Client,
    config: ExtractorConfig,
}

impl SessionClient {
    pub fn new(config: ExtractorConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Exchange the session cookie for a bearer access token
    pub async fn fetch_access_token(&self) -> Result<String> {
        let url = self.config.session_url();
        debug!("Fetching session from {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.session_token {
            request =
                request.header(COOKIE, format!("{}={}", self.config.session_cookie_name, token));
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractorError::Session { status: status.as_u16() });
        }

        let body = response.text().await?;
        let session: SessionResponse = serde_json::from_str(&body).map_err(|e| {
            debug!("Session response is not JSON: {}", e);
            ExtractorError::Auth
        })?;

        session.access_token.filter(|token| !token.is_empty()).ok_or(ExtractorError::Auth)
    }

    /// Fetch and parse a conversation by id: session lookup first, then the authorized fetch
    pub async fn fetch_conversation(&self, conversation_id: &str) -> Result<Conversation> {
        let access_token = self.fetch_access_token().await?;

        let url = self.config.conversation_url(conversation_id);
        debug!("Fetching conversation data from {}", url);

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", access_token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExtractorError::Fetch { status: status.as_u16() });
        }

        let body = response.text().await?;
        let conversation = parse_conversation(&body)?;
        info!(conversation_id, nodes = conversation.mapping.len(), "Conversation data received");

        Ok(conversation)
    }
}

#[async_trait]
impl ConversationSource for SessionClient {
    async fn fetch_conversation(&self, conversation_id: &str) -> Result<Conversation> {
        SessionClient::fetch_conversation(self, conversation_id).await
    }
}
