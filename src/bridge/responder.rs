use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::page::{Envelope, PageContext};
use super::protocol::{Request, Response};
use crate::error::Result;
use crate::extractor::extract;
use crate::models::ExtractionResult;
use crate::transport::{ConversationSource, conversation_id_from_location};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponderState {
    Uninitialized,
    Ready,
}

/// Page-context side of the bridge.
///
/// Once installed into a [`PageContext`] it answers `ping` immediately and runs each
/// `extractQueries` request (fetch, then extract) on its own task, replying when done.
pub struct Responder {
    source: Arc<dyn ConversationSource>,
    path_prefix: String,
    state: ResponderState,
}

impl Responder {
    pub fn new(source: Arc<dyn ConversationSource>, path_prefix: impl Into<String>) -> Self {
        Self { source, path_prefix: path_prefix.into(), state: ResponderState::Uninitialized }
    }

    pub fn state(&self) -> ResponderState {
        self.state
    }

    /// Register with the page and start serving requests.
    ///
    /// The responder is `Ready` from the moment its listener is registered. It stays
    /// installed until the page reloads or navigates away.
    pub fn install(mut self, page: &PageContext) -> JoinHandle<()> {
        let (listener, mut requests) = mpsc::unbounded_channel::<Envelope>();
        page.add_listener(listener);
        self.state = ResponderState::Ready;
        info!("Responder ready");

        let responder = Arc::new(self);
        tokio::spawn(async move {
            while let Some(envelope) = requests.recv().await {
                match envelope.request {
                    Request::Ping => {
                        let _ = envelope.reply.send(responder.ping());
                    }
                    Request::ExtractQueries => {
                        // Keep the reply port open until the fetch completes
                        let handler = Arc::clone(&responder);
                        tokio::spawn(async move {
                            let response = handler.handle_extract(&envelope.location).await;
                            if envelope.reply.send(response).is_err() {
                                debug!("Requester went away before the extraction finished");
                            }
                        });
                    }
                }
            }
            debug!("Responder listener closed");
        })
    }

    pub fn ping(&self) -> Response {
        Response::ready(self.state == ResponderState::Ready)
    }

    /// Answer an `extractQueries` request for the page at `location`
    pub async fn handle_extract(&self, location: &str) -> Response {
        debug!("Extraction request received");
        match self.extract_queries(location).await {
            Ok(result) => Response::extracted(result),
            Err(e) => {
                error!("Extraction error: {}", e);
                Response::failed(e.to_string())
            }
        }
    }

    async fn extract_queries(&self, location: &str) -> Result<ExtractionResult> {
        let conversation_id = conversation_id_from_location(location, &self.path_prefix)?;
        debug!(%conversation_id, "Starting query extraction");

        let conversation = self.source.fetch_conversation(&conversation_id).await?;
        let mut result = extract(&conversation);
        result.conversation_id = conversation_id;

        let summary = result.summary();
        info!(
            queries = summary.queries,
            messages = summary.messages,
            thought_nodes = summary.thought_nodes,
            "Extracted conversation"
        );

        Ok(result)
    }
}
