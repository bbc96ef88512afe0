use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::injector::PageInjector;
use super::page::PageContext;
use super::protocol::Request;
use crate::error::{ExtractorError, Result};
use crate::models::ExtractionResult;
use crate::transport::ensure_allowed_host;

/// UI side of the bridge.
///
/// Makes sure a responder is listening in the page (pinging first, injecting one if
/// nobody answers) and then asks it for an extraction.
pub struct Requester {
    injector: Arc<dyn PageInjector>,
    settle_delay: Duration,
    allowed_host: String,
}

impl Requester {
    pub fn new(
        injector: Arc<dyn PageInjector>,
        settle_delay: Duration,
        allowed_host: impl Into<String>,
    ) -> Self {
        Self { injector, settle_delay, allowed_host: allowed_host.into() }
    }

    /// Run one extraction against `page`.
    ///
    /// A `{success: false}` reply comes back as [`ExtractorError::ExtractionFailed`];
    /// a reply that never arrives as [`ExtractorError::Communication`].
    pub async fn run_extraction(&self, page: &PageContext) -> Result<ExtractionResult> {
        ensure_allowed_host(&page.location(), &self.allowed_host)?;

        self.ensure_responder(page).await?;

        debug!("Sending extraction message");
        let response = page.send_message(Request::ExtractQueries).await?;

        if response.success {
            let result = response.result.ok_or_else(|| {
                ExtractorError::Communication("success response carried no result".to_string())
            })?;
            info!(
                messages = result.messages.len(),
                queries = result.queries.len(),
                search_nodes = result.search_nodes.len(),
                "Extraction succeeded"
            );
            Ok(result)
        } else {
            let message = response.error.unwrap_or_else(|| "Unknown error".to_string());
            warn!("Extraction failed: {}", message);
            Err(ExtractorError::ExtractionFailed(message))
        }
    }

    async fn ensure_responder(&self, page: &PageContext) -> Result<()> {
        match page.send_message(Request::Ping).await {
            Ok(response) if response.ready == Some(true) => Ok(()),
            Ok(_) => {
                debug!("Responder present but not ready, waiting {:?}", self.settle_delay);
                tokio::time::sleep(self.settle_delay).await;
                Ok(())
            }
            Err(ExtractorError::NoReceiver) => {
                debug!("Responder not ready, attempting to inject");
                self.injector.inject(page).await.map_err(|e| {
                    warn!("Failed to inject responder: {}", e);
                    ExtractorError::Injection(e.to_string())
                })?;
                tokio::time::sleep(self.settle_delay).await;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}
