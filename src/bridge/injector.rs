use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::page::PageContext;
use super::responder::Responder;
use crate::error::Result;
use crate::transport::ConversationSource;

/// Installs a responder into a page context on demand
#[async_trait]
pub trait PageInjector: Send + Sync {
    async fn inject(&self, page: &PageContext) -> Result<()>;
}

/// Injects a [`Responder`] that fetches through the given source
pub struct ResponderInjector {
    source: Arc<dyn ConversationSource>,
    path_prefix: String,
}

impl ResponderInjector {
    pub fn new(source: Arc<dyn ConversationSource>, path_prefix: impl Into<String>) -> Self {
        Self { source, path_prefix: path_prefix.into() }
    }
}

#[async_trait]
impl PageInjector for ResponderInjector {
    async fn inject(&self, page: &PageContext) -> Result<()> {
        debug!("Injecting responder into {}", page.location());
        Responder::new(Arc::clone(&self.source), self.path_prefix.clone()).install(page);
        Ok(())
    }
}
