use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use super::protocol::{Request, Response};
use crate::error::{ExtractorError, Result};

/// A request delivered to the page-context responder.
///
/// `reply` is a one-shot channel: the responder answers exactly once, possibly after an
/// asynchronous fetch. Dropping it unanswered closes the port on the requester side.
#[derive(Debug)]
pub struct Envelope {
    pub request: Request,
    /// Location of the page at the time the request was sent
    pub location: String,
    pub reply: oneshot::Sender<Response>,
}

pub type Listener = mpsc::UnboundedSender<Envelope>;

/// A browser tab as seen by the requester: a location plus, once a responder has been
/// installed, the listener that receives messages for it.
#[derive(Debug, Clone)]
pub struct PageContext {
    inner: Arc<PageInner>,
}

#[derive(Debug)]
struct PageInner {
    location: RwLock<String>,
    listener: Mutex<Option<Listener>>,
}

impl PageContext {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(PageInner {
                location: RwLock::new(location.into()),
                listener: Mutex::new(None),
            }),
        }
    }

    pub fn location(&self) -> String {
        self.inner.location.read().clone()
    }

    /// Navigate to another location. The page context is recreated, so any
    /// installed responder is gone.
    pub fn navigate(&self, location: impl Into<String>) {
        *self.inner.location.write() = location.into();
        self.reload();
    }

    /// Reload the page, dropping the installed responder
    pub fn reload(&self) {
        if self.inner.listener.lock().take().is_some() {
            debug!("Page reloaded, responder listener dropped");
        }
    }

    pub fn add_listener(&self, listener: Listener) {
        *self.inner.listener.lock() = Some(listener);
    }

    pub fn has_listener(&self) -> bool {
        self.inner.listener.lock().as_ref().is_some_and(|listener| !listener.is_closed())
    }

    /// Send a request to the page-context responder and wait for its reply.
    ///
    /// Fails with [`ExtractorError::NoReceiver`] when no responder is listening and with
    /// [`ExtractorError::Communication`] when the responder drops the request unanswered.
    pub async fn send_message(&self, request: Request) -> Result<Response> {
        let listener = self.inner.listener.lock().clone().ok_or(ExtractorError::NoReceiver)?;

        let (reply, response) = oneshot::channel();
        let envelope = Envelope { request, location: self.location(), reply };
        listener.send(envelope).map_err(|_| ExtractorError::NoReceiver)?;

        response.await.map_err(|_| {
            ExtractorError::Communication(
                "The message port closed before a response was received.".to_string(),
            )
        })
    }
}
