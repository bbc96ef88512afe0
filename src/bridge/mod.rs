//! Message bridge between the UI side and the page context.
//!
//! # Protocol
//!
//! 1. The [`Requester`] sends `ping` to the page.
//! 2. If nothing is listening ([`ExtractorError::NoReceiver`]), it asks a [`PageInjector`]
//!    to install a [`Responder`], then waits a fixed settling delay.
//! 3. It sends `extractQueries`. The responder fetches and extracts on a separate task
//!    and answers through a one-shot reply channel.
//!
//! A `{success: false}` reply is an ordinary failure; a reply that never arrives is an
//! [`ExtractorError::Communication`] error. Nothing is retried apart from the injection.
//!
//! [`ExtractorError::NoReceiver`]: crate::error::ExtractorError::NoReceiver
//! [`ExtractorError::Communication`]: crate::error::ExtractorError::Communication

pub mod injector;
pub mod page;
pub mod protocol;
pub mod requester;
pub mod responder;

use std::sync::Arc;

pub use injector::{PageInjector, ResponderInjector};
pub use page::{Envelope, PageContext};
pub use protocol::{Request, Response};
pub use requester::Requester;
pub use responder::{Responder, ResponderState};

use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::models::ExtractionResult;
use crate::transport::{ConversationSource, SessionClient};

/// Extract the conversation open at `location`, wiring the default HTTP client,
/// injector and requester from `config`.
///
/// The page starts without a responder, so the first ping always goes through the
/// injection path.
///
/// Failures raised inside the responder (bad page URL, session or conversation fetch
/// errors) cross the bridge as `{success: false, error}` text, so they come back as
/// [`ExtractorError::ExtractionFailed`] carrying that message rather than their original
/// variant. Use [`SessionClient`] directly to branch on the typed error.
///
/// [`ExtractorError::ExtractionFailed`]: crate::error::ExtractorError::ExtractionFailed
pub async fn run_extraction(location: &str, config: &ExtractorConfig) -> Result<ExtractionResult> {
    let source: Arc<dyn ConversationSource> = Arc::new(SessionClient::new(config.clone())?);
    let injector = Arc::new(ResponderInjector::new(source, config.path_prefix.clone()));
    let requester = Requester::new(injector, config.settle_delay(), config.allowed_host.clone());

    let page = PageContext::new(location);
    requester.run_extraction(&page).await
}
