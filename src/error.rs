//! Error taxonomy for the extraction pipeline.
//!
//! Every failure that can end an extraction request maps to one variant here.
//! The CLI and presenter only ever show [`ExtractorError::user_message`], so
//! callers don't need to match on variants unless they want to branch on the
//! failure kind (the bridge does, to decide whether to inject a responder).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    /// No conversation id could be resolved from the page location
    #[error("Invalid context: {0}")]
    InvalidContext(String),

    #[error("Session fetch failed! status {status}")]
    Session { status: u16 },

    #[error("No access token found. Please make sure you're logged into ChatGPT.")]
    Auth,

    #[error("Conversation fetch failed! status {status}")]
    Fetch { status: u16 },

    /// No responder is registered in the page context
    #[error("Could not establish connection. Receiving end does not exist.")]
    NoReceiver,

    /// The responder was presumed ready but the reply never arrived
    #[error("Communication error: {0}")]
    Communication(String),

    #[error("Failed to install responder: {0}")]
    Injection(String),

    /// The responder answered with `{success: false}`
    #[error("Error extracting queries: {0}")]
    ExtractionFailed(String),

    /// The conversation payload did not have the expected shape
    #[error("Malformed conversation: {0}")]
    Extraction(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ExtractorError {
    /// Single human-readable message for the error view.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidContext(reason) => reason.clone(),
            Self::NoReceiver => {
                "Extension not ready. Please refresh the ChatGPT page and try again.".to_string()
            }
            Self::Injection(_) => {
                "Failed to initialize extension. Please refresh the ChatGPT page and try again."
                    .to_string()
            }
            Self::Communication(reason) => format!("Error: {}", reason),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;
