//! Messages exchanged between the requester and the page-context responder.
//!
//! The JSON form matches what the browser extension sends over `runtime.sendMessage`:
//! requests are `{"action": "ping"}` / `{"action": "extractQueries"}`, responses are
//! objects with a `success` flag plus either the result fields or an `error` string.

use serde::{Deserialize, Serialize};

use crate::models::ExtractionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum Request {
    Ping,
    ExtractQueries,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ready: Option<bool>,
    #[serde(flatten)]
    pub result: Option<ExtractionResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn ready(ready: bool) -> Self {
        Self { success: true, ready: Some(ready), result: None, error: None }
    }

    pub fn extracted(result: ExtractionResult) -> Self {
        Self { success: true, ready: None, result: Some(result), error: None }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self { success: false, ready: None, result: None, error: Some(error.into()) }
    }
}
