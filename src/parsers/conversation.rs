use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::{ExtractorError, Result};
use crate::models::Conversation;
use crate::utils::validate_file_size;

/// Parse a conversation payload from its JSON text
pub fn parse_conversation(json: &str) -> Result<Conversation> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| ExtractorError::Extraction(format!("response is not valid JSON: {}", e)))?;
    conversation_from_value(value)
}

/// Validate an already-decoded JSON body and turn it into a typed [`Conversation`].
///
/// Shape problems (missing `mapping`, a message without an author, wrong field types)
/// are reported as [`ExtractorError::Extraction`] instead of surfacing later as gaps.
pub fn conversation_from_value(value: Value) -> Result<Conversation> {
    if !value.is_object() {
        return Err(ExtractorError::Extraction(format!(
            "expected a conversation object, got {}",
            json_kind(&value)
        )));
    }

    let conversation: Conversation =
        serde_json::from_value(value).map_err(|e| ExtractorError::Extraction(e.to_string()))?;

    debug!(
        nodes = conversation.mapping.len(),
        title = conversation.title.as_deref().unwrap_or(""),
        "Parsed conversation"
    );

    Ok(conversation)
}

/// Parse a conversation saved to disk (e.g. a copy of the backend response)
pub fn parse_conversation_file(path: &Path) -> Result<Conversation> {
    let mut file = File::open(path)?;
    validate_file_size(&file, path)?;

    let mut json = String::new();
    file.read_to_string(&mut json)?;

    parse_conversation(&json)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
