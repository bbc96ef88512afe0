use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::models::{Content, Node, Thought};

/// Deserialize the conversation `mapping` object into nodes, keeping key order.
///
/// Relies on serde_json's `preserve_order` so the resulting order matches the payload.
/// A node without an `id` takes its mapping key.
pub fn deserialize_mapping<'de, D>(deserializer: D) -> Result<Vec<Node>, D::Error>
where
    D: Deserializer<'de>,
{
    let mapping = Map::<String, Value>::deserialize(deserializer)?;
    let mut nodes = Vec::with_capacity(mapping.len());

    for (key, value) in mapping {
        let mut node: Node = serde_json::from_value(value)
            .map_err(|e| Error::custom(format!("invalid node {}: {}", key, e)))?;
        if node.id.is_empty() {
            node.id = key;
        }
        nodes.push(node);
    }

    Ok(nodes)
}

/// Treat an explicit JSON `null` the same as a missing field
pub fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Loose shape of a message `content` object before it is classified into [`Content`]
#[derive(Debug, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    content_type: Option<String>,
    #[serde(default)]
    parts: Option<Vec<Value>>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    thoughts: Vec<Thought>,
}

impl From<RawContent> for Content {
    fn from(raw: RawContent) -> Self {
        let content_type = raw.content_type.unwrap_or_default();

        if content_type == "thoughts" {
            return Content::Thoughts(raw.thoughts);
        }

        match raw.parts {
            Some(parts) => {
                let parts = parts
                    .into_iter()
                    .filter_map(|part| match part {
                        Value::String(text) => Some(text),
                        _ => None,
                    })
                    .collect();
                Content::Text { content_type, parts }
            }
            None => Content::Other(content_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Content, Conversation};

    #[test]
    fn test_mapping_keeps_payload_order() {
        let json = r#"{"mapping":{
            "zeta": {"id": "zeta"},
            "alpha": {"id": "alpha"},
            "mid": {"id": "mid"}
        }}"#;

        let conversation: Conversation = serde_json::from_str(json).unwrap();
        let ids: Vec<&str> = conversation.mapping.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_node_id_falls_back_to_key() {
        let json = r#"{"mapping":{"client-created-root":{"children":["a"]}}}"#;

        let conversation: Conversation = serde_json::from_str(json).unwrap();
        assert_eq!(conversation.mapping[0].id, "client-created-root");
        assert_eq!(conversation.mapping[0].children, vec!["a".to_string()]);
    }

    #[test]
    fn test_invalid_node_names_key_in_error() {
        let json = r#"{"mapping":{"bad-node":{"message":{"content":{"parts":["x"]}}}}}"#;

        let err = serde_json::from_str::<Conversation>(json).unwrap_err();
        assert!(err.to_string().contains("invalid node bad-node"));
    }

    #[test]
    fn test_content_with_parts_is_text() {
        let content: Content =
            serde_json::from_str(r#"{"content_type":"text","parts":["a","b"]}"#).unwrap();
        assert_eq!(
            content,
            Content::Text { content_type: "text".into(), parts: vec!["a".into(), "b".into()] }
        );
    }

    #[test]
    fn test_content_parts_without_type_is_text() {
        let content: Content = serde_json::from_str(r#"{"parts":["hi"]}"#).unwrap();
        assert_eq!(content, Content::Text { content_type: String::new(), parts: vec!["hi".into()] });
    }

    #[test]
    fn test_multimodal_parts_drop_non_strings() {
        let json = r#"{"content_type":"multimodal_text","parts":[
            {"content_type":"image_asset_pointer","asset_pointer":"file-service://x"},
            "What is this?"
        ]}"#;

        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(
            content,
            Content::Text {
                content_type: "multimodal_text".into(),
                parts: vec!["What is this?".into()]
            }
        );
    }

    #[test]
    fn test_thoughts_content() {
        let json = r#"{"content_type":"thoughts","thoughts":[{"summary":"s","content":"c"}]}"#;

        let content: Content = serde_json::from_str(json).unwrap();
        match content {
            Content::Thoughts(thoughts) => {
                assert_eq!(thoughts.len(), 1);
                assert_eq!(thoughts[0].content, "c");
            }
            other => panic!("expected thoughts, got {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_content_is_other() {
        let json = r#"{"content_type":"code","language":"python","text":"print(1)"}"#;

        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(content, Content::Other("code".into()));
        assert_eq!(content.content_type(), "code");
    }
}
