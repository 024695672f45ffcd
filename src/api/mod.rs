use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Content substituted when the reply is JSON but lacks the expected keys.
pub const FALLBACK_REPLY: &str = "Error: Could not parse API response.";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}

impl ChatRequest {
    /// Builds a non-streaming request body.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            stream: false,
        }
    }
}

/// The reply was JSON, but a value along `choices[0].message.content` had a
/// type that cannot hold a reply (or `choices` was empty).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyShapeError(String);

impl fmt::Display for ReplyShapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ReplyShapeError {}

/// Pulls `choices[0].message.content` out of a reply body.
///
/// Absent keys at any level yield [`FALLBACK_REPLY`]. Present values of the
/// wrong type, and an empty `choices` array, are shape errors.
pub fn extract_reply_content(body: &Value) -> Result<String, ReplyShapeError> {
    let object = body
        .as_object()
        .ok_or_else(|| ReplyShapeError(format!("reply is not a JSON object: {body}")))?;

    let Some(choices) = object.get("choices") else {
        return Ok(FALLBACK_REPLY.to_string());
    };
    let choices = choices
        .as_array()
        .ok_or_else(|| ReplyShapeError("`choices` is not an array".to_string()))?;
    let first = choices
        .first()
        .ok_or_else(|| ReplyShapeError("`choices` is empty".to_string()))?;
    let first = first
        .as_object()
        .ok_or_else(|| ReplyShapeError("`choices[0]` is not an object".to_string()))?;

    let Some(message) = first.get("message") else {
        return Ok(FALLBACK_REPLY.to_string());
    };
    let message = message
        .as_object()
        .ok_or_else(|| ReplyShapeError("`choices[0].message` is not an object".to_string()))?;

    match message.get("content") {
        None | Some(Value::Null) => Ok(FALLBACK_REPLY.to_string()),
        Some(Value::String(content)) => Ok(content.clone()),
        Some(other) => Err(ReplyShapeError(format!(
            "`choices[0].message.content` is not a string: {other}"
        ))),
    }
}

/// Pulls a one-line summary out of a JSON error body, if it has one.
pub fn extract_error_summary(value: &Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value
                .get("error")
                .and_then(|v| v.as_str().map(str::to_owned))
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_serializes_with_stream_disabled() {
        let request = ChatRequest::new(
            "llama3",
            vec![ChatMessage {
                role: "user".into(),
                content: "hello".into(),
            }],
        );
        let value = serde_json::to_value(&request).expect("serialize");
        assert_eq!(
            value,
            json!({
                "model": "llama3",
                "messages": [{"role": "user", "content": "hello"}],
                "stream": false
            })
        );
    }

    #[test]
    fn extracts_first_choice_content() {
        let body = json!({"choices":[{"message":{"content":"hi"}}, {"message":{"content":"no"}}]});
        assert_eq!(extract_reply_content(&body).unwrap(), "hi");
    }

    #[test]
    fn missing_keys_fall_back() {
        for body in [
            json!({}),
            json!({"choices":[{}]}),
            json!({"choices":[{"message":{}}]}),
            json!({"choices":[{"message":{"content":null}}]}),
        ] {
            assert_eq!(extract_reply_content(&body).unwrap(), FALLBACK_REPLY, "{body}");
        }
    }

    #[test]
    fn wrong_types_are_shape_errors() {
        for body in [
            json!([]),
            json!({"choices":[]}),
            json!({"choices":"nope"}),
            json!({"choices":[42]}),
            json!({"choices":[{"message":"text"}]}),
            json!({"choices":[{"message":{"content":7}}]}),
        ] {
            assert!(extract_reply_content(&body).is_err(), "{body}");
        }
    }

    #[test]
    fn error_summary_prefers_nested_message() {
        let body = json!({"error":{"message":"model   overloaded"}, "message":"other"});
        assert_eq!(
            extract_error_summary(&body).as_deref(),
            Some("model overloaded")
        );
        assert_eq!(
            extract_error_summary(&json!({"error":"bad key"})).as_deref(),
            Some("bad key")
        );
        assert_eq!(extract_error_summary(&json!({"status":"failed"})), None);
    }
}
