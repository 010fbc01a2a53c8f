//! Wire types for the chat-completion protocol.

use serde::{Deserialize, Serialize};

/// Outgoing chat-completion request body.
#[derive(Debug, Serialize)]
pub struct ChatRequestBody {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
}

/// One message in the conversation.
#[derive(Debug, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

/// Incoming chat-completion response envelope.
///
/// Only the fields we read are modeled; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct ChatEnvelope {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: EnvelopeMessage,
}

#[derive(Debug, Deserialize)]
pub struct EnvelopeMessage {
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_serializes() {
        let body = ChatRequestBody {
            model: "openai/gpt-5".to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "instructions".to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: "payload".to_string(),
                },
            ],
            temperature: 0.5,
        };
        let json: serde_json::Value = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "openai/gpt-5");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "payload");
    }

    #[test]
    fn test_envelope_deserializes() {
        let raw = r#"{"id": "gen-1", "choices": [{"index": 0, "message": {"role": "assistant", "content": "hello"}}]}"#;
        let envelope: ChatEnvelope = serde_json::from_str(raw).unwrap();
        assert_eq!(envelope.choices.len(), 1);
        assert_eq!(envelope.choices[0].message.content, "hello");
    }

    #[test]
    fn test_envelope_missing_choices_defaults_empty() {
        let envelope: ChatEnvelope = serde_json::from_str(r#"{"id": "gen-2"}"#).unwrap();
        assert!(envelope.choices.is_empty());
    }
}
