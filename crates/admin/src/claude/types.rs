//! Types for the Claude API.
//!
//! These types match the Anthropic Messages API format (text only, no
//! streaming).

use serde::{Deserialize, Serialize};

/// A message in a conversation with Claude.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender ("user" or "assistant").
    pub role: String,
    /// The content of the message.
    pub content: MessageContent,
}

impl Message {
    /// A plain-text user message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Text(text.into()),
        }
    }
}

/// Content of a message - either plain text or a list of content blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content.
    Text(String),
    /// Multiple content blocks.
    Blocks(Vec<ContentBlock>),
}

/// A content block within a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Text content.
    #[serde(rename = "text")]
    Text {
        /// The text content.
        text: String,
    },
    /// Any block type this client does not use (thinking, tool use, ...).
    #[serde(other)]
    Unsupported,
}

/// Request body for the Claude Messages API.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// Model to use.
    pub model: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Conversation messages.
    pub messages: Vec<Message>,
}

/// Response from the Claude Messages API.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// Unique response ID.
    pub id: String,
    /// Model that generated the response.
    pub model: String,
    /// Reason the response stopped.
    pub stop_reason: Option<StopReason>,
    /// Response content blocks.
    pub content: Vec<ContentBlock>,
    /// Token usage information.
    pub usage: Usage,
}

impl ChatResponse {
    /// All text blocks joined together, trimmed.
    #[must_use]
    pub fn text(&self) -> String {
        let joined: String = self
            .content
            .iter()
            .filter_map(|block| match block {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Unsupported => None,
            })
            .collect();
        joined.trim().to_string()
    }
}

/// Reason the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// Max tokens reached.
    MaxTokens,
    /// Stop sequence encountered.
    StopSequence,
    /// The model declined to answer.
    Refusal,
    /// A stop reason this client does not know about.
    #[serde(other)]
    Other,
}

/// Token usage information.
#[derive(Debug, Clone, Deserialize)]
pub struct Usage {
    /// Number of input tokens.
    pub input_tokens: u32,
    /// Number of output tokens.
    pub output_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = ChatRequest {
            model: "claude-test".to_string(),
            max_tokens: 512,
            messages: vec![Message::user("مرحبا")],
        };

        let json = serde_json::to_value(&request).expect("serialize");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "مرحبا");
        assert_eq!(json["max_tokens"], 512);
    }

    #[test]
    fn test_response_text_skips_other_blocks() {
        let json = r#"{
            "id": "msg_01",
            "type": "message",
            "role": "assistant",
            "model": "claude-test",
            "stop_reason": "end_turn",
            "content": [
                {"type": "thinking", "thinking": "..."},
                {"type": "text", "text": "  وصف "},
                {"type": "text", "text": "رائع\n"}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 5}
        }"#;

        let response: ChatResponse = serde_json::from_str(json).expect("deserialize");
        assert_eq!(response.stop_reason, Some(StopReason::EndTurn));
        assert_eq!(response.text(), "وصف رائع");
    }

    #[test]
    fn test_unknown_stop_reason() {
        let reason: StopReason = serde_json::from_str("\"pause_turn\"").expect("deserialize");
        assert_eq!(reason, StopReason::Other);
    }
}
