//! Chat messages exchanged with the completion API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message in the API wire format (`{"role": "...", "content": "..."}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Rough token estimate: number of space-separated pieces.
    pub fn word_count(&self) -> usize {
        self.content.split(' ').count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_wire_format() {
        let json = serde_json::to_value(ChatMessage::user("Hello world")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"role": "user", "content": "Hello world"})
        );
    }

    #[test]
    fn deserializes_assistant() {
        let msg: ChatMessage =
            serde_json::from_str(r#"{"role": "assistant", "content": "Hi"}"#).unwrap();
        assert_eq!(msg, ChatMessage::assistant("Hi"));
    }

    #[test]
    fn word_count_splits_on_single_spaces() {
        assert_eq!(ChatMessage::user("one two  three").word_count(), 4);
        assert_eq!(ChatMessage::user("").word_count(), 1);
    }
}
