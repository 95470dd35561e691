use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::registry::DEFAULT_MODEL;

/// Author of a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn in a conversation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub content: String,
    pub role: Role,
    pub timestamp: DateTime<Utc>,
    /// Model id that produced (or was selected when sending) this message
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub model: Option<String>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>, model: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            content: content.into(),
            role,
            timestamp: Utc::now(),
            model,
        }
    }

    pub fn user(content: impl Into<String>, model: Option<String>) -> Self {
        Self::new(Role::User, content, model)
    }

    pub fn assistant(content: impl Into<String>, model: Option<String>) -> Self {
        Self::new(Role::Assistant, content, model)
    }
}

/// An ordered, titled thread of messages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversation {
    pub id: Uuid,
    pub title: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: "New Chat".to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Bump `updated_at`
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Append a message and bump `updated_at`
    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
        self.touch();
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Session-lifetime aggregate owned by the state manager
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatState {
    /// Most recently created first
    pub conversations: Vec<Conversation>,
    pub current_conversation_id: Option<Uuid>,
    pub selected_model: String,
    /// True exactly while a completion request is outstanding
    pub is_typing: bool,
    pub error: Option<String>,
}

impl ChatState {
    pub fn new() -> Self {
        Self {
            conversations: Vec::new(),
            current_conversation_id: None,
            selected_model: DEFAULT_MODEL.to_string(),
            is_typing: false,
            error: None,
        }
    }
}

impl Default for ChatState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&Role::Assistant).unwrap(),
            "\"assistant\""
        );
    }

    #[test]
    fn message_omits_missing_model() {
        let message = Message::user("hello", None);
        let json = serde_json::to_value(&message).unwrap();
        assert!(json.get("model").is_none());

        let message = Message::assistant("hi", Some("deepseek/deepseek-chat:free".to_string()));
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["model"], "deepseek/deepseek-chat:free");
    }

    #[test]
    fn conversation_round_trips_with_camel_case_timestamps() {
        let mut conversation = Conversation::new();
        conversation.push_message(Message::user("hello", None));

        let json = serde_json::to_value(&conversation).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());

        let back: Conversation = serde_json::from_value(json).unwrap();
        assert_eq!(back.id, conversation.id);
        assert_eq!(back.messages.len(), 1);
        assert_eq!(back.created_at, conversation.created_at);
    }

    #[test]
    fn push_message_bumps_updated_at() {
        let mut conversation = Conversation::new();
        let created = conversation.created_at;
        conversation.push_message(Message::user("hello", None));
        assert!(conversation.updated_at >= created);
    }

    #[test]
    fn new_state_defaults() {
        let state = ChatState::new();
        assert!(state.conversations.is_empty());
        assert_eq!(state.current_conversation_id, None);
        assert_eq!(state.selected_model, DEFAULT_MODEL);
        assert!(!state.is_typing);
        assert!(state.error.is_none());
    }
}
