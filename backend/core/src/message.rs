use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of the fixed system message that seeds every conversation.
pub const SEED_MESSAGE_ID: &str = "-1";

/// Default instructions given to the recipe assistant.
pub const DEFAULT_SEED_PROMPT: &str = "You are a recipe assistant. You create recipes with the ingredients that the user provides. You assume the user has access to salt, pepper, water, and other standard kitchen supplies. You also assume the user has standard kitchen utensils.";

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single exchange unit in the recipe conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl ChatMessage {
    /// The immutable system message every conversation starts with.
    pub fn seed(prompt: impl Into<String>) -> Self {
        Self {
            id: SEED_MESSAGE_ID.to_string(),
            role: Role::System,
            content: prompt.into(),
            created_at: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Some(Utc::now()),
        }
    }
}

/// Body of `POST /api/chat`: the full message history, seed first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Text of the most recent user message.
    pub fn last_user_content(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
    }
}
