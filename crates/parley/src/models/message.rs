use super::link::LinkInfo;
use super::role::Role;
use chrono::Utc;
use serde_json::Value;

/// One role-tagged unit of conversation text, as exchanged with a backend.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Utterance {
    pub role: Role,
    pub content: String,
}

impl Utterance {
    pub fn user<S: Into<String>>(content: S) -> Self {
        Utterance {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant<S: Into<String>>(content: S) -> Self {
        Utterance {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// A fully normalized turn, ready for rendering. Created once per turn and
/// immutable afterwards; owned exclusively by the session history.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChatMessage {
    pub sender: Role,
    pub text: String,
    pub created: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggested_prompts: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_links: Vec<LinkInfo>,
    /// The backend payload exactly as received, kept for diagnostic display.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl ChatMessage {
    /// Create a new user message with the current timestamp
    pub fn user() -> Self {
        ChatMessage {
            sender: Role::User,
            text: String::new(),
            created: Utc::now().timestamp(),
            images: Vec::new(),
            suggested_prompts: Vec::new(),
            related_links: Vec::new(),
            raw: None,
        }
    }

    /// Create a new assistant message with the current timestamp
    pub fn assistant() -> Self {
        ChatMessage {
            sender: Role::Assistant,
            text: String::new(),
            created: Utc::now().timestamp(),
            images: Vec::new(),
            suggested_prompts: Vec::new(),
            related_links: Vec::new(),
            raw: None,
        }
    }

    pub fn with_text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    pub fn with_suggested_prompts(mut self, prompts: Vec<String>) -> Self {
        self.suggested_prompts = prompts;
        self
    }

    pub fn with_related_links(mut self, links: Vec<LinkInfo>) -> Self {
        self.related_links = links;
        self
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = Some(raw);
        self
    }

    /// The text-only view of this turn, for replaying history to a backend.
    pub fn as_utterance(&self) -> Utterance {
        Utterance {
            role: self.sender,
            content: self.text.clone(),
        }
    }
}
