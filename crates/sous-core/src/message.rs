//! Conversation message types.
//!
//! A [`ChatMessage`] carries ordered content parts. Text parts hold the
//! spoken/transcribed utterance; image parts hold inline-encoded video frames
//! injected at turn completion. Part order is semantically meaningful: it is
//! exactly what the model sees.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One ordered part of a message's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
    Image { data_url: String },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text { text: text.into() }
    }

    pub fn image(data_url: impl Into<String>) -> Self {
        ContentPart::Image {
            data_url: data_url.into(),
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, ContentPart::Image { .. })
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ContentPart::Text { .. })
    }
}

/// A single conversational turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: Role,
    pub content: Vec<ContentPart>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: Vec<ContentPart>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content,
            created_at: Utc::now(),
        }
    }

    /// A plain-text user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, vec![ContentPart::text(text)])
    }

    /// A plain-text assistant turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, vec![ContentPart::text(text)])
    }

    /// All text parts joined with a space, images skipped.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                ContentPart::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn has_images(&self) -> bool {
        self.content.iter().any(ContentPart::is_image)
    }

    pub fn image_count(&self) -> usize {
        self.content.iter().filter(|p| p.is_image()).count()
    }

    /// Remove all image parts in place, leaving text parts intact.
    /// No-op for a message without images.
    pub fn strip_images(&mut self) {
        self.content.retain(ContentPart::is_text);
    }

    /// Insert an image part before the trailing text part, so a run of
    /// injected frames reads oldest-to-newest ahead of the utterance.
    /// A message with no text part simply gets the image appended.
    pub fn push_image_before_text(&mut self, part: ContentPart) {
        let insert_at = self
            .content
            .iter()
            .rposition(ContentPart::is_text)
            .unwrap_or(self.content.len());
        self.content.insert(insert_at, part);
    }
}
