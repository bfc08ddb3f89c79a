use serde::Serialize;

/// Message role in conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A conversation message.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// A single decoded streaming chunk.
///
/// Both fields are genuinely optional on the wire: a chunk may carry the
/// server-declared model, an incremental text fragment, both, or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamChunk {
    /// Model identifier the server reports as actually serving the request.
    /// May differ from the requested identifier when the router falls back.
    pub model: Option<String>,
    /// Incremental answer text.
    pub delta: Option<String>,
}

impl StreamChunk {
    /// Text to display for this chunk.
    ///
    /// An empty-but-present delta yields nothing, same as an absent one.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.delta.as_deref().filter(|t| !t.is_empty())
    }
}
