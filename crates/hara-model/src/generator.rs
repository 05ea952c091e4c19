use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Message role in a chat exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One message of an ordered chat prompt.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

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
}

/// What the caller intends to do with the completion text.
///
/// `Json` is a hint for providers that support constrained output; the
/// returned text still goes through the extractor regardless.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpectedFormat {
    Text,
    Json,
}

/// Text-generation collaborator.
///
/// Implementations produce raw completion text for an ordered message
/// sequence. Failures are surfaced as [`ModelError`]; the caller decides
/// how to degrade.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        messages: &[ChatMessage],
        format: ExpectedFormat,
    ) -> Result<String, ModelError>;

    /// Identifier of the underlying model, for logs and reports.
    fn model_id(&self) -> &str;
}
