//! Request side of the invoke endpoints.

pub mod builder;

use serde::{Deserialize, Serialize};

/// Speaker of a prompt message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PromptRole {
    User,
    Assistant,
}

/// One turn of the conversation fed to the model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromptMessage {
    pub role: PromptRole,
    pub content: String,
}

impl PromptMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: PromptRole::Assistant,
            content: content.into(),
        }
    }
}

/// Shape of the returned content.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReturnType {
    /// A standard JSON string.
    JsonString,
    /// Raw text.
    Text,
}

/// Controls whether the service may consult external knowledge.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvokeRef {
    pub enable: bool,
    /// Search query; the prompt is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_query: Option<String>,
}

/// Body shared by the sync, async and SSE invoke endpoints.
///
/// The prompt is ordered oldest to newest; the service truncates from the
/// front once the model's input limit is exceeded. Unset optional fields are
/// left out of the JSON so the service applies its own defaults
/// (temperature 0.95, top_p 0.7).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InvokeRequest {
    pub prompt: Vec<PromptMessage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Caller-chosen unique id; the service generates one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// SSE only: incremental (`true`) or full (`false`) content per event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incremental: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<ReturnType>,

    #[serde(rename = "ref", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<InvokeRef>,
}

impl InvokeRequest {
    /// Request with only a prompt; everything else left to the service.
    pub fn new(prompt: Vec<PromptMessage>) -> Self {
        Self {
            prompt,
            ..Self::default()
        }
    }

    /// Single user turn.
    pub fn from_user(content: impl Into<String>) -> Self {
        Self::new(vec![PromptMessage::user(content)])
    }

    pub fn builder() -> builder::InvokeRequestBuilder {
        builder::InvokeRequestBuilder::default()
    }
}
