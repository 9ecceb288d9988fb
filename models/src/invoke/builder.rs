use crate::error::model_error::ModelError;
use crate::invoke::{InvokeRef, InvokeRequest, PromptMessage, ReturnType};
use crate::ErrorLocation;

use std::panic::Location;

use uuid::Uuid;

/// Builder for validated [`InvokeRequest`] values.
///
/// Ranges follow the service documentation: `temperature` in `(0.0, 1.0]`,
/// `top_p` in `(0.0, 1.0)`.
#[derive(Debug, Default)]
pub struct InvokeRequestBuilder {
    prompt: Vec<PromptMessage>,
    temperature: Option<f64>,
    top_p: Option<f64>,
    request_id: Option<String>,
    incremental: Option<bool>,
    return_type: Option<ReturnType>,
    reference: Option<InvokeRef>,
}

impl InvokeRequestBuilder {
    pub fn with_message(mut self, message: PromptMessage) -> Self {
        self.prompt.push(message);
        self
    }

    pub fn with_user(self, content: impl Into<String>) -> Self {
        self.with_message(PromptMessage::user(content))
    }

    pub fn with_assistant(self, content: impl Into<String>) -> Self {
        self.with_message(PromptMessage::assistant(content))
    }

    pub fn with_prompt(mut self, prompt: impl IntoIterator<Item = PromptMessage>) -> Self {
        self.prompt.extend(prompt);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_top_p(mut self, top_p: f64) -> Self {
        self.top_p = Some(top_p);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Fills `request_id` with a fresh UUID v4.
    pub fn with_generated_request_id(mut self) -> Self {
        self.request_id = Some(Uuid::new_v4().to_string());
        self
    }

    pub fn with_incremental(mut self, incremental: bool) -> Self {
        self.incremental = Some(incremental);
        self
    }

    pub fn with_return_type(mut self, return_type: ReturnType) -> Self {
        self.return_type = Some(return_type);
        self
    }

    pub fn with_reference(mut self, enable: bool, search_query: Option<String>) -> Self {
        self.reference = Some(InvokeRef {
            enable,
            search_query,
        });
        self
    }

    /// Build the request with validation.
    #[track_caller]
    pub fn build(self) -> Result<InvokeRequest, ModelError> {
        if self.prompt.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("Prompt must contain at least one message"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(temperature) = self.temperature
            && !(temperature > 0.0 && temperature <= 1.0)
        {
            return Err(ModelError::Validation {
                message: format!("Temperature must be in (0.0, 1.0], got {temperature}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(top_p) = self.top_p
            && !(top_p > 0.0 && top_p < 1.0)
        {
            return Err(ModelError::Validation {
                message: format!("Top-p must be in (0.0, 1.0), got {top_p}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Some(request_id) = &self.request_id
            && request_id.trim().is_empty()
        {
            return Err(ModelError::Validation {
                message: String::from("Request ID cannot be blank"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(InvokeRequest {
            prompt: self.prompt,
            temperature: self.temperature,
            top_p: self.top_p,
            request_id: self.request_id,
            incremental: self.incremental,
            return_type: self.return_type,
            reference: self.reference,
        })
    }
}
