use crate::CHATGLM_API_BASE_URL;
use crate::error::config::ConfigError;

use common::{ErrorLocation, RedactedSecret};

use std::panic::Location;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// Everything needed to construct a [`crate::ChatGlmClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// `identifier.secret` API key.
    pub api_key: RedactedSecret,
    /// Log full request/response content through the debug hook.
    pub debug: bool,
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<RedactedSecret>) -> Self {
        Self {
            api_key: api_key.into(),
            debug: false,
            base_url: String::from(CHATGLM_API_BASE_URL),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validate transport values. The key itself is checked by
    /// [`crate::Credential::parse`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any value is invalid.
    #[track_caller]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: format!("Invalid base URL: {} (expected http or https)", self.base_url),
            });
        }

        if self.timeout.is_zero() {
            return Err(ConfigError::Validation {
                location: ErrorLocation::from(Location::caller()),
                reason: String::from("Timeout must be greater than zero"),
            });
        }

        Ok(())
    }
}
