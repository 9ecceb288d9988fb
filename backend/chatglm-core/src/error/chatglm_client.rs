use crate::error::auth::AuthError;
use crate::error::config::ConfigError;

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ChatGlmClientError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Transport Init Error: {message} {location}")]
    TransportInit {
        message: String,
        location: ErrorLocation,
    },

    /// Network failure, timeout or non-2xx response.
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        status: Option<HttpStatusCode>,
        location: ErrorLocation,
    },

    #[error("Hook Error: {message} {location}")]
    Hook {
        message: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl ChatGlmClientError {
    /// HTTP status of a rejected call, when the server answered at all.
    pub fn status(&self) -> Option<HttpStatusCode> {
        match self {
            ChatGlmClientError::Transport { status, .. } => *status,
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ChatGlmClientError::Transport { .. })
    }
}

impl From<url::ParseError> for ChatGlmClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ChatGlmClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ChatGlmClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ChatGlmClientError::Transport {
            message: error.to_string(),
            status: error.status().map(|status| HttpStatusCode(status.as_u16())),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ChatGlmClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ChatGlmClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
