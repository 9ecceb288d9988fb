use common::ErrorLocation;

use thiserror::Error as ThisError;

/// Failures while turning an API key into a signed token.
///
/// Messages never include the secret half of the key.
#[derive(Debug, ThisError)]
pub enum AuthError {
    #[error("Invalid Credential Format Error: {message} {location}")]
    InvalidCredentialFormat {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token Signing Error: {message} {location}")]
    TokenSigning {
        message: String,
        location: ErrorLocation,
    },

    #[error("Token Decode Error: {message} {location}")]
    TokenDecode {
        message: String,
        location: ErrorLocation,
    },
}
