use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Misuse of a [`crate::RedactedSecret`].
#[derive(Debug, ThisError)]
pub enum SecretError {
    /// A secret was handed to a serializer instead of being exposed explicitly
    #[error("Secret Exposure Error: {message} {location}")]
    SerializationRefused {
        message: String,
        location: ErrorLocation,
    },
}
