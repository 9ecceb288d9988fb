use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Rejected model values, raised before anything is sent over the wire.
#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}
