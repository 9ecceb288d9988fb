//! Shared building blocks for the ChatGLM client workspace.
//!
//! Everything here is dependency-light and free of HTTP concerns so that
//! both the wire models and the client core can lean on it:
//!
//! - [`ErrorLocation`]: file/line/column captured at every error site
//! - [`RedactedSecret`]: secret material that never reaches logs
//! - [`HttpStatusCode`]: status carried by transport errors

pub mod error;
pub mod http_status;
pub mod redacted_secret;

#[cfg(test)]
mod tests;

pub use error::error_location::ErrorLocation;
pub use error::secret_error::SecretError;
pub use http_status::HttpStatusCode;
pub use redacted_secret::RedactedSecret;
