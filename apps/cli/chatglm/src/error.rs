use chatglm_core::ChatGlmClientError;
use common::ErrorLocation;
use models::ModelError;

use std::io::Write;
use std::process::ExitCode;

use thiserror::Error;

/// Errors surfaced by the `chatglm` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings could not be read or are incomplete
    #[error("Settings Error: {message} {location}")]
    Settings {
        message: String,
        location: ErrorLocation,
    },

    /// Logger could not be installed
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// Result could not be rendered
    #[error("Output Error: {message} {location}")]
    Output {
        message: String,
        location: ErrorLocation,
    },

    /// Invalid request parameters
    #[error(transparent)]
    Model(#[from] ModelError),

    /// Error from chatglm-core (credential, signing, transport)
    #[error(transparent)]
    Client(#[from] ChatGlmClientError),
}

impl CliError {
    /// Write the error to `out` once and return the failure exit code.
    ///
    /// Not routed through `log`: settings errors happen before the logger is
    /// installed, and logging as well would print the error twice.
    pub fn report(&self, out: &mut impl Write) -> ExitCode {
        // Nothing useful to do if stderr itself is gone
        let _ = writeln!(out, "{self}");
        ExitCode::FAILURE
    }
}
