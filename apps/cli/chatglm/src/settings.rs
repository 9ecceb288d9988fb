//! Settings resolution for the binary.
//!
//! Precedence, highest first: command-line flags, environment (including a
//! `.env` file loaded at startup), the TOML settings file, built-in defaults.

use crate::error::CliError;

use chatglm_core::ClientConfig;
use common::{ErrorLocation, RedactedSecret};
use models::model_name::CHATGLM_PRO;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub const API_KEY_ENV: &str = "CHATGLM_API_KEY";
pub const BASE_URL_ENV: &str = "CHATGLM_BASE_URL";

const CONFIG_DIR_NAME: &str = "chatglm";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Contents of the optional TOML settings file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub api_key: Option<RedactedSecret>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub debug: Option<bool>,
    pub model: Option<String>,
}

impl FileSettings {
    /// Read and parse a settings file.
    #[track_caller]
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CliError::Settings {
            message: format!("Failed to read {}: {e}", path.display()),
            location: ErrorLocation::from(Location::caller()),
        })?;

        toml::from_str(&contents).map_err(|e| CliError::Settings {
            message: format!("Failed to parse {}: {e}", path.display()),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Load `explicit` if given (it must exist), otherwise the default
    /// location if a file is present there.
    pub fn load_for(explicit: Option<&Path>) -> Result<Option<(PathBuf, Self)>, CliError> {
        if let Some(path) = explicit {
            return Ok(Some((path.to_path_buf(), Self::load(path)?)));
        }

        match default_config_path() {
            Some(path) if path.exists() => {
                let settings = Self::load(&path)?;
                Ok(Some((path, settings)))
            }
            _ => Ok(None),
        }
    }
}

/// `<config_dir>/chatglm/config.toml`, when the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Values taken from the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSettings {
    pub api_key: Option<RedactedSecret>,
    pub base_url: Option<String>,
}

impl EnvSettings {
    pub fn from_process_env() -> Self {
        Self {
            api_key: non_empty_env(API_KEY_ENV).map(RedactedSecret::new),
            base_url: non_empty_env(BASE_URL_ENV),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
}

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub debug: bool,
    pub model: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client: ClientConfig,
    /// Model used when a command does not name one.
    pub model: String,
    /// Settings file that contributed, if any.
    pub source: Option<PathBuf>,
}

impl Settings {
    /// Merge the layers and validate the result.
    #[track_caller]
    pub fn resolve(
        overrides: &Overrides,
        env: &EnvSettings,
        file: Option<(&Path, &FileSettings)>,
    ) -> Result<Self, CliError> {
        let file_settings = file.map(|(_, settings)| settings);

        let api_key = env
            .api_key
            .clone()
            .or_else(|| file_settings.and_then(|f| f.api_key.clone()))
            .ok_or_else(|| CliError::Settings {
                message: format!(
                    "No API key: set {API_KEY_ENV} or add `api_key` to {}",
                    file.map(|(path, _)| path.to_path_buf())
                        .or_else(default_config_path)
                        .map(|path| path.display().to_string())
                        .unwrap_or_else(|| String::from(CONFIG_FILE_NAME))
                ),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut client = ClientConfig::new(api_key).with_debug(
            overrides.debug || file_settings.and_then(|f| f.debug).unwrap_or(false),
        );

        if let Some(base_url) = overrides
            .base_url
            .clone()
            .or_else(|| env.base_url.clone())
            .or_else(|| file_settings.and_then(|f| f.base_url.clone()))
        {
            client = client.with_base_url(base_url);
        }

        if let Some(timeout_secs) = file_settings.and_then(|f| f.timeout_secs) {
            client = client.with_timeout(Duration::from_secs(timeout_secs));
        }

        client
            .validate()
            .map_err(|e| CliError::Settings {
                message: e.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let model = overrides
            .model
            .clone()
            .or_else(|| file_settings.and_then(|f| f.model.clone()))
            .unwrap_or_else(|| String::from(CHATGLM_PRO));

        Ok(Self {
            client,
            model,
            source: file.map(|(path, _)| path.to_path_buf()),
        })
    }
}
