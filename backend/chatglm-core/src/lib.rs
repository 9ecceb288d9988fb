pub mod auth;
pub mod chatglm_client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod hooks;

#[cfg(test)]
mod tests;

pub use auth::credential::Credential;
pub use auth::token::{SignedToken, TokenClaims, sign_token};
pub use chatglm_client::ChatGlmClient;
pub use config::ClientConfig;
pub use endpoint::Operation;
pub use error::auth::AuthError;
pub use error::chatglm_client::ChatGlmClientError;
pub use error::config::ConfigError;
pub use hooks::{HookChain, RequestHook};

pub const CHATGLM_API_BASE_URL: &str = "https://open.bigmodel.cn";
