pub mod auth;
pub mod chatglm_client;
pub mod config;
