mod auth;
mod chatglm_client;
