mod chatglm_client;
mod error;
