// Unit tests for chatglm-core modules

mod auth;
