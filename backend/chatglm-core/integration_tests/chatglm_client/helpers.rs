//! Shared fixtures for client integration tests.

use chatglm_core::{ChatGlmClient, ClientConfig};

use serde_json::{Value, json};
use wiremock::MockServer;

/// Test key: identifier `abc`, secret `def`.
pub const TEST_API_KEY: &str = "abc.def";

/// Client pointed at `server`.
pub fn client_for(server: &MockServer) -> ChatGlmClient {
    ChatGlmClient::new(&ClientConfig::new(TEST_API_KEY).with_base_url(server.uri()))
        .expect("Failed to build client")
}

pub fn sync_success_body(content: &str) -> Value {
    json!({
        "code": 200,
        "msg": "操作成功",
        "success": true,
        "data": {
            "request_id": "req-1",
            "task_id": "task-1",
            "task_status": "SUCCESS",
            "choices": [{"role": "assistant", "content": content}],
            "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
        }
    })
}
