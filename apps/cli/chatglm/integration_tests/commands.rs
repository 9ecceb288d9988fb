use chatglm_cli::cli::{Command, PromptArgs};
use chatglm_cli::commands::execute;
use chatglm_cli::error::CliError;
use chatglm_cli::settings::{EnvSettings, Overrides, Settings};

use chatglm_core::ChatGlmClientError;
use common::RedactedSecret;
use models::model_name::{CHATGLM_LITE, CHATGLM_PRO};

use serde_json::json;
use wiremock::matchers::{body_partial_json, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Integration tests for command execution against a mock model API
// ============================================================================

fn settings_for(server: &MockServer) -> Settings {
    let overrides = Overrides {
        base_url: Some(server.uri()),
        ..Overrides::default()
    };
    let env = EnvSettings {
        api_key: Some(RedactedSecret::new("abc.def")),
        base_url: None,
    };
    Settings::resolve(&overrides, &env, None).expect("Should resolve settings")
}

fn prompt(text: &str, model: Option<&str>) -> PromptArgs {
    PromptArgs {
        prompt: String::from(text),
        model: model.map(str::to_owned),
        temperature: None,
        top_p: None,
        request_id: Some(String::from("req-1")),
    }
}

/// **VALUE**: `invoke` posts a signed request to the default model and returns the
/// decoded response as JSON.
///
/// **WHY THIS MATTERS**: This is the whole CLI path: settings, client construction,
/// hooks, transport and rendering.
///
/// **BUG THIS CATCHES**: Would catch the default model not being applied or the
/// Authorization hook missing from the CLI-built client.
#[tokio::test]
async fn given_invoke_command_when_executed_then_returns_response_json() {
    // GIVEN: A mock sync endpoint for the default model
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/paas/v3/model-api/{CHATGLM_PRO}/invoke")))
        .and(header_exists("Authorization"))
        .and(body_partial_json(json!({
            "prompt": [{"role": "user", "content": "hello"}],
            "request_id": "req-1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "msg": "ok", "success": true,
            "data": {
                "request_id": "req-1",
                "task_id": "task-1",
                "task_status": "SUCCESS",
                "choices": [{"role": "assistant", "content": "hi there"}],
                "usage": {"prompt_tokens": 1, "completion_tokens": 2, "total_tokens": 3}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Executing invoke
    let output = execute(&Command::Invoke(prompt("hello", None)), &settings_for(&server))
        .await
        .expect("Invoke should succeed");

    // THEN: Response is rendered with its content
    assert_eq!(output["success"], true);
    assert_eq!(output["data"]["choices"][0]["content"], "hi there");
    assert_eq!(output["data"]["usage"]["total_tokens"], 3);
}

/// **VALUE**: `async-invoke` honors `--model` and returns the task id.
///
/// **BUG THIS CATCHES**: Would catch the per-command model being ignored.
#[tokio::test]
async fn given_async_invoke_with_model_when_executed_then_uses_that_model() {
    // GIVEN: A mock async endpoint for a non-default model
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!(
            "/api/paas/v3/model-api/{CHATGLM_LITE}/async-invoke"
        )))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "msg": "ok", "success": true,
            "data": {"request_id": "req-1", "task_id": "task-9", "task_status": "PROCESSING"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Executing async-invoke with --model
    let output = execute(
        &Command::AsyncInvoke(prompt("hello", Some(CHATGLM_LITE))),
        &settings_for(&server),
    )
    .await
    .expect("Async invoke should succeed");

    // THEN: Task id and status are present
    assert_eq!(output["data"]["task_id"], "task-9");
    assert_eq!(output["data"]["task_status"], "PROCESSING");
}

/// **VALUE**: `query` issues a GET on the task path.
///
/// **BUG THIS CATCHES**: Would catch the task id landing in the wrong path slot.
#[tokio::test]
async fn given_query_command_when_executed_then_returns_task_result() {
    // GIVEN: A finished task
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/paas/v3/model-api/-/async-invoke/task-9"))
        .and(header_exists("Authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "msg": "ok", "success": true,
            "data": {
                "request_id": "req-1",
                "task_id": "task-9",
                "task_status": "SUCCESS",
                "choices": [{"role": "assistant", "content": "done"}],
                "usage": {"prompt_tokens": 1, "completion_tokens": 1, "total_tokens": 2}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Querying
    let output = execute(
        &Command::Query {
            task_id: String::from("task-9"),
        },
        &settings_for(&server),
    )
    .await
    .expect("Query should succeed");

    // THEN: Final status and content
    assert_eq!(output["data"]["task_status"], "SUCCESS");
    assert_eq!(output["data"]["choices"][0]["content"], "done");
}

/// **VALUE**: `sse` posts to the SSE endpoint.
///
/// **BUG THIS CATCHES**: Would catch the SSE command hitting the sync path.
#[tokio::test]
async fn given_sse_command_when_executed_then_posts_to_sse_endpoint() {
    // GIVEN: A mock SSE endpoint
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/api/paas/v3/model-api/{CHATGLM_PRO}/sse-invoke")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "msg": "ok", "success": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Executing sse
    let output = execute(&Command::Sse(prompt("hello", None)), &settings_for(&server))
        .await
        .expect("SSE should succeed");

    // THEN: Envelope is rendered without data
    assert_eq!(output["code"], 200);
    assert!(output["data"].is_null());
}

/// **VALUE**: A non-2xx answer surfaces as a transport error carrying the status.
///
/// **WHY THIS MATTERS**: `main` prints this error; users need the HTTP status and
/// body to diagnose key or quota problems.
///
/// **BUG THIS CATCHES**: Would catch error bodies being decoded as success.
#[tokio::test]
async fn given_server_rejects_request_when_executed_then_returns_transport_error() {
    // GIVEN: The API rejects the token
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .mount(&server)
        .await;

    // WHEN: Executing invoke
    let result = execute(&Command::Invoke(prompt("hello", None)), &settings_for(&server)).await;

    // THEN: Transport error with status 401
    match result {
        Err(CliError::Client(err @ ChatGlmClientError::Transport { .. })) => {
            assert_eq!(err.status().map(|s| s.as_u16()), Some(401));
            assert!(err.to_string().contains("token expired"), "{err}");
        }
        other => panic!("Expected transport error, got {other:?}"),
    }
}
