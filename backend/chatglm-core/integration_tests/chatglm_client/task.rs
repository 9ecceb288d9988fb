use super::helpers::client_for;

use models::model_name::CHATGLM_STD;
use models::{InvokeRequest, TaskStatus};

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies the async submit returns the server-issued task id.
#[tokio::test]
async fn given_prompt_when_async_invoke_then_returns_task_id() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    Mock::given(method("POST"))
        .and(path("/api/paas/v3/model-api/chatglm_std/async-invoke"))
        .and(header("Authorization", client.token().as_str()))
        .and(body_json(json!({
            "prompt": [{"role": "user", "content": "hello"}],
            "request_id": "req-9"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "msg": "操作成功", "success": true,
            "data": {"request_id": "req-9", "task_id": "75931252186628", "task_status": "PROCESSING"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = InvokeRequest::builder()
        .with_user("hello")
        .with_request_id("req-9")
        .build()
        .unwrap();
    let response = client.async_invoke(CHATGLM_STD, &request).await.unwrap();

    assert_eq!(response.task_id(), Some("75931252186628"));
    assert_eq!(
        response.data.unwrap().task_status,
        Some(TaskStatus::Processing)
    );
}

/// **VALUE**: Verifies the task query is a bodiless GET on the templated path.
///
/// **WHY THIS MATTERS**: The query endpoint is addressed by task id only; a
/// body or the wrong method is rejected by the service.
///
/// **BUG THIS CATCHES**: Would catch the task id being placed in the model
/// slot, or a JSON body (`null`) being attached to the GET.
#[tokio::test]
async fn given_task_id_when_querying_then_issues_bodiless_get_and_decodes_result() {
    // GIVEN: A completed task
    let server = MockServer::start().await;
    let client = client_for(&server);
    Mock::given(method("GET"))
        .and(path("/api/paas/v3/model-api/-/async-invoke/75931252186628"))
        .and(header("Authorization", client.token().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200, "msg": "操作成功", "success": true,
            "data": {
                "request_id": "req-9",
                "task_id": "75931252186628",
                "task_status": "SUCCESS",
                "choices": [{"role": "assistant", "content": "done"}],
                "usage": {"prompt_tokens": 2, "completion_tokens": 1, "total_tokens": 3}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Querying
    let response = client
        .async_invoke_task_query("75931252186628")
        .await
        .unwrap();

    // THEN: Result decoded
    assert_eq!(response.task_status(), Some(TaskStatus::Success));
    assert_eq!(response.first_content(), Some("done"));

    // AND: The request had no body
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method.as_str(), "GET");
    assert!(requests[0].body.is_empty());
    assert!(!requests[0].headers.contains_key("content-type"));
}

#[tokio::test]
async fn given_unknown_task_when_querying_then_returns_server_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_string("task not found"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .async_invoke_task_query("missing")
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|status| status.as_u16()), Some(404));
}
