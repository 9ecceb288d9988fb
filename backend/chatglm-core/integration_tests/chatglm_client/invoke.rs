use super::helpers::{TEST_API_KEY, client_for, sync_success_body};

use chatglm_core::{ChatGlmClient, ChatGlmClientError, ClientConfig};
use common::HttpStatusCode;
use models::model_name::CHATGLM_PRO;
use models::{InvokeRequest, TaskStatus};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::Request;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: End-to-end check of the sync call: path, signed header and body.
///
/// **WHY THIS MATTERS**: This is the primary operation. Method, path, the
/// `Authorization` header and the prompt encoding all have to line up for the
/// service to accept the call.
///
/// **BUG THIS CATCHES**: Would catch the authorization hook not being
/// registered, a path template typo, or prompt fields being renamed.
#[tokio::test]
async fn given_user_prompt_when_sync_invoke_then_posts_signed_prompt_and_decodes_reply() {
    // GIVEN: A mock expecting exactly the signed request
    let server = MockServer::start().await;
    let client = client_for(&server);

    Mock::given(method("POST"))
        .and(path("/api/paas/v3/model-api/chatglm_pro/invoke"))
        .and(header("Authorization", client.token().as_str()))
        .and(body_json(json!({
            "prompt": [{"role": "user", "content": "hello"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync_success_body("Hi there")))
        .expect(1)
        .mount(&server)
        .await;

    // WHEN: Invoking
    let response = client
        .sync_invoke(CHATGLM_PRO, &InvokeRequest::from_user("hello"))
        .await
        .expect("sync invoke should succeed");

    // THEN: Envelope and content decoded
    assert!(response.envelope.success);
    assert_eq!(response.envelope.code, 200);
    assert_eq!(response.first_content(), Some("Hi there"));
    assert_eq!(response.data.unwrap().usage.total_tokens, 3);
}

/// **VALUE**: Verifies an unsuccessful envelope is returned as data, not as an error.
///
/// **WHY THIS MATTERS**: The client does not interpret `success`/`code`;
/// callers decide what a business-level failure means.
#[tokio::test]
async fn given_envelope_failure_with_http_200_when_sync_invoke_then_returns_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/paas/v3/model-api/chatglm_std/invoke"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 1002, "msg": "Authorization Token非法", "success": false
        })))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .sync_invoke("chatglm_std", &InvokeRequest::from_user("hello"))
        .await
        .unwrap();

    assert!(!response.envelope.success);
    assert_eq!(response.envelope.code, 1002);
    assert!(response.data.is_none());
}

#[tokio::test]
async fn given_prompt_when_sse_invoke_then_posts_to_sse_path() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    Mock::given(method("POST"))
        .and(path("/api/paas/v3/model-api/chatglm_lite/sse-invoke"))
        .and(header("Authorization", client.token().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync_success_body("streamed")))
        .expect(1)
        .mount(&server)
        .await;

    let request = InvokeRequest::builder()
        .with_user("hello")
        .with_incremental(true)
        .build()
        .unwrap();
    let response = client.sse_invoke("chatglm_lite", &request).await.unwrap();

    assert_eq!(response.first_content(), Some("streamed"));
    assert_eq!(
        response.data.unwrap().task.task_status,
        Some(TaskStatus::Success)
    );
}

/// **VALUE**: Verifies non-2xx responses become transport errors carrying the status.
///
/// **BUG THIS CATCHES**: Would catch error bodies being decoded as if they were
/// successful responses.
#[tokio::test]
async fn given_http_401_when_sync_invoke_then_returns_transport_error_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token expired"))
        .expect(1)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .sync_invoke(CHATGLM_PRO, &InvokeRequest::from_user("hello"))
        .await;

    let err = result.expect_err("401 must fail");
    assert!(err.is_transport());
    assert_eq!(err.status(), Some(HttpStatusCode(401)));
    match err {
        ChatGlmClientError::Transport { message, .. } => {
            assert!(message.contains("HTTP 401"));
            assert!(message.contains("token expired"));
        }
        other => panic!("expected Transport, got {other:?}"),
    }
}

/// **VALUE**: Verifies a connection failure surfaces as a transport error with no response.
#[tokio::test]
async fn given_unreachable_server_when_sync_invoke_then_returns_transport_error() {
    // GIVEN: A port nothing listens on
    let config = ClientConfig::new(TEST_API_KEY)
        .with_base_url("http://127.0.0.1:1")
        .with_timeout(Duration::from_secs(5));
    let client = ChatGlmClient::new(&config).unwrap();

    // WHEN: Invoking
    let result = client
        .sync_invoke(CHATGLM_PRO, &InvokeRequest::from_user("hello"))
        .await;

    // THEN: Transport error, no status
    let err = result.expect_err("connection must fail");
    assert!(err.is_transport());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn given_non_json_body_when_sync_invoke_then_returns_json_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let result = client_for(&server)
        .sync_invoke(CHATGLM_PRO, &InvokeRequest::from_user("hello"))
        .await;

    assert!(matches!(result, Err(ChatGlmClientError::Json { .. })));
}

#[tokio::test]
async fn given_model_with_slash_when_sync_invoke_then_rejects_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = client_for(&server)
        .sync_invoke("chatglm_pro/../x", &InvokeRequest::from_user("hello"))
        .await;

    assert!(matches!(result, Err(ChatGlmClientError::UrlParse { .. })));
}

/// **VALUE**: Verifies caller hooks run after the built-in ones, on every request.
///
/// **WHY THIS MATTERS**: Callers extend the client with tracing or extra
/// headers; those hooks must see the already-signed request.
#[tokio::test]
async fn given_extra_hook_when_invoking_then_hook_sees_authorization_and_adds_header() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&calls);

    let client = client_for(&server).with_hook(move |request: &mut Request| -> Result<(), ChatGlmClientError> {
        assert!(request.headers().contains_key("authorization"));
        seen.fetch_add(1, Ordering::SeqCst);
        request
            .headers_mut()
            .insert("x-trace-id", "trace-123".parse().unwrap());
        Ok(())
    });

    Mock::given(method("POST"))
        .and(header("x-trace-id", "trace-123"))
        .and(header("Authorization", client.token().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync_success_body("ok")))
        .expect(2)
        .mount(&server)
        .await;

    let request = InvokeRequest::from_user("hello");
    client.sync_invoke(CHATGLM_PRO, &request).await.unwrap();
    client.sse_invoke(CHATGLM_PRO, &request).await.unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

/// **VALUE**: Verifies one client serves concurrent calls with the same token.
#[tokio::test]
async fn given_cloned_client_when_invoking_concurrently_then_all_calls_succeed() {
    let server = MockServer::start().await;
    let client = client_for(&server);
    Mock::given(method("POST"))
        .and(header("Authorization", client.token().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync_success_body("ok")))
        .expect(4)
        .mount(&server)
        .await;

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let client = client.clone();
            tokio::spawn(async move {
                client
                    .sync_invoke(CHATGLM_PRO, &InvokeRequest::from_user(format!("hello {i}")))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.first_content(), Some("ok"));
    }
}

/// **VALUE**: Verifies a base URL with a path prefix (e.g. a reverse proxy) keeps it.
#[tokio::test]
async fn given_base_url_with_prefix_when_invoking_then_prefix_is_preserved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/zhipu/api/paas/v3/model-api/chatglm_pro/invoke"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sync_success_body("ok")))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new(TEST_API_KEY)
        .with_base_url(format!("{}/zhipu/", server.uri()))
        .with_debug(true);
    let client = ChatGlmClient::new(&config).unwrap();

    let response = client
        .sync_invoke(CHATGLM_PRO, &InvokeRequest::from_user("hello"))
        .await
        .unwrap();

    assert_eq!(response.first_content(), Some("ok"));
}
