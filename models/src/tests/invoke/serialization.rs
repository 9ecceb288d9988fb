use crate::{InvokeRequest, PromptMessage, ReturnType};

use serde_json::json;

/// **VALUE**: Verifies the minimal request body the service sees.
///
/// **WHY THIS MATTERS**: Unset options must be omitted rather than sent as
/// `null`, otherwise the service may reject them instead of defaulting.
///
/// **BUG THIS CATCHES**: Would catch a missing `skip_serializing_if`.
#[test]
fn given_prompt_only_request_when_serialized_then_contains_prompt_only() {
    // GIVEN: A single user turn
    let request = InvokeRequest::from_user("hello");

    // WHEN: Serializing
    let value = serde_json::to_value(&request).unwrap();

    // THEN: Only the prompt key is present
    assert_eq!(
        value,
        json!({"prompt": [{"role": "user", "content": "hello"}]})
    );
}

/// **VALUE**: Verifies every wire field name used by the service.
///
/// **BUG THIS CATCHES**: Would catch a rename such as `reference` leaking out
/// instead of `ref`, or `return_type` losing its snake_case values.
#[test]
fn given_all_fields_set_when_serialized_then_uses_service_field_names() {
    let request = InvokeRequest::builder()
        .with_message(PromptMessage::assistant("earlier answer"))
        .with_user("follow up")
        .with_temperature(0.8)
        .with_top_p(0.6)
        .with_request_id("req-42")
        .with_incremental(false)
        .with_return_type(ReturnType::JsonString)
        .with_reference(false, None)
        .build()
        .unwrap();

    let value = serde_json::to_value(&request).unwrap();

    assert_eq!(
        value,
        json!({
            "prompt": [
                {"role": "assistant", "content": "earlier answer"},
                {"role": "user", "content": "follow up"}
            ],
            "temperature": 0.8,
            "top_p": 0.6,
            "request_id": "req-42",
            "incremental": false,
            "return_type": "json_string",
            "ref": {"enable": false}
        })
    );
}
