use crate::{InvokeRequest, InvokeRequestBuilder, ModelError, PromptRole, ReturnType};

/// **VALUE**: Verifies that a request without any prompt message is rejected.
///
/// **WHY THIS MATTERS**: The service answers an empty prompt with an envelope
/// error after a full network round trip. Failing locally is cheaper and the
/// message is clearer.
///
/// **BUG THIS CATCHES**: Would catch the emptiness check being dropped.
#[test]
fn given_empty_prompt_when_building_then_returns_validation_error() {
    // GIVEN: Builder without messages
    let builder = InvokeRequestBuilder::default().with_temperature(0.5);

    // WHEN: Building
    let result = builder.build();

    // THEN: Validation error
    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Prompt must contain at least one message");
        }
    }
}

/// **VALUE**: Verifies the temperature bounds `(0.0, 1.0]`.
///
/// **BUG THIS CATCHES**: Would catch an inclusive lower bound (0.0 is rejected
/// by the service) or an exclusive upper bound (1.0 is allowed).
#[test]
fn given_temperature_bounds_when_building_then_only_half_open_interval_passes() {
    for rejected in [0.0, -0.1, 1.01, f64::NAN] {
        let result = InvokeRequest::builder()
            .with_user("hi")
            .with_temperature(rejected)
            .build();
        assert!(result.is_err(), "temperature {rejected} should be rejected");
    }

    for accepted in [0.01, 0.95, 1.0] {
        let result = InvokeRequest::builder()
            .with_user("hi")
            .with_temperature(accepted)
            .build();
        assert!(result.is_ok(), "temperature {accepted} should be accepted");
    }
}

/// **VALUE**: Verifies the top-p bounds `(0.0, 1.0)`, open on both ends.
#[test]
fn given_top_p_bounds_when_building_then_only_open_interval_passes() {
    for rejected in [0.0, 1.0, 1.5] {
        let result = InvokeRequest::builder()
            .with_user("hi")
            .with_top_p(rejected)
            .build();
        match result.unwrap_err() {
            ModelError::Validation { message, .. } => {
                assert!(message.starts_with("Top-p must be in (0.0, 1.0)"));
            }
        }
    }

    let ok = InvokeRequest::builder()
        .with_user("hi")
        .with_top_p(0.7)
        .build()
        .unwrap();
    assert_eq!(ok.top_p, Some(0.7));
}

#[test]
fn given_blank_request_id_when_building_then_returns_validation_error() {
    let result = InvokeRequest::builder()
        .with_user("hi")
        .with_request_id("   ")
        .build();

    match result.unwrap_err() {
        ModelError::Validation { message, .. } => {
            assert_eq!(message, "Request ID cannot be blank");
        }
    }
}

/// **VALUE**: Verifies generated request ids are unique per build.
///
/// **WHY THIS MATTERS**: The service deduplicates on `request_id`; two calls
/// sharing one would collide.
#[test]
fn given_generated_request_ids_when_building_twice_then_ids_differ() {
    let first = InvokeRequest::builder()
        .with_user("hi")
        .with_generated_request_id()
        .build()
        .unwrap();
    let second = InvokeRequest::builder()
        .with_user("hi")
        .with_generated_request_id()
        .build()
        .unwrap();

    let first_id = first.request_id.unwrap();
    let second_id = second.request_id.unwrap();
    assert_eq!(first_id.len(), 36);
    assert_ne!(first_id, second_id);
}

/// **VALUE**: Verifies message order and every optional field survive the builder.
#[test]
fn given_full_builder_when_building_then_preserves_order_and_fields() {
    let request = InvokeRequest::builder()
        .with_user("What is Rust?")
        .with_assistant("A systems language.")
        .with_user("Who maintains it?")
        .with_temperature(0.9)
        .with_top_p(0.5)
        .with_request_id("req-1")
        .with_incremental(true)
        .with_return_type(ReturnType::Text)
        .with_reference(true, Some(String::from("rust foundation")))
        .build()
        .unwrap();

    let roles: Vec<PromptRole> = request.prompt.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![PromptRole::User, PromptRole::Assistant, PromptRole::User]
    );
    assert_eq!(request.prompt[2].content, "Who maintains it?");
    assert_eq!(request.temperature, Some(0.9));
    assert_eq!(request.request_id.as_deref(), Some("req-1"));
    assert_eq!(request.incremental, Some(true));
    assert_eq!(request.return_type, Some(ReturnType::Text));
    let reference = request.reference.unwrap();
    assert!(reference.enable);
    assert_eq!(reference.search_query.as_deref(), Some("rust foundation"));
}
