use chatglm_core::{AuthError, ChatGlmClientError, ConfigError};
use common::{ErrorLocation, HttpStatusCode};

use std::error::Error;
use std::panic::Location;

/// **VALUE**: Verifies wrapped auth errors render transparently.
///
/// **WHY THIS MATTERS**: Callers print the client error; the underlying
/// credential problem must not be hidden behind a generic wrapper message.
#[test]
fn given_wrapped_auth_error_when_formatted_then_shows_inner_message() {
    let err: ChatGlmClientError = AuthError::TokenSigning {
        message: String::from("invalid HMAC key"),
        location: ErrorLocation::from(Location::caller()),
    }
    .into();

    let rendered = err.to_string();

    assert!(rendered.starts_with("Token Signing Error: invalid HMAC key"));
    assert!(err.status().is_none());
    assert!(!err.is_transport());
}

#[test]
fn given_wrapped_config_error_when_formatted_then_shows_reason() {
    let err: ChatGlmClientError = ConfigError::Validation {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("Timeout must be greater than zero"),
    }
    .into();

    assert!(err.to_string().contains("Config Validation Error: Timeout must be greater than zero"));
}

/// **VALUE**: Verifies transport errors expose their HTTP status.
#[test]
#[track_caller]
fn given_transport_error_with_status_when_inspected_then_reports_status_and_location() {
    let err = ChatGlmClientError::Transport {
        message: String::from("HTTP 503 - upstream busy"),
        status: Some(HttpStatusCode(503)),
        location: ErrorLocation::from(Location::caller()),
    };

    assert!(err.is_transport());
    assert_eq!(err.status(), Some(HttpStatusCode(503)));
    assert!(err.status().unwrap().is_server_error());
    let rendered = err.to_string();
    assert!(rendered.starts_with("Transport Error: HTTP 503"));
    assert!(rendered.contains("chatglm_client.rs"));
}

/// **VALUE**: Verifies JSON failures convert with the caller's location.
#[test]
fn given_serde_error_when_converted_then_becomes_json_variant() {
    let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();

    let err = ChatGlmClientError::from(serde_err);

    match &err {
        ChatGlmClientError::Json { message, location } => {
            assert!(!message.is_empty());
            assert_eq!(location.file_name(), "chatglm_client.rs");
        }
        other => panic!("expected Json, got {other:?}"),
    }
    assert!(err.source().is_none());
}

#[test]
fn given_url_parse_error_when_converted_then_becomes_url_parse_variant() {
    let parse_err = url::Url::parse("not a url").unwrap_err();

    let err = ChatGlmClientError::from(parse_err);

    assert!(matches!(err, ChatGlmClientError::UrlParse { .. }));
    assert!(err.to_string().starts_with("URL Parse Error:"));
}
