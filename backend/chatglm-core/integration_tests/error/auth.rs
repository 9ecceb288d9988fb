use chatglm_core::{AuthError, Credential};
use common::ErrorLocation;

use std::panic::Location;

/// **VALUE**: Verifies auth errors render their kind, message and location.
///
/// **WHY THIS MATTERS**: A rejected key is usually a copy/paste mistake in a
/// config file. The message and the source position are what the user sees.
///
/// **BUG THIS CATCHES**: Would catch the `location` field being dropped from
/// the Display format.
#[test]
#[track_caller]
fn given_invalid_credential_error_when_formatted_then_includes_location() {
    // GIVEN: An error built here
    let err = AuthError::InvalidCredentialFormat {
        message: String::from("expected `<id>.<secret>`, found 1 segment(s)"),
        location: ErrorLocation::from(Location::caller()),
    };

    // WHEN: Formatting
    let rendered = err.to_string();

    // THEN: Kind, message, and this file
    assert!(rendered.starts_with("Invalid Credential Format Error:"));
    assert!(rendered.contains("found 1 segment(s)"));
    assert!(rendered.contains("auth.rs"));
}

/// **VALUE**: Verifies errors raised inside `Credential::parse` point at the caller.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being removed from
/// `parse`, which makes every credential error report the library line.
#[test]
fn given_malformed_key_when_parsing_then_location_points_at_call_site() {
    let err = Credential::parse("malformed").unwrap_err();

    match err {
        AuthError::InvalidCredentialFormat { location, .. } => {
            assert_eq!(location.file_name(), "auth.rs");
        }
        other => panic!("expected InvalidCredentialFormat, got {other:?}"),
    }
}

#[test]
fn given_signing_and_decode_errors_when_formatted_then_use_distinct_prefixes() {
    let signing = AuthError::TokenSigning {
        message: String::from("signing secret for key `abc` is empty"),
        location: ErrorLocation::from(Location::caller()),
    };
    let decode = AuthError::TokenDecode {
        message: String::from("signature does not match"),
        location: ErrorLocation::from(Location::caller()),
    };

    assert!(signing.to_string().starts_with("Token Signing Error:"));
    assert!(decode.to_string().starts_with("Token Decode Error:"));
}
