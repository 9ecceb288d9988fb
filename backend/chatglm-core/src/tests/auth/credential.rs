// Unit tests for credential parsing
// Tests the `identifier.secret` shape check that runs before any network use

use crate::auth::credential::Credential;
use crate::error::auth::AuthError;

/// **VALUE**: Verifies every malformed key shape is rejected as a format error.
///
/// **WHY THIS MATTERS**: A key without a separator, or with several, cannot be
/// split into identifier and secret. Signing garbage would only fail later with
/// a 401 from the service, far from the actual mistake.
///
/// **BUG THIS CATCHES**: Would catch a switch to `split_once`, which silently
/// accepts `a.b.c` by folding the extra segment into the secret.
#[test]
fn given_wrong_separator_count_when_parsing_then_returns_invalid_format() {
    for raw in ["", "no-separator", "a.b.c", "a..b", "...", "id.secret.extra"] {
        // WHEN: Parsing a malformed key
        let result = Credential::parse(raw);

        // THEN: Format error
        match result {
            Err(AuthError::InvalidCredentialFormat { message, .. }) => {
                assert!(message.contains("segment"), "unexpected message for {raw:?}: {message}");
            }
            other => panic!("expected InvalidCredentialFormat for {raw:?}, got {other:?}"),
        }
    }
}

#[test]
fn given_empty_identifier_when_parsing_then_returns_invalid_format() {
    let result = Credential::parse(".secret");

    match result {
        Err(AuthError::InvalidCredentialFormat { message, .. }) => {
            assert_eq!(message, "key identifier is empty");
        }
        other => panic!("expected InvalidCredentialFormat, got {other:?}"),
    }
}

/// **VALUE**: Verifies a well-formed key splits into the right halves.
#[test]
fn given_well_formed_key_when_parsing_then_splits_identifier_and_secret() {
    let credential: Credential = "d7c2dfda469280506236c8ad1c2178b2.def7WeLWt4ebpdog"
        .parse()
        .unwrap();

    assert_eq!(credential.identifier(), "d7c2dfda469280506236c8ad1c2178b2");
    assert_eq!(credential.secret().expose_secret(), "def7WeLWt4ebpdog");
}

/// **VALUE**: Verifies the key is split exactly as given.
///
/// **BUG THIS CATCHES**: Would catch silent trimming, which signs with a
/// different identifier than the one the caller passed.
#[test]
fn given_surrounding_whitespace_when_parsing_then_keeps_it_verbatim() {
    let credential = Credential::parse(" abc.def\n").unwrap();

    assert_eq!(credential.identifier(), " abc");
    assert_eq!(credential.secret().expose_secret(), "def\n");
}

/// **VALUE**: Verifies a blank key is a format error, not a signing error.
#[test]
fn given_whitespace_only_key_when_parsing_then_returns_invalid_format() {
    let result = Credential::parse("   ");

    assert!(matches!(
        result,
        Err(AuthError::InvalidCredentialFormat { .. })
    ));
}

/// **VALUE**: Verifies neither the error nor `Debug` output leak the secret.
///
/// **BUG THIS CATCHES**: Would catch error messages that echo the raw key,
/// which end up in logs.
#[test]
fn given_secret_when_formatting_credential_or_error_then_secret_is_hidden() {
    let credential = Credential::parse("abc.hunter2").unwrap();
    let debug = format!("{credential:?}");
    assert!(debug.contains("abc"));
    assert!(!debug.contains("hunter2"));

    let err = Credential::parse("abc.hunter2.extra").unwrap_err();
    assert!(!err.to_string().contains("hunter2"));
}
