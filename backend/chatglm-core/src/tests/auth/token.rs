// Unit tests for token signing
// Tests the compact signed-claims format, expiry arithmetic and signature checks

use crate::auth::credential::Credential;
use crate::auth::token::{SignedToken, TOKEN_TTL, TokenHeader, sign_token, sign_token_at};
use crate::error::auth::AuthError;

use common::RedactedSecret;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

const TEST_API_KEY: &str = "d7c2dfda469280506236c8ad1c2178b2.def7WeLWt4ebpdog";
const SEVENTY_TWO_HOURS: i64 = 72 * 60 * 60;

fn credential() -> Credential {
    Credential::parse(TEST_API_KEY).unwrap()
}

/// **VALUE**: Verifies the token has the three-segment compact shape.
///
/// **WHY THIS MATTERS**: The service parses `header.claims.signature`; any
/// other shape is rejected as unauthorized on every call.
#[test]
fn given_valid_credential_when_signing_then_returns_three_segments() {
    // WHEN: Signing with the real clock
    let token = sign_token(&credential()).unwrap();

    // THEN: Non-empty, three dot-separated base64url segments
    let segments: Vec<&str> = token.as_str().split('.').collect();
    assert_eq!(segments.len(), 3);
    for segment in segments {
        assert!(!segment.is_empty());
        assert!(!segment.contains('='), "segments must be unpadded");
        assert!(URL_SAFE_NO_PAD.decode(segment).is_ok());
    }
}

/// **VALUE**: Verifies the header carries HS256 and the `sign_type` extension.
///
/// **BUG THIS CATCHES**: Would catch the service-specific `sign_type: SIGN`
/// field being dropped, which the service requires.
#[test]
fn given_signed_token_when_reading_header_then_contains_sign_type() {
    let token = sign_token_at(&credential(), 1_700_000_000).unwrap();

    let header = token.header().unwrap();

    assert_eq!(header, TokenHeader::default());
    assert_eq!(header.alg, "HS256");
    assert_eq!(header.sign_type, "SIGN");
    assert_eq!(header.typ, "JWT");
}

/// **VALUE**: Verifies the claims and the exact 72 hour expiry.
#[test]
fn given_issue_time_when_signing_then_claims_expire_after_seventy_two_hours() {
    let token = sign_token_at(&credential(), 1_700_000_000).unwrap();

    let decoded = SignedToken::decode(token.as_str()).unwrap();
    let claims = decoded.claims();

    assert_eq!(claims.api_key, "d7c2dfda469280506236c8ad1c2178b2");
    assert_eq!(claims.timestamp, 1_700_000_000);
    assert_eq!(claims.exp, 1_700_000_000 + SEVENTY_TWO_HOURS);
    assert_eq!(TOKEN_TTL.as_secs() as i64, SEVENTY_TWO_HOURS);
    assert_eq!(decoded.issued_at(), token.issued_at());
    assert_eq!(decoded.expires_at(), token.expires_at());
}

/// **VALUE**: Verifies the claims JSON key order and integer encoding.
///
/// **WHY THIS MATTERS**: Claims are signed as serialized bytes; they must be
/// the plain `{"api_key":..,"exp":..,"timestamp":..}` object the service decodes.
#[test]
fn given_signed_token_when_decoding_claims_segment_then_matches_expected_json() {
    let token = sign_token_at(&Credential::parse("abc.def").unwrap(), 100).unwrap();

    let claims_segment = token.as_str().split('.').nth(1).unwrap();
    let json = String::from_utf8(URL_SAFE_NO_PAD.decode(claims_segment).unwrap()).unwrap();

    assert_eq!(json, r#"{"api_key":"abc","exp":259300,"timestamp":100}"#);
}

/// **VALUE**: Verifies tokens issued at different times differ and each expires
/// 72 hours after its own timestamp.
#[test]
fn given_two_issue_times_when_signing_then_tokens_differ_and_each_expiry_is_relative() {
    let first = sign_token_at(&credential(), 1_700_000_000).unwrap();
    let second = sign_token_at(&credential(), 1_700_000_001).unwrap();

    assert_ne!(first.as_str(), second.as_str());
    for token in [&first, &second] {
        let claims = SignedToken::decode(token.as_str()).unwrap().claims().clone();
        assert_eq!(claims.exp - claims.timestamp, SEVENTY_TWO_HOURS);
    }
}

/// **VALUE**: Verifies the signature is HMAC-SHA256 over `header.claims` keyed by the secret.
///
/// **BUG THIS CATCHES**: Would catch signing the wrong input (e.g. raw JSON
/// instead of the encoded segments) or keying with the whole API key.
#[test]
fn given_signed_token_when_recomputing_mac_independently_then_signature_matches() {
    let token = sign_token_at(&credential(), 1_700_000_000).unwrap();
    let (signing_input, signature) = token.as_str().rsplit_once('.').unwrap();

    let mut mac = <Hmac<Sha256>>::new_from_slice(b"def7WeLWt4ebpdog").unwrap();
    mac.update(signing_input.as_bytes());
    let expected = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());

    assert_eq!(signature, expected);
    assert!(token.verify(credential().secret()).is_ok());
}

#[test]
fn given_wrong_secret_when_verifying_then_returns_decode_error() {
    let token = sign_token_at(&credential(), 1_700_000_000).unwrap();

    let result = token.verify(&RedactedSecret::new("not-the-secret"));

    match result {
        Err(AuthError::TokenDecode { message, .. }) => {
            assert_eq!(message, "signature does not match");
        }
        other => panic!("expected TokenDecode, got {other:?}"),
    }
}

/// **VALUE**: Verifies an empty secret is a signing failure, not a format failure.
#[test]
fn given_empty_secret_when_signing_then_returns_signing_error() {
    let credential = Credential::parse("abc.").unwrap();

    let result = sign_token(&credential);

    match result {
        Err(AuthError::TokenSigning { message, .. }) => {
            assert!(message.contains("empty"));
            assert!(message.contains("abc"));
        }
        other => panic!("expected TokenSigning, got {other:?}"),
    }
}

#[test]
fn given_issue_time_near_max_when_signing_then_returns_signing_error() {
    let result = sign_token_at(&credential(), i64::MAX - 10);

    assert!(matches!(result, Err(AuthError::TokenSigning { .. })));
}

#[test]
fn given_malformed_tokens_when_decoding_then_returns_decode_error() {
    for raw in ["", "a.b", "a.b.c.d", "!!!.???.sig"] {
        let result = SignedToken::decode(raw);
        assert!(
            matches!(result, Err(AuthError::TokenDecode { .. })),
            "expected decode error for {raw:?}"
        );
    }
}

/// **VALUE**: Verifies expiry checks are inclusive at the `exp` second.
#[test]
fn given_token_when_checking_expiry_then_expires_at_exp() {
    let token = sign_token_at(&credential(), 1_000).unwrap();

    assert!(!token.is_expired_at(1_000));
    assert!(!token.is_expired_at(1_000 + SEVENTY_TWO_HOURS - 1));
    assert!(token.is_expired_at(1_000 + SEVENTY_TWO_HOURS));
}

#[test]
fn given_token_when_debug_formatted_then_value_is_redacted() {
    let token = sign_token_at(&credential(), 1_000).unwrap();

    let debug = format!("{token:?}");

    assert!(!debug.contains(token.as_str()));
    assert!(debug.contains("REDACTED"));
    assert!(debug.contains("d7c2dfda469280506236c8ad1c2178b2"));
}
