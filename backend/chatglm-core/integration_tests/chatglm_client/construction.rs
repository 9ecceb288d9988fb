use super::helpers::TEST_API_KEY;

use chatglm_core::auth::token::TOKEN_TTL;
use chatglm_core::{AuthError, ChatGlmClient, ChatGlmClientError, ClientConfig, ConfigError};

use std::time::Duration;

/// **VALUE**: Verifies construction rejects malformed keys before any network use.
///
/// **WHY THIS MATTERS**: The key shape is the only thing checked locally; every
/// other auth problem shows up as a 401 much later.
#[test]
fn given_malformed_keys_when_creating_client_then_returns_invalid_credential_format() {
    for key in ["no-separator", "a.b.c"] {
        // WHEN: Creating a client
        let result = ChatGlmClient::from_api_key(key, false);

        // THEN: Credential format error
        assert!(
            matches!(
                result,
                Err(ChatGlmClientError::Auth(AuthError::InvalidCredentialFormat { .. }))
            ),
            "key {key:?} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn given_empty_secret_when_creating_client_then_returns_signing_error() {
    let result = ChatGlmClient::from_api_key("abc.", false);

    assert!(matches!(
        result,
        Err(ChatGlmClientError::Auth(AuthError::TokenSigning { .. }))
    ));
}

/// **VALUE**: Verifies a missing or blank key is reported as a credential format
/// error, like any other key without a separator.
///
/// **BUG THIS CATCHES**: Would catch config validation classifying an empty key
/// before the credential check runs.
#[test]
fn given_empty_or_blank_key_when_creating_client_then_returns_invalid_credential_format() {
    for key in ["", "   "] {
        let result = ChatGlmClient::from_api_key(key, true);

        assert!(
            matches!(
                result,
                Err(ChatGlmClientError::Auth(AuthError::InvalidCredentialFormat { .. }))
            ),
            "key {key:?} should be rejected, got {result:?}"
        );
    }
}

#[test]
fn given_zero_timeout_when_creating_client_then_returns_config_error() {
    let config = ClientConfig::new(TEST_API_KEY).with_timeout(Duration::ZERO);

    let result = ChatGlmClient::new(&config);

    assert!(matches!(
        result,
        Err(ChatGlmClientError::Config(ConfigError::Validation { .. }))
    ));
}

/// **VALUE**: Verifies a base URL that passes the scheme check but does not parse
/// is reported as a transport setup failure.
#[test]
fn given_unparseable_base_url_when_creating_client_then_returns_transport_init() {
    let config = ClientConfig::new(TEST_API_KEY).with_base_url("http://[::1");

    let result = ChatGlmClient::new(&config);

    match result {
        Err(ChatGlmClientError::TransportInit { message, .. }) => {
            assert!(message.contains("http://[::1"));
        }
        other => panic!("expected TransportInit, got {other:?}"),
    }
}

/// **VALUE**: Verifies the client signs a fresh 72 hour token for the key identifier.
#[test]
fn given_valid_key_when_creating_client_then_token_is_signed_for_identifier() {
    let client = ChatGlmClient::from_api_key(TEST_API_KEY, true).unwrap();

    let claims = client.token().claims();
    assert_eq!(claims.api_key, "abc");
    assert_eq!((claims.exp - claims.timestamp) as u64, TOKEN_TTL.as_secs());
    assert_eq!(client.base_url().as_str(), "https://open.bigmodel.cn/");
}
