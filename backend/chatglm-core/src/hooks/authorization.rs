use crate::auth::token::SignedToken;
use crate::error::chatglm_client::ChatGlmClientError;
use crate::hooks::RequestHook;

use common::ErrorLocation;

use std::panic::Location;

use reqwest::Request;
use reqwest::header::{AUTHORIZATION, HeaderValue};

/// Sets `Authorization: <token>` on every request.
///
/// The raw token is sent without a scheme prefix, which is what the
/// service expects.
#[derive(Debug, Clone)]
pub struct AuthorizationHook {
    value: HeaderValue,
}

impl AuthorizationHook {
    #[track_caller]
    pub fn new(token: &SignedToken) -> Result<Self, ChatGlmClientError> {
        let mut value =
            HeaderValue::from_str(token.as_str()).map_err(|e| ChatGlmClientError::Hook {
                message: format!("token is not a valid header value: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;
        value.set_sensitive(true);

        Ok(Self { value })
    }
}

impl RequestHook for AuthorizationHook {
    fn before_send(&self, request: &mut Request) -> Result<(), ChatGlmClientError> {
        request
            .headers_mut()
            .insert(AUTHORIZATION, self.value.clone());
        Ok(())
    }
}
