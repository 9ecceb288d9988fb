use crate::error::chatglm_client::ChatGlmClientError;
use crate::hooks::RequestHook;

use log::debug;
use reqwest::header::AUTHORIZATION;
use reqwest::{Request, StatusCode};
use url::Url;

/// Logs full request and response content at `debug` level.
///
/// Sensitive headers (including `Authorization`) are logged as `[REDACTED]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DebugLogHook;

impl RequestHook for DebugLogHook {
    fn before_send(&self, request: &mut Request) -> Result<(), ChatGlmClientError> {
        debug!("--> {} {}", request.method(), request.url());

        for (name, value) in request.headers() {
            if value.is_sensitive() || *name == AUTHORIZATION {
                debug!("    {name}: [REDACTED]");
            } else {
                debug!("    {name}: {}", value.to_str().unwrap_or("<non-ascii>"));
            }
        }

        if let Some(body) = request.body().and_then(|body| body.as_bytes()) {
            debug!("    body: {}", String::from_utf8_lossy(body));
        }

        Ok(())
    }

    fn after_receive(&self, url: &Url, status: StatusCode, body: &[u8]) {
        debug!("<-- {} {url}", status.as_u16());
        debug!("    body: {}", String::from_utf8_lossy(body));
    }
}
