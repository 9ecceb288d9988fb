use crate::auth::credential::Credential;
use crate::auth::token::{SignedToken, sign_token};
use crate::config::ClientConfig;
use crate::endpoint::Operation;
use crate::error::chatglm_client::ChatGlmClientError;
use crate::hooks::{AuthorizationHook, DebugLogHook, HookChain, RequestHook};

use common::{ErrorLocation, HttpStatusCode};
use models::{
    InvokeAsyncTaskQueryResponse, InvokeAsyncTaskResponse, InvokeRequest, InvokeSyncResponse,
};

use std::panic::Location;
use std::sync::Arc;

use log::{debug, info};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

/// Signed client for the model API.
///
/// The token is signed once in [`ChatGlmClient::new`] and reused for every
/// call; it is not renewed when it expires. All state is immutable after
/// construction, so clones can be shared across tasks freely.
#[derive(Clone, Debug)]
pub struct ChatGlmClient {
    base_url: Url,
    client: Client,
    token: Arc<SignedToken>,
    hooks: HookChain,
}

impl ChatGlmClient {
    /// Validate `config`, sign a token and build the transport.
    ///
    /// # Errors
    /// - [`ChatGlmClientError::Config`] for invalid config values
    /// - [`ChatGlmClientError::Auth`] for a malformed key or a signing failure
    /// - [`ChatGlmClientError::TransportInit`] if the HTTP client cannot be built
    pub fn new(config: &ClientConfig) -> Result<Self, ChatGlmClientError> {
        config.validate()?;

        let credential = Credential::parse(config.api_key.expose_secret())?;
        let token = sign_token(&credential)?;

        let base_url =
            Url::parse(&config.base_url).map_err(|e| ChatGlmClientError::TransportInit {
                message: format!("connect to {} failed: {e}", config.base_url),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ChatGlmClientError::TransportInit {
                message: format!("connect to {base_url} failed: {e}"),
                location: ErrorLocation::from(Location::caller()),
            })?;

        let mut hooks = HookChain::new();
        hooks.push(AuthorizationHook::new(&token)?);
        if config.debug {
            hooks.push(DebugLogHook);
        }

        info!(
            "ChatGLM client ready for key {} at {base_url} (token expires at {})",
            credential.identifier(),
            token.expires_at()
        );

        Ok(Self {
            base_url,
            client,
            token: Arc::new(token),
            hooks,
        })
    }

    /// Client against the public endpoint with default timeout.
    pub fn from_api_key(api_key: &str, debug: bool) -> Result<Self, ChatGlmClientError> {
        Self::new(&ClientConfig::new(api_key).with_debug(debug))
    }

    /// Append a hook; it runs after the built-in ones.
    pub fn with_hook(mut self, hook: impl RequestHook + 'static) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn token(&self) -> &SignedToken {
        &self.token
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Run the model and wait for the full answer.
    pub async fn sync_invoke(
        &self,
        model: &str,
        request: &InvokeRequest,
    ) -> Result<InvokeSyncResponse, ChatGlmClientError> {
        self.send(Operation::SyncInvoke, model, Some(request)).await
    }

    /// Submit a task; poll it with [`Self::async_invoke_task_query`].
    pub async fn async_invoke(
        &self,
        model: &str,
        request: &InvokeRequest,
    ) -> Result<InvokeAsyncTaskResponse, ChatGlmClientError> {
        self.send(Operation::AsyncInvoke, model, Some(request)).await
    }

    pub async fn async_invoke_task_query(
        &self,
        task_id: &str,
    ) -> Result<InvokeAsyncTaskQueryResponse, ChatGlmClientError> {
        self.send(Operation::AsyncInvokeTaskQuery, task_id, None::<&()>)
            .await
    }

    /// Call the SSE endpoint. The body is read whole and decoded as JSON.
    pub async fn sse_invoke(
        &self,
        model: &str,
        request: &InvokeRequest,
    ) -> Result<InvokeSyncResponse, ChatGlmClientError> {
        self.send(Operation::SseInvoke, model, Some(request)).await
    }

    async fn send<B, R>(
        &self,
        operation: Operation,
        target: &str,
        body: Option<&B>,
    ) -> Result<R, ChatGlmClientError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint_url(operation, target)?;

        let mut builder = self.client.request(operation.method(), url);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let mut request = builder.build()?;

        self.hooks.before_send(&mut request)?;

        debug!("{} {} {}", operation.name(), request.method(), request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        let url = response.url().clone();
        let bytes = response.bytes().await?;

        self.hooks.after_receive(&url, status, &bytes);

        if !status.is_success() {
            return Err(ChatGlmClientError::Transport {
                message: format!(
                    "HTTP {} - {}",
                    status.as_u16(),
                    String::from_utf8_lossy(&bytes)
                ),
                status: Some(HttpStatusCode(status.as_u16())),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    fn endpoint_url(&self, operation: Operation, target: &str) -> Result<Url, ChatGlmClientError> {
        if target.trim().is_empty() || target.contains('/') {
            return Err(ChatGlmClientError::UrlParse {
                message: format!("invalid path segment `{target}` for {}", operation.name()),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let prefix = self.base_url.path().trim_end_matches('/');
        let mut url = self.base_url.clone();
        url.set_path(&format!("{prefix}{}", operation.path(target)));
        Ok(url)
    }
}
