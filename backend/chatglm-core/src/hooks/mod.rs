//! Pre-send hook chain applied to every outgoing request.
//!
//! Hooks run in registration order. The first hook that returns an error
//! aborts the call before anything reaches the network. After a response
//! arrives every hook gets to observe it, again in registration order.

pub mod authorization;
pub mod debug_log;

pub use authorization::AuthorizationHook;
pub use debug_log::DebugLogHook;

use crate::error::chatglm_client::ChatGlmClientError;

use std::fmt;
use std::sync::Arc;

use reqwest::{Request, StatusCode};
use url::Url;

pub trait RequestHook: Send + Sync {
    /// Decorate (or reject) `request` before it is sent.
    fn before_send(&self, request: &mut Request) -> Result<(), ChatGlmClientError>;

    /// Observe the raw response. Cannot fail and cannot alter the result.
    fn after_receive(&self, _url: &Url, _status: StatusCode, _body: &[u8]) {}
}

impl<F> RequestHook for F
where
    F: Fn(&mut Request) -> Result<(), ChatGlmClientError> + Send + Sync,
{
    fn before_send(&self, request: &mut Request) -> Result<(), ChatGlmClientError> {
        self(request)
    }
}

#[derive(Clone, Default)]
pub struct HookChain {
    hooks: Vec<Arc<dyn RequestHook>>,
}

impl HookChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hook: impl RequestHook + 'static) {
        self.hooks.push(Arc::new(hook));
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    pub fn before_send(&self, request: &mut Request) -> Result<(), ChatGlmClientError> {
        for hook in &self.hooks {
            hook.before_send(request)?;
        }
        Ok(())
    }

    pub fn after_receive(&self, url: &Url, status: StatusCode, body: &[u8]) {
        for hook in &self.hooks {
            hook.after_receive(url, status, body);
        }
    }
}

impl fmt::Debug for HookChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HookChain")
            .field("hooks", &self.hooks.len())
            .finish()
    }
}
