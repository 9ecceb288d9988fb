//! Operation table: HTTP method and path template for each remote call.

use const_format::concatcp;
use reqwest::Method;

pub const MODEL_API_PREFIX: &str = "/api/paas/v3/model-api";
const ASYNC_TASK_PREFIX: &str = concatcp!(MODEL_API_PREFIX, "/-/async-invoke");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    SyncInvoke,
    AsyncInvoke,
    AsyncInvokeTaskQuery,
    SseInvoke,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::SyncInvoke,
        Operation::AsyncInvoke,
        Operation::AsyncInvokeTaskQuery,
        Operation::SseInvoke,
    ];

    pub fn method(self) -> Method {
        match self {
            Operation::AsyncInvokeTaskQuery => Method::GET,
            Operation::SyncInvoke | Operation::AsyncInvoke | Operation::SseInvoke => Method::POST,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Operation::SyncInvoke => "SyncInvoke",
            Operation::AsyncInvoke => "AsyncInvoke",
            Operation::AsyncInvokeTaskQuery => "AsyncInvokeTaskQuery",
            Operation::SseInvoke => "SSEInvoke",
        }
    }

    /// Path for this operation. `target` is the model name, or the task id
    /// for [`Operation::AsyncInvokeTaskQuery`].
    pub fn path(self, target: &str) -> String {
        match self {
            Operation::SyncInvoke => format!("{MODEL_API_PREFIX}/{target}/invoke"),
            Operation::AsyncInvoke => format!("{MODEL_API_PREFIX}/{target}/async-invoke"),
            Operation::AsyncInvokeTaskQuery => format!("{ASYNC_TASK_PREFIX}/{target}"),
            Operation::SseInvoke => format!("{MODEL_API_PREFIX}/{target}/sse-invoke"),
        }
    }
}
