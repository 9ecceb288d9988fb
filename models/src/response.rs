//! Response side: the common envelope and the per-endpoint payloads.
//!
//! Every type deserializes leniently (`#[serde(default)]`) because failed
//! calls come back with the envelope only and no `data`.

use serde::{Deserialize, Serialize};

/// Fields present on every response.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BaseResponse {
    pub code: i64,
    pub msg: String,
    pub success: bool,
}

/// Lifecycle of an asynchronous task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Processing,
    Success,
    Failed,
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// `true` once the task will not change any more.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Success | TaskStatus::Failed)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TaskInfo {
    pub request_id: String,
    pub task_id: String,
    pub task_status: Option<TaskStatus>,
}

/// One generated message. `role` is kept as sent so roles this crate does
/// not model still decode.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Choice {
    pub role: String,
    pub content: String,
}

/// Token accounting for one call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SyncInvokeData {
    #[serde(flatten)]
    pub task: TaskInfo,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

/// Result of `invoke` and `sse-invoke`.
///
/// Usage may arrive inside `data` or beside it; [`Self::usage`] reads either.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvokeSyncResponse {
    #[serde(flatten)]
    pub envelope: BaseResponse,
    #[serde(default, alias = "Data")]
    pub data: Option<SyncInvokeData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl InvokeSyncResponse {
    /// Top-level usage when present, otherwise the one inside `data`.
    pub fn usage(&self) -> Option<Usage> {
        self.usage
            .or_else(|| self.data.as_ref().map(|data| data.usage))
    }

    /// Content of the first choice, if any.
    pub fn first_content(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.choices.first())
            .map(|choice| choice.content.as_str())
    }
}

/// Result of `async-invoke`: only task bookkeeping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvokeAsyncTaskResponse {
    #[serde(flatten)]
    pub envelope: BaseResponse,
    #[serde(default, alias = "Data")]
    pub data: Option<TaskInfo>,
}

impl InvokeAsyncTaskResponse {
    /// Server-issued id to pass to the task query.
    pub fn task_id(&self) -> Option<&str> {
        self.data
            .as_ref()
            .map(|task| task.task_id.as_str())
            .filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TaskQueryData {
    #[serde(flatten)]
    pub task: TaskInfo,
    pub choices: Vec<Choice>,
    pub usage: Usage,
}

/// Result of querying an asynchronous task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct InvokeAsyncTaskQueryResponse {
    #[serde(flatten)]
    pub envelope: BaseResponse,
    #[serde(default, alias = "Data")]
    pub data: Option<TaskQueryData>,
}

impl InvokeAsyncTaskQueryResponse {
    pub fn task_status(&self) -> Option<TaskStatus> {
        self.data.as_ref().and_then(|data| data.task.task_status)
    }

    pub fn first_content(&self) -> Option<&str> {
        self.data
            .as_ref()
            .and_then(|data| data.choices.first())
            .map(|choice| choice.content.as_str())
    }
}
