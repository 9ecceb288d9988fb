//! Wire models for the ChatGLM model API.
//!
//! Pure data: request bodies, the response envelope and its per-endpoint
//! payloads, plus the handful of constants the service defines (model
//! names, task statuses). No HTTP and no signing lives here.
//!
//! ## Architecture
//!
//! - **common**: error locations, redacted secrets
//! - **models** (this crate): request/response shapes
//! - **chatglm-core**: token signing and the HTTP client
//! - **chatglm**: command-line wiring

pub mod error;
pub mod invoke;
pub mod model_name;
pub mod response;

#[cfg(test)]
mod tests;

pub use common::ErrorLocation;
pub use error::model_error::ModelError;
pub use invoke::builder::InvokeRequestBuilder;
pub use invoke::{InvokeRef, InvokeRequest, PromptMessage, PromptRole, ReturnType};
pub use response::{
    BaseResponse, Choice, InvokeAsyncTaskQueryResponse, InvokeAsyncTaskResponse,
    InvokeSyncResponse, SyncInvokeData, TaskInfo, TaskQueryData, TaskStatus, Usage,
};
