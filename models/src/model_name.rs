//! Model identifiers accepted in the `{model}` path segment.
//!
//! Client operations take any `&str`, so newer models work without a release.

pub const CHATGLM_PRO: &str = "chatglm_pro";
pub const CHATGLM_STD: &str = "chatglm_std";
pub const CHATGLM_LITE: &str = "chatglm_lite";
