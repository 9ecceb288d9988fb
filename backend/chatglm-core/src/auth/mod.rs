//! API key handling: parse `identifier.secret`, sign a time-boxed token.

pub mod credential;
pub mod token;
