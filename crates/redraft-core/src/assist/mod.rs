//! Writing assistant: prompt construction and reply parsing around an
//! `LlmProvider`.

pub mod prompt;
pub mod service;
