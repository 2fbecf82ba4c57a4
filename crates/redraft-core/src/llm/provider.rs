//! LlmProvider trait definition.
//!
//! The assistant treats text generation as an opaque, possibly slow and
//! possibly failing request/response call. Implementations live in
//! redraft-infra (e.g., `OpenAiCompatibleProvider`).

use redraft_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for text-generation backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openai").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
