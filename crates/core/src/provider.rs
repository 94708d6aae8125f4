//! Provider trait, the abstraction over the language-model service.
//!
//! The decision path needs exactly one capability from a backend: send an
//! ordered message list, get the top completion's text and token usage
//! back. One completion per call, no retries, no streaming.
//!
//! Implementations live in the providers crate.

use crate::error::ProviderError;
use crate::message::Turn;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The model to use (e.g. "gpt-4o")
    pub model: String,

    /// System prompt plus transcript, in order
    pub messages: Vec<Turn>,

    /// Sampling temperature; the decision path always sends 0.0
    pub temperature: f32,
}

/// The single top completion returned by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The completion text, verbatim
    pub text: String,

    /// Token usage statistics, when the service reports them
    pub usage: Option<Usage>,

    /// Which model actually responded (may differ from requested)
    pub model: String,
}

/// Token usage information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// The language-model backend seam.
///
/// The decision engine calls `complete()` without knowing which backend is
/// behind it; test doubles script responses through the same trait.
#[async_trait]
pub trait Provider: Send + Sync {
    /// A human-readable name for this backend (e.g. "openai").
    fn name(&self) -> &str;

    /// Send a request and return the top completion.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<CompletionResponse, ProviderError>;

    /// Health check: can we reach the service?
    async fn health_check(&self) -> std::result::Result<bool, ProviderError> {
        Ok(true)
    }
}
