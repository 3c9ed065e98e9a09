//! Completion backends — the single polymorphic capability behind every
//! judge and the synthesizer.
//!
//! Adapters own wire format only: request/response shapes for their
//! provider, nothing else. Prompt construction lives in the shared context
//! builder, response-schema validation in the judge layer. Retry/backoff
//! policy is deliberately absent — failures surface as [`BackendError`] and
//! become per-judge exclusions upstream.

use async_trait::async_trait;
use thiserror::Error;

pub mod anthropic;
pub mod gemini;
pub mod openai;

pub use anthropic::AnthropicModel;
pub use gemini::GeminiModel;
pub use openai::OpenAiCompatModel;

/// Transport-level time budget for a single completion request. The
/// pipeline applies its own, configurable per-judge timeout on top.
pub(crate) const HTTP_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("response did not match any accepted schema: {0}")]
    Schema(String),

    #[error("backend returned empty content")]
    EmptyContent,

    #[error("backend call timed out")]
    Timeout,
}

/// A chat-completion backend: one system prompt, one user message, one
/// text response. Implementations must instruct-or-accept JSON output —
/// callers parse the returned text as JSON.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier for logs, e.g. "gemini-2.5-pro".
    fn name(&self) -> &str;

    async fn complete(&self, system: &str, user: &str) -> Result<String, BackendError>;
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
