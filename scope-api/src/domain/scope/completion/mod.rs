//! Text-completion implementations.

mod gemini_completion;
#[cfg(test)]
mod mock;

use async_trait::async_trait;

pub use gemini_completion::GeminiCompletion;
#[cfg(test)]
pub use mock::MockCompletion;

/// Error type for completion calls.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    RequestFailed(String),
}

/// A single prompt-in/text-out exchange with an external generative
/// service. The service is otherwise untyped from this system's
/// perspective; abstracting it lets the matching/grouping/scoring logic be
/// tested without live network access.
#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Send one prompt and return the completion text, capped at
    /// `max_output_tokens`.
    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, CompletionError>;
}
