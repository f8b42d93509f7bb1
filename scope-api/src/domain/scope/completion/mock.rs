//! Mock completion implementation for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use super::{CompletionError, TextCompletion};

/// Mock completion that returns scripted responses in sequence and records
/// the prompts it receives.
#[derive(Clone, Default)]
pub struct MockCompletion {
    responses: Arc<Vec<Result<String, String>>>,
    call_count: Arc<AtomicUsize>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl MockCompletion {
    /// Create a mock that returns the given responses in order. `Err`
    /// entries simulate a failed call. Wraps around if more calls are made
    /// than responses provided.
    pub fn with_responses(responses: Vec<Result<String, String>>) -> Self {
        Self {
            responses: Arc::new(responses),
            call_count: Arc::new(AtomicUsize::new(0)),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always echoes the same text.
    pub fn returning(text: impl Into<String>) -> Self {
        Self::with_responses(vec![Ok(text.into())])
    }

    /// Create a mock where every call fails.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_responses(vec![Err(reason.into())])
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextCompletion for MockCompletion {
    async fn complete(
        &self,
        prompt: &str,
        _max_output_tokens: u32,
    ) -> Result<String, CompletionError> {
        let idx = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        if self.responses.is_empty() {
            return Ok(String::new());
        }

        let response = &self.responses[idx % self.responses.len()];
        response
            .clone()
            .map_err(CompletionError::RequestFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_returns_fixed_text() {
        let completion = MockCompletion::returning("transport");

        assert_eq!(completion.complete("q1", 100).await.unwrap(), "transport");
        assert_eq!(completion.complete("q2", 100).await.unwrap(), "transport");
        assert_eq!(completion.call_count(), 2);
    }

    #[tokio::test]
    async fn mock_returns_sequence_and_records_prompts() {
        let completion = MockCompletion::with_responses(vec![
            Ok("first".to_string()),
            Err("boom".to_string()),
        ]);

        assert_eq!(completion.complete("a", 100).await.unwrap(), "first");
        assert!(completion.complete("b", 100).await.is_err());
        assert_eq!(completion.prompts(), vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn empty_mock_returns_empty_text() {
        let completion = MockCompletion::default();
        assert_eq!(completion.complete("q", 100).await.unwrap(), "");
    }
}
