//! Gemini-backed completion using the `gemini` client crate.

use async_trait::async_trait;
use gemini::{GeminiClient, GenerateConfig};

use super::{CompletionError, TextCompletion};

pub struct GeminiCompletion {
    client: GeminiClient,
}

impl GeminiCompletion {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TextCompletion for GeminiCompletion {
    async fn complete(
        &self,
        prompt: &str,
        max_output_tokens: u32,
    ) -> Result<String, CompletionError> {
        self.client
            .generate_content(prompt, GenerateConfig::text(max_output_tokens))
            .await
            .map_err(|e| CompletionError::RequestFailed(e.to_string()))
    }
}
