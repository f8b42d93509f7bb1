use thiserror::Error;
use tracing::{debug, error};

use crate::models::{GenerateConfig, GenerateRequest, GenerateResponse};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Client for the Google Generative Language `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    api_key: String,
    model: String,
    http: reqwest::Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(GeminiError::MissingApiKey);
        }

        Ok(Self {
            api_key,
            model: model.into(),
            http: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single user prompt and return the completion text.
    pub async fn generate_content(
        &self,
        prompt: &str,
        config: GenerateConfig,
    ) -> Result<String, GeminiError> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = GenerateRequest::user_prompt(prompt, config);

        debug!(
            model = %self.model,
            "sending generateContent request to {}",
            url.replace(&self.api_key, "***")
        );

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::ResponseError(e.to_string()))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| GeminiError::ResponseError(e.to_string()))?;

        if !status.is_success() {
            error!("generateContent failed: {} - {}", status, response_text);
            return Err(GeminiError::ApiError {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&response_text).map_err(|e| {
            GeminiError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })?;

        parsed.first_text().ok_or(GeminiError::NoCandidates)
    }
}

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("API key is missing")]
    MissingApiKey,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("ApiError: HTTP {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("No candidates in response")]
    NoCandidates,
}
