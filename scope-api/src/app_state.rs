use std::sync::Arc;

use gemini::GeminiClient;

use crate::config::Settings;
use crate::domain::scope::completion::GeminiCompletion;
use crate::domain::scope::{DatasetStore, ScopeSearchService};

#[derive(Clone)]
pub struct AppState {
    scope_service: Option<Arc<ScopeSearchService>>,
}

impl AppState {
    pub fn new(config: &Settings) -> Result<Self, serde_json::Error> {
        let datasets = Arc::new(DatasetStore::from_embedded()?);

        let scope_service = match GeminiClient::new(&config.genai.api_key, &config.genai.model) {
            Ok(client) => Some(Arc::new(ScopeSearchService::new(
                datasets,
                Arc::new(GeminiCompletion::new(client)),
            ))),
            Err(err) => {
                tracing::error!("Failed to create Gemini client: {}", err);
                None
            }
        };

        Ok(Self { scope_service })
    }

    /// The scope search service, or `None` when the Gemini credential is
    /// unconfigured.
    pub fn scope_service(&self) -> Option<Arc<ScopeSearchService>> {
        self.scope_service.clone()
    }
}
