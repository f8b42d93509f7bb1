//! Static reference dataset store.
//!
//! Two parallel variants of the classification data exist (Indonesian and
//! English). Both are embedded in the binary, parsed once at startup and
//! never written; one variant is selected per request by language, never
//! merged.

use super::language::Language;
use super::types::ScopeData;

const SCOPE_EN: &str = include_str!("../../../data/scope_en.json");
const SCOPE_ID: &str = include_str!("../../../data/scope_id.json");

pub struct DatasetStore {
    en: ScopeData,
    id: ScopeData,
}

impl DatasetStore {
    pub fn new(en: ScopeData, id: ScopeData) -> Self {
        Self { en, id }
    }

    /// Parse the embedded dataset documents.
    pub fn from_embedded() -> Result<Self, serde_json::Error> {
        Ok(Self {
            en: serde_json::from_str(SCOPE_EN)?,
            id: serde_json::from_str(SCOPE_ID)?,
        })
    }

    pub fn variant(&self, language: Language) -> &ScopeData {
        match language {
            Language::English => &self.en,
            Language::Indonesian => &self.id,
        }
    }
}
