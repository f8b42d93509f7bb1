//! Scope determination - multi-level classification search.
//!
//! Helps a user locate the correct classification entry (IAF code, NACE
//! code, NACE child and detail sub-classification) in the reference
//! dataset, given a free-text query in English or Indonesian.
//!
//! # Pipeline
//!
//! 1. Typo correction via the completion service (failures swallowed)
//! 2. Language detection → dataset variant selection
//! 3. Keyword extraction (stopword filtering, whole-query fallback)
//! 4. Deterministic five-level substring matching with relevance scoring
//! 5. Grouping into result cards keyed by (scope, IAF, NACE, NACE child)
//! 6. AI fallback search, only when step 4 finds nothing
//!
//! The external generative service is injected through the
//! [`completion::TextCompletion`] trait so the matching/grouping/scoring
//! logic is testable without network access.

mod dataset;
mod fallback;
mod grouper;
mod keywords;
mod language;
mod matcher;
mod service;
mod typo;
mod types;

pub mod completion;

pub use dataset::DatasetStore;
pub use fallback::FallbackError;
pub use service::{ScopeDeterminationResponse, ScopeSearchService};
pub use types::ResultCard;
