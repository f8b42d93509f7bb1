//! Scope determination service: the full search pipeline.
//!
//! A request runs sequentially through typo correction, language detection,
//! keyword extraction and the deterministic matcher; only when the matcher
//! finds nothing does the AI fallback run. The service holds no mutable
//! state, so any number of requests may run concurrently over the shared
//! read-only dataset.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use super::completion::TextCompletion;
use super::dataset::DatasetStore;
use super::fallback::{ai_fallback_search, FallbackError, FallbackOutcome};
use super::grouper::{group_matches, IafMatch};
use super::keywords::extract_keywords;
use super::language::detect_language;
use super::matcher::search_dataset;
use super::typo::correct_query;
use super::types::{MatchCandidate, ResultCard};

const SARAN: &str = "Periksa setiap kategori untuk menemukan scope yang paling sesuai dengan kegiatan perusahaan Anda. Anda dapat memilih lebih dari satu scope jika perusahaan memiliki berbagai jenis kegiatan.";

const MALFORMED_PENJELASAN: &str = "Terjadi kesalahan dalam memproses respons AI";
const MALFORMED_SARAN: &str = "Silakan coba dengan kata kunci yang lebih spesifik";

/// Final response payload for one scope determination request.
#[derive(Debug, Serialize)]
pub struct ScopeDeterminationResponse {
    pub hasil_pencarian: Vec<ResultCard>,
    pub penjelasan: String,
    pub saran: String,
    pub total_hasil: usize,
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_query: Option<String>,
    /// Raw AI text, present only when the fallback answer could not be
    /// parsed; kept for operator inspection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_ai_response: Option<String>,
}

pub struct ScopeSearchService {
    datasets: Arc<DatasetStore>,
    completion: Arc<dyn TextCompletion>,
}

impl ScopeSearchService {
    pub fn new(datasets: Arc<DatasetStore>, completion: Arc<dyn TextCompletion>) -> Self {
        Self {
            datasets,
            completion,
        }
    }

    /// Run the full pipeline for one query.
    pub async fn determine(
        &self,
        query: &str,
    ) -> Result<ScopeDeterminationResponse, FallbackError> {
        info!("original query: {:?}", query);

        let (corrected_query, was_corrected) =
            correct_query(self.completion.as_ref(), query).await;

        let language = detect_language(&corrected_query);
        info!("detected language: {}", language);
        let data = self.datasets.variant(language);

        let keywords = extract_keywords(&corrected_query);
        info!("searching for keywords: {:?}", keywords);

        let mut matches = search_dataset(data, &keywords);
        info!(
            "direct search found {} matches for {:?}",
            matches.len(),
            corrected_query
        );

        if !matches.is_empty() {
            matches.sort_by(|a, b| b.relevance_score.cmp(&a.relevance_score));
            let candidates: Vec<MatchCandidate> =
                matches.into_iter().map(MatchCandidate::from).collect();

            let cards = group_matches(data, &candidates, IafMatch::Exact);
            info!("grouped into {} result cards", cards.len());

            let mut penjelasan = typo_notice(query, &corrected_query, was_corrected);
            penjelasan.push_str(&format!(
                "Ditemukan {} kategori scope yang mengandung kata \"{}\". Hasil ditampilkan berdasarkan tingkat relevansi, dengan yang paling sesuai ditampilkan terlebih dahulu.",
                cards.len(),
                corrected_query
            ));

            return Ok(self.compose(query, &corrected_query, was_corrected, cards, penjelasan, SARAN.to_string(), None));
        }

        info!("no direct results found, falling back to AI search");

        match ai_fallback_search(self.completion.as_ref(), data, &corrected_query).await? {
            FallbackOutcome::Parsed(result) => {
                let cards = group_matches(data, &result.hits, IafMatch::Lenient);
                info!("grouped into {} result cards", cards.len());

                let mut penjelasan = typo_notice(query, &corrected_query, was_corrected);
                penjelasan.push_str(&result.penjelasan);

                Ok(self.compose(
                    query,
                    &corrected_query,
                    was_corrected,
                    cards,
                    penjelasan,
                    result.saran,
                    None,
                ))
            }
            FallbackOutcome::Malformed { raw } => Ok(self.compose(
                query,
                &corrected_query,
                was_corrected,
                Vec::new(),
                MALFORMED_PENJELASAN.to_string(),
                MALFORMED_SARAN.to_string(),
                Some(raw),
            )),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn compose(
        &self,
        query: &str,
        corrected_query: &str,
        was_corrected: bool,
        cards: Vec<ResultCard>,
        penjelasan: String,
        saran: String,
        raw_ai_response: Option<String>,
    ) -> ScopeDeterminationResponse {
        ScopeDeterminationResponse {
            total_hasil: cards.len(),
            hasil_pencarian: cards,
            penjelasan,
            saran,
            query: query.to_string(),
            corrected_query: was_corrected.then(|| corrected_query.to_string()),
            raw_ai_response,
        }
    }
}

fn typo_notice(query: &str, corrected_query: &str, was_corrected: bool) -> String {
    if was_corrected {
        format!(
            "Kami mendeteksi kemungkinan typo pada pencarian Anda. Pencarian \"{}\" telah dikoreksi menjadi \"{}\".\n\n",
            query, corrected_query
        )
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scope::completion::MockCompletion;

    fn service(completion: MockCompletion) -> ScopeSearchService {
        let datasets = Arc::new(DatasetStore::from_embedded().unwrap());
        ScopeSearchService::new(datasets, Arc::new(completion))
    }

    #[tokio::test]
    async fn deterministic_path_never_calls_fallback() {
        let completion = MockCompletion::returning("transport");
        let svc = service(completion.clone());

        let response = svc.determine("transport").await.unwrap();

        assert!(response.total_hasil > 0);
        assert_eq!(response.total_hasil, response.hasil_pencarian.len());
        assert!(response.corrected_query.is_none());
        assert!(response.raw_ai_response.is_none());
        // Only the typo pre-pass touched the completion service
        assert_eq!(completion.call_count(), 1);
    }

    #[tokio::test]
    async fn english_query_searches_english_variant() {
        let completion = MockCompletion::returning("transport");
        let svc = service(completion);

        let response = svc.determine("transport").await.unwrap();

        assert!(response
            .hasil_pencarian
            .iter()
            .all(|card| card.iaf_code == "Transport, Storage and Communication (31)"));
    }

    #[tokio::test]
    async fn indonesian_query_searches_indonesian_variant() {
        let completion = MockCompletion::returning("pertanian");
        let svc = service(completion);

        let response = svc.determine("pertanian").await.unwrap();

        assert!(response.total_hasil > 0);
        assert!(response.hasil_pencarian[0].iaf_code.starts_with("Pertanian"));
    }

    #[tokio::test]
    async fn typo_correction_is_reported() {
        let completion = MockCompletion::returning("transport");
        let svc = service(completion);

        let response = svc.determine("trasnport").await.unwrap();

        assert_eq!(response.corrected_query.as_deref(), Some("transport"));
        assert!(response.penjelasan.contains("dikoreksi"));
        assert!(response.total_hasil > 0);
        assert_eq!(response.query, "trasnport");
    }

    #[tokio::test]
    async fn exact_leaf_title_surfaces_its_card_first() {
        let completion = MockCompletion::returning("Taxi operation");
        let svc = service(completion.clone());

        let response = svc.determine("Taxi operation").await.unwrap();

        assert!(response.total_hasil > 0);
        let card = &response.hasil_pencarian[0];
        assert_eq!(card.nace_child.code, "49.3");
        assert_eq!(card.nace_child_details[0].code, "49.32");
        // Deterministic path: no fallback call
        assert_eq!(completion.call_count(), 1);
    }

    #[tokio::test]
    async fn cards_are_sorted_by_descending_relevance() {
        let completion = MockCompletion::returning("fishing");
        let svc = service(completion);

        let response = svc.determine("fishing").await.unwrap();

        let scores: Vec<i32> = response
            .hasil_pencarian
            .iter()
            .map(|card| card.relevance_score)
            .collect();
        let mut sorted = scores.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(scores, sorted);
    }

    #[tokio::test]
    async fn fallback_results_are_validated_and_grouped() {
        let ai_answer = r#"```json
{
    "hasil_pencarian": [
        {
            "scope_key": "scope_9001_2015",
            "iaf_code": "Agriculture (01)",
            "nace_code": "01",
            "nace_child_code": "01.1",
            "nace_child_detail_code": "01.13",
            "relevance_score": 95
        }
    ],
    "penjelasan": "Cocok dengan sektor pertanian",
    "saran": "Periksa kategori 01"
}
```"#;
        let completion = MockCompletion::with_responses(vec![
            Ok("xyzzy".to_string()),
            Ok(ai_answer.to_string()),
        ]);
        let svc = service(completion.clone());

        let response = svc.determine("xyzzy").await.unwrap();

        assert_eq!(completion.call_count(), 2);
        assert_eq!(response.total_hasil, 1);
        let card = &response.hasil_pencarian[0];
        assert_eq!(card.iaf_code, "Agriculture, Forestry and Fishing (01)");
        assert_eq!(card.nace_child_details[0].code, "01.13");
        assert_eq!(response.penjelasan, "Cocok dengan sektor pertanian");
        assert_eq!(response.saran, "Periksa kategori 01");
    }

    #[tokio::test]
    async fn malformed_fallback_degrades_to_empty_result() {
        let completion = MockCompletion::with_responses(vec![
            Ok("xyzzy".to_string()),
            Ok("I will not answer in JSON.".to_string()),
        ]);
        let svc = service(completion);

        let response = svc.determine("xyzzy").await.unwrap();

        assert_eq!(response.total_hasil, 0);
        assert!(response.hasil_pencarian.is_empty());
        assert_eq!(response.penjelasan, MALFORMED_PENJELASAN);
        assert_eq!(
            response.raw_ai_response.as_deref(),
            Some("I will not answer in JSON.")
        );
    }

    #[tokio::test]
    async fn empty_query_triggers_fallback() {
        let completion = MockCompletion::with_responses(vec![
            Ok(String::new()),
            Ok("garbage".to_string()),
        ]);
        let svc = service(completion.clone());

        let response = svc.determine("").await.unwrap();

        // Matcher finds nothing for the empty-token fallback, so the AI
        // path runs and, being malformed, degrades cleanly.
        assert_eq!(completion.call_count(), 2);
        assert_eq!(response.total_hasil, 0);
        assert!(response.raw_ai_response.is_some());
    }

    #[tokio::test]
    async fn empty_fallback_completion_is_an_error() {
        let completion = MockCompletion::with_responses(vec![
            Ok("xyzzy".to_string()),
            Ok("   ".to_string()),
        ]);
        let svc = service(completion);

        let result = svc.determine("xyzzy").await;
        assert!(matches!(result, Err(FallbackError::EmptyResponse)));
    }

    #[tokio::test]
    async fn typo_failure_does_not_abort_the_request() {
        let completion = MockCompletion::with_responses(vec![
            Err("quota exceeded".to_string()),
            Ok("unused".to_string()),
        ]);
        let svc = service(completion.clone());

        let response = svc.determine("transport").await.unwrap();

        assert!(response.total_hasil > 0);
        assert!(response.corrected_query.is_none());
        assert_eq!(completion.call_count(), 1);
    }
}
