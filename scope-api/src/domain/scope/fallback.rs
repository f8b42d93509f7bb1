//! AI fallback search, used only when the deterministic matcher finds
//! nothing. The whole selected dataset variant is serialized into a single
//! prompt instructing the service to emulate the multi-level search and
//! return a structured JSON answer, which is then re-validated and
//! re-grouped against the dataset.

use tracing::{error, info};

use super::completion::{CompletionError, TextCompletion};
use super::types::{MatchCandidate, ScopeData};

const FALLBACK_MAX_OUTPUT_TOKENS: u32 = 8192;

/// Failures that abort the fallback path entirely.
#[derive(Debug, thiserror::Error)]
pub enum FallbackError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("Invalid response from AI")]
    EmptyResponse,
}

/// The AI's structured answer, validated and leniently parsed.
#[derive(Debug)]
pub struct AiSearchResult {
    pub hits: Vec<MatchCandidate>,
    pub penjelasan: String,
    pub saran: String,
}

/// Outcome of one fallback attempt. A malformed response is terminal for
/// this path but not an error for the request: the caller degrades to an
/// empty result set carrying the raw text for operator inspection.
#[derive(Debug)]
pub enum FallbackOutcome {
    Parsed(AiSearchResult),
    Malformed { raw: String },
}

fn build_fallback_prompt(query: &str, data: &ScopeData) -> String {
    let scope_context = serde_json::to_string_pretty(data).unwrap_or_default();

    format!(
        r#"
Tugas Anda:
1. Analisis maksud pencarian user: "{query}"
2. Temukan SEMUA scope, IAF_CODE, NACE, NACE_CHILD, dan nace_child_detail yang mengandung kata kunci dari data scope berikut
3. Cari kecocokan di SEMUA level: standar, IAF_CODE, NACE description, nace_child_title, title, dan terutama nace_child_detail_description
4. KEMBALIKAN SEMUA HASIL yang ditemukan, jangan dibatasi hanya top results
5. Urutkan berdasarkan relevansi tertinggi
6. Format response dalam JSON dengan struktur:
{{
    "hasil_pencarian": [
        {{
            "scope_key": "scope_9001_2015",
            "iaf_code": "Pertanian, Kehutanan, dan Perikanan (01)",
            "nace_code": "01",
            "nace_child_code": "01.1",
            "nace_child_detail_code": "01.11",
            "relevance_score": 95
        }},
        ... (kembalikan SEMUA hasil yang match, bisa ratusan)
    ],
    "penjelasan": "penjelasan singkat kenapa hasil ini cocok",
    "saran": "saran tambahan jika ada"
}}

Data Scope yang tersedia:
{scope_context}

Pencarian user: "{query}"

ATURAN PENTING:
- Cari di semua level termasuk nace_child_detail_description yang sangat detail
- KEMBALIKAN SEMUA hasil yang mengandung kata kunci, JANGAN batasi jumlahnya
- Jika kata kunci ditemukan di IAF_CODE, NACE description, atau detail description, HARUS dikembalikan
- Berikan relevance_score (0-100) untuk setiap hasil
- hasil_pencarian harus array of objects dengan struktur di atas (bisa ratusan items)
- Urutkan dari relevance_score tertinggi
- Berikan response dalam format JSON yang valid
- JANGAN skip hasil yang relevan, kembalikan SEMUA yang ditemukan
"#
    )
}

/// Strip optional surrounding markdown code-fence markup.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let without_prefix = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };

    without_prefix
        .trim_start()
        .trim_end_matches("```")
        .trim_end()
}

/// Parse and validate the AI's raw answer. The parsed object must contain
/// an array-typed `hasil_pencarian`; individual items that do not
/// deserialize are dropped rather than failing the whole response.
fn parse_ai_response(raw: &str) -> Option<AiSearchResult> {
    let cleaned = strip_code_fence(raw);
    let value: serde_json::Value = serde_json::from_str(cleaned).ok()?;

    let hits = value.get("hasil_pencarian")?.as_array()?;
    let hits: Vec<MatchCandidate> = hits
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();

    Some(AiSearchResult {
        hits,
        penjelasan: value
            .get("penjelasan")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
        saran: value
            .get("saran")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string(),
    })
}

/// Run the fallback search: one completion, no retries. Returns
/// `FallbackOutcome::Malformed` when the response cannot be validated, and
/// an error when the call itself fails or comes back empty.
pub async fn ai_fallback_search(
    completion: &dyn TextCompletion,
    data: &ScopeData,
    query: &str,
) -> Result<FallbackOutcome, FallbackError> {
    let prompt = build_fallback_prompt(query, data);
    let raw = completion
        .complete(&prompt, FALLBACK_MAX_OUTPUT_TOKENS)
        .await?;

    if raw.trim().is_empty() {
        return Err(FallbackError::EmptyResponse);
    }

    match parse_ai_response(&raw) {
        Some(result) => {
            info!("AI returned {} results", result.hits.len());
            Ok(FallbackOutcome::Parsed(result))
        }
        None => {
            error!("error parsing AI response: {}", raw);
            Ok(FallbackOutcome::Malformed { raw })
        }
    }
}
