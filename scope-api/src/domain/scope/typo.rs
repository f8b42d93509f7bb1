//! Typo-correction pre-pass.
//!
//! Asks the completion service to normalize spelling before the search
//! runs. This step must never abort the request: any failure is logged and
//! the original query is used unchanged.

use tracing::{info, warn};

use super::completion::TextCompletion;

const TYPO_MAX_OUTPUT_TOKENS: u32 = 100;

fn build_typo_prompt(query: &str) -> String {
    format!(
        r#"
Analyze the following search query and check for typos or spelling mistakes.
If there are typos, correct them and return ONLY the corrected query.
If there are no typos, return the original query exactly as is.

Context: This is for searching industrial/business scope certifications (ISO, manufacturing, services, etc.)

Common words in this domain (Indonesian & English):
- transportasi/transport, kendaraan/vehicle, otomotif/automotive
- pertanian/agriculture, perikanan/fishery, kehutanan/forestry
- manufaktur/manufacturing, produksi/production
- teknologi/technology, informasi/information
- konstruksi/construction, bangunan/building
- kesehatan/health, pendidikan/education
- keuangan/finance, perbankan/banking

Query: "{query}"

Instructions:
- ONLY return the corrected word/phrase, nothing else
- If no correction needed, return the exact original query
- Do NOT add explanations or extra text
- Examples:
  * "trasnport" -> "transport"
  * "transportsi" -> "transportasi"
  * "otmotif" -> "otomotif"
  * "kesehatn" -> "kesehatan"
  * "transport" -> "transport" (no change if already correct)
"#
    )
}

/// Run the typo-correction pre-pass. Returns the (possibly unchanged)
/// query and whether it was corrected. Success is defined purely by textual
/// difference: the trimmed completion must be non-empty and differ from the
/// input both case-sensitively and case-insensitively.
pub async fn correct_query(completion: &dyn TextCompletion, query: &str) -> (String, bool) {
    let prompt = build_typo_prompt(query);

    match completion.complete(&prompt, TYPO_MAX_OUTPUT_TOKENS).await {
        Ok(text) => {
            let suggested = text.trim();
            if !suggested.is_empty()
                && suggested != query
                && suggested.to_lowercase() != query.to_lowercase()
            {
                info!("typo corrected: {:?} -> {:?}", query, suggested);
                (suggested.to_string(), true)
            } else {
                info!("no typo detected in {:?}", query);
                (query.to_string(), false)
            }
        }
        Err(err) => {
            warn!("typo correction failed, using original query: {}", err);
            (query.to_string(), false)
        }
    }
}
