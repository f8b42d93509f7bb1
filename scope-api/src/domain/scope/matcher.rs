//! Deterministic multi-level matcher.
//!
//! Walks the full hierarchy and tests every keyword against five text
//! fields per leaf, in fixed priority order: IAF label → NACE description →
//! NACE child title → detail title → detail description. A keyword credits
//! only the FIRST field that contains it, even if it appears at several
//! levels. This first-level-wins rule is load-bearing for the relevance
//! ranking; do not replace it with independent per-level tests.

use super::types::{MatchRecord, ScopeData};

pub const IAF_WEIGHT: i32 = 30;
pub const NACE_WEIGHT: i32 = 25;
pub const NACE_CHILD_WEIGHT: i32 = 20;
pub const TITLE_WEIGHT: i32 = 15;
pub const DESCRIPTION_WEIGHT: i32 = 10;
pub const KEYWORD_BONUS: i32 = 5;

/// Scan the dataset variant for leaves matching any keyword. Leaves with no
/// matching keyword are excluded, so every returned record has a positive
/// relevance score. Output order follows the dataset walk.
pub fn search_dataset(data: &ScopeData, keywords: &[String]) -> Vec<MatchRecord> {
    let mut results = Vec::new();

    for (scope_key, entry) in data {
        for iaf_scope in &entry.scope {
            let iaf_text = iaf_scope.iaf_code.to_lowercase();

            for nace_detail in &iaf_scope.nace_details {
                let Some(nace) = &nace_detail.nace else {
                    continue;
                };
                let nace_text = nace.description.to_lowercase();

                for nace_child in &nace_detail.children {
                    let nace_child_text = nace_child.title.to_lowercase();

                    for child_detail in &nace_child.details {
                        let title_text = child_detail.title.to_lowercase();
                        let desc_text = child_detail.description.to_lowercase();

                        let mut matched_keywords = 0;
                        let mut iaf_match = false;
                        let mut nace_match = false;
                        let mut nace_child_match = false;
                        let mut title_match = false;
                        let mut desc_match = false;

                        for keyword in keywords {
                            // An empty keyword (whole-query fallback on a
                            // blank query) matches nothing.
                            if keyword.is_empty() {
                                continue;
                            }
                            if iaf_text.contains(keyword) {
                                iaf_match = true;
                                matched_keywords += 1;
                            } else if nace_text.contains(keyword) {
                                nace_match = true;
                                matched_keywords += 1;
                            } else if nace_child_text.contains(keyword) {
                                nace_child_match = true;
                                matched_keywords += 1;
                            } else if title_text.contains(keyword) {
                                title_match = true;
                                matched_keywords += 1;
                            } else if desc_text.contains(keyword) {
                                desc_match = true;
                                matched_keywords += 1;
                            }
                        }

                        if matched_keywords == 0 {
                            continue;
                        }

                        let relevance_score = (if iaf_match { IAF_WEIGHT } else { 0 })
                            + (if nace_match { NACE_WEIGHT } else { 0 })
                            + (if nace_child_match { NACE_CHILD_WEIGHT } else { 0 })
                            + (if title_match { TITLE_WEIGHT } else { 0 })
                            + (if desc_match { DESCRIPTION_WEIGHT } else { 0 })
                            + matched_keywords * KEYWORD_BONUS;

                        results.push(MatchRecord {
                            scope_key: scope_key.clone(),
                            iaf_code: iaf_scope.iaf_code.clone(),
                            nace_code: nace.code.clone(),
                            nace_child_code: nace_child.code.clone(),
                            nace_child_detail_code: child_detail.code.clone(),
                            relevance_score,
                        });
                    }
                }
            }
        }
    }

    results
}
