//! Result grouping.
//!
//! Flat matches are aggregated into cards keyed by the upper four hierarchy
//! levels (scope, IAF, NACE, NACE child); that composite key is never split
//! further. The deterministic path and the AI-fallback path share this one
//! function, differing only in how an IAF code is matched against the
//! dataset label.

use std::collections::HashMap;

use super::types::{
    DetailEntry, MatchCandidate, NaceChildSummary, NaceSummary, ResultCard, ScopeData,
};

/// Strategy for matching a candidate's IAF code against a dataset label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IafMatch {
    /// Exact label equality (deterministic matches carry the dataset label
    /// verbatim).
    Exact,
    /// Substring containment after stripping the candidate's trailing
    /// parenthetical at the first `(` and trimming. Compensates for the AI
    /// echoing a shortened label like "Pertanian (01)". The boundary rules
    /// are kept exactly as observed and may not hold for labels whose
    /// parenthetical is not trailing.
    Lenient,
}

impl IafMatch {
    fn matches(self, dataset_label: &str, candidate_code: &str) -> bool {
        match self {
            IafMatch::Exact => dataset_label == candidate_code,
            IafMatch::Lenient => {
                let stripped = candidate_code
                    .split('(')
                    .next()
                    .unwrap_or(candidate_code)
                    .trim();
                dataset_label.contains(stripped)
            }
        }
    }
}

/// Aggregate matches into result cards.
///
/// The caller is expected to pre-sort `matches` by descending relevance;
/// this function does not re-sort. Cards appear in first-encounter order.
/// Every detail of a matched NACE child is included on its card, with the
/// targeted detail code (when present) moved to the front, and duplicate
/// detail codes skipped. Cards that end up without details are dropped.
pub fn group_matches(
    data: &ScopeData,
    matches: &[MatchCandidate],
    iaf_match: IafMatch,
) -> Vec<ResultCard> {
    let mut cards: Vec<ResultCard> = Vec::new();
    let mut card_index: HashMap<String, usize> = HashMap::new();

    for candidate in matches {
        let Some(entry) = data.get(&candidate.scope_key) else {
            continue;
        };

        for iaf_scope in &entry.scope {
            if let Some(code) = &candidate.iaf_code {
                if !iaf_match.matches(&iaf_scope.iaf_code, code) {
                    continue;
                }
            }

            for nace_detail in &iaf_scope.nace_details {
                let Some(nace) = &nace_detail.nace else {
                    continue;
                };
                if let Some(code) = &candidate.nace_code {
                    if &nace.code != code {
                        continue;
                    }
                }

                for nace_child in &nace_detail.children {
                    if let Some(code) = &candidate.nace_child_code {
                        if &nace_child.code != code {
                            continue;
                        }
                    }

                    let group_key = format!(
                        "{}|{}|{}|{}",
                        candidate.scope_key, iaf_scope.iaf_code, nace.code, nace_child.code
                    );

                    let card_pos = *card_index.entry(group_key).or_insert_with(|| {
                        cards.push(ResultCard {
                            scope_key: candidate.scope_key.clone(),
                            standar: entry.standar.clone(),
                            iaf_code: iaf_scope.iaf_code.clone(),
                            nace: NaceSummary {
                                code: nace.code.clone(),
                                description: nace.description.clone(),
                            },
                            nace_child: NaceChildSummary {
                                code: nace_child.code.clone(),
                                title: nace_child.title.clone(),
                            },
                            nace_child_details: Vec::new(),
                            relevance_score: candidate.relevance_score,
                        });
                        cards.len() - 1
                    });

                    // Targeted detail first, remaining order preserved
                    let mut details: Vec<_> = nace_child.details.iter().collect();
                    if let Some(target) = &candidate.nace_child_detail_code {
                        details.sort_by_key(|detail| &detail.code != target);
                    }

                    let card = &mut cards[card_pos];
                    for detail in details {
                        let already_present = card
                            .nace_child_details
                            .iter()
                            .any(|existing| existing.code == detail.code);
                        if !already_present {
                            card.nace_child_details.push(DetailEntry {
                                code: detail.code.clone(),
                                title: detail.title.clone(),
                                description: detail.description.clone(),
                            });
                        }
                    }
                }
            }
        }
    }

    cards
        .into_iter()
        .filter(|card| !card.nace_child_details.is_empty())
        .collect()
}
