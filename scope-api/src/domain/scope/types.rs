//! Core types for the scope determination domain.
//!
//! The reference dataset is a five-level hierarchy keyed by a scope
//! identifier (one certification standard's classification tree):
//! scope entry → IAF scope → NACE detail → NACE child → child detail.
//! Wire field names follow the upstream dataset documents.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// A full dataset variant: scope key → classification tree.
pub type ScopeData = BTreeMap<String, ScopeEntry>;

/// One certification standard's scope set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeEntry {
    /// Standard name, e.g. "ISO 9001:2015"
    pub standar: String,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub scope: Vec<IafScope>,
}

/// Top-level industry grouping (IAF sector code embedded in the label).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IafScope {
    #[serde(rename = "IAF_CODE")]
    pub iaf_code: String,
    #[serde(
        rename = "NACE_DETAIL_INFORMATION",
        default,
        deserialize_with = "lenient_seq"
    )]
    pub nace_details: Vec<NaceDetail>,
}

/// A NACE code with its subdivisions. Entries without a `NACE` object are
/// kept at load time and skipped during traversal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaceDetail {
    #[serde(rename = "NACE", default, skip_serializing_if = "Option::is_none")]
    pub nace: Option<Nace>,
    #[serde(rename = "NACE_CHILD", default, deserialize_with = "lenient_seq")]
    pub children: Vec<NaceChild>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Nace {
    pub code: String,
    #[serde(rename = "nace_description")]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaceChild {
    pub code: String,
    #[serde(rename = "nace_child_title")]
    pub title: String,
    #[serde(rename = "nace_child_detail", default, deserialize_with = "lenient_seq")]
    pub details: Vec<ChildDetail>,
}

/// Leaf classification unit, the most granular level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildDetail {
    pub code: String,
    pub title: String,
    #[serde(rename = "nace_child_detail_description")]
    pub description: String,
}

/// Deserialize a child sequence leniently: absent, null or non-array values
/// become an empty sequence, and elements that fail to deserialize are
/// dropped. This normalizes the dataset once at load time so the traversal
/// needs no per-access guards.
fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(items) = value else {
        return Ok(Vec::new());
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

/// A flat match produced by the deterministic matcher. References a single
/// leaf by the codes of its enclosing levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRecord {
    pub scope_key: String,
    pub iaf_code: String,
    pub nace_code: String,
    pub nace_child_code: String,
    pub nace_child_detail_code: String,
    pub relevance_score: i32,
}

/// Grouper input: a match with optional level codes. Deterministic matches
/// always carry every code; AI-declared hits may omit any of them, and an
/// absent code leaves that level unconstrained.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchCandidate {
    pub scope_key: String,
    #[serde(default)]
    pub iaf_code: Option<String>,
    #[serde(default)]
    pub nace_code: Option<String>,
    #[serde(default)]
    pub nace_child_code: Option<String>,
    #[serde(default)]
    pub nace_child_detail_code: Option<String>,
    #[serde(default)]
    pub relevance_score: i32,
}

impl From<MatchRecord> for MatchCandidate {
    fn from(record: MatchRecord) -> Self {
        Self {
            scope_key: record.scope_key,
            iaf_code: Some(record.iaf_code),
            nace_code: Some(record.nace_code),
            nace_child_code: Some(record.nace_child_code),
            nace_child_detail_code: Some(record.nace_child_detail_code),
            relevance_score: record.relevance_score,
        }
    }
}

/// A grouped search result: one card per (scope, IAF, NACE, NACE child)
/// composite key, carrying every detail entry under that NACE child.
#[derive(Debug, Clone, Serialize)]
pub struct ResultCard {
    pub scope_key: String,
    pub standar: String,
    pub iaf_code: String,
    pub nace: NaceSummary,
    pub nace_child: NaceChildSummary,
    pub nace_child_details: Vec<DetailEntry>,
    pub relevance_score: i32,
}

#[derive(Debug, Clone, Serialize)]
pub struct NaceSummary {
    pub code: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NaceChildSummary {
    pub code: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailEntry {
    pub code: String,
    pub title: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lenient_seq_defaults_missing_children() {
        let entry: ScopeEntry = serde_json::from_value(serde_json::json!({
            "standar": "ISO 9001:2015"
        }))
        .unwrap();
        assert!(entry.scope.is_empty());
    }

    #[test]
    fn lenient_seq_tolerates_non_array() {
        let iaf: IafScope = serde_json::from_value(serde_json::json!({
            "IAF_CODE": "Construction (28)",
            "NACE_DETAIL_INFORMATION": "not an array"
        }))
        .unwrap();
        assert!(iaf.nace_details.is_empty());
    }

    #[test]
    fn lenient_seq_drops_malformed_elements() {
        let child: NaceChild = serde_json::from_value(serde_json::json!({
            "code": "41.2",
            "nace_child_title": "Construction of buildings",
            "nace_child_detail": [
                {
                    "code": "41.20",
                    "title": "Construction of buildings",
                    "nace_child_detail_description": "All types of buildings."
                },
                42,
                { "code": "41.21" }
            ]
        }))
        .unwrap();
        assert_eq!(child.details.len(), 1);
        assert_eq!(child.details[0].code, "41.20");
    }

    #[test]
    fn nace_detail_without_nace_object() {
        let detail: NaceDetail = serde_json::from_value(serde_json::json!({
            "NACE_CHILD": []
        }))
        .unwrap();
        assert!(detail.nace.is_none());
    }

    #[test]
    fn ai_hit_deserializes_with_missing_codes() {
        let candidate: MatchCandidate = serde_json::from_value(serde_json::json!({
            "scope_key": "scope_9001_2015",
            "iaf_code": "Pertanian, Kehutanan, dan Perikanan (01)",
            "relevance_score": 95
        }))
        .unwrap();
        assert_eq!(candidate.scope_key, "scope_9001_2015");
        assert!(candidate.nace_code.is_none());
        assert_eq!(candidate.relevance_score, 95);
    }

    #[test]
    fn match_record_into_candidate_keeps_all_codes() {
        let record = MatchRecord {
            scope_key: "scope_9001_2015".to_string(),
            iaf_code: "Information Technology (33)".to_string(),
            nace_code: "62".to_string(),
            nace_child_code: "62.0".to_string(),
            nace_child_detail_code: "62.01".to_string(),
            relevance_score: 50,
        };

        let candidate = MatchCandidate::from(record);
        assert_eq!(candidate.iaf_code.as_deref(), Some("Information Technology (33)"));
        assert_eq!(candidate.nace_child_detail_code.as_deref(), Some("62.01"));
        assert_eq!(candidate.relevance_score, 50);
    }
}
