//! Keyword extraction for the deterministic matcher.

/// Combined Indonesian and English stopwords. Filtered tokens never reach
/// the matcher.
const STOPWORDS: &[&str] = &[
    // Indonesian
    "yang",
    "dan",
    "atau",
    "adalah",
    "untuk",
    "dari",
    "di",
    "ke",
    "pada",
    "dengan",
    "ini",
    "itu",
    "saya",
    "bergerak",
    "menggunakan",
    "bahan",
    "membuat",
    "melakukan",
    "perusahaan",
    // English
    "the",
    "a",
    "an",
    "and",
    "or",
    "for",
    "of",
    "in",
    "to",
    "on",
    "with",
    "this",
    "that",
    "using",
    "by",
    "as",
    "at",
    "be",
    "we",
    "our",
    "my",
    "create",
    "make",
    "do",
    "have",
    "has",
    "company",
    "business",
];

const MIN_KEYWORD_LEN: usize = 3;

/// Split a query into lowercase search keywords, dropping stopwords and
/// tokens shorter than three characters. Order is preserved and duplicates
/// are kept. When everything is filtered out, the whole lowercased, trimmed
/// query is used as a single keyword so at least one term is always tried.
pub fn extract_keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let trimmed = lowered.trim();

    let keywords: Vec<String> = trimmed
        .split_whitespace()
        .filter(|word| word.len() >= MIN_KEYWORD_LEN && !STOPWORDS.contains(word))
        .map(str::to_string)
        .collect();

    if keywords.is_empty() {
        vec![trimmed.to_string()]
    } else {
        keywords
    }
}
