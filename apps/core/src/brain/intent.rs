//! Programme-intent detection using regex patterns.
//!
//! Decides whether a message asks "do you offer X". Fast path only: a fixed set of phrase
//! patterns plus a scan for any catalog keyword in the text.

use regex::Regex;
use std::sync::LazyLock;

use super::normalizer::collapse_whitespace;
use crate::knowledge::KnowledgeBase;

// Compile patterns once at startup
static AVAILABILITY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)do you (offer|have|provide|teach).*?(course|programme|diploma|certificate)")
            .expect("Invalid regex: do-you-offer pattern"),
        Regex::new(r"(?i)is.*?(available|offered|taught)")
            .expect("Invalid regex: is-available pattern"),
        Regex::new(r"(?i)can i (study|learn|take|enroll)")
            .expect("Invalid regex: can-i-study pattern"),
        Regex::new(r"(?i)(course|programme|diploma|certificate).*?(available|offer|have)")
            .expect("Invalid regex: course-then-offer pattern"),
        Regex::new(r"(?i)(available|offer|have).*?(course|programme|diploma|certificate)")
            .expect("Invalid regex: offer-then-course pattern"),
        Regex::new(r"(?i)tell me about.*?(course|programme|diploma|certificate)")
            .expect("Invalid regex: tell-me-about pattern"),
        Regex::new(r"(?i)what.*?(course|programme|diploma|certificate).*?(do you|offer|have)")
            .expect("Invalid regex: what-course pattern"),
    ]
});

/// Availability vocabulary removed when isolating the programme a visitor asks about.
static QUERY_VOCABULARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(do|you|offer|have|provide|teach|is|are|can|i|study|learn|take|enroll|available|offered|taught|course|programme|diploma|certificate|in|for|about|the|a|an|tell|me|what|which)\b",
    )
    .expect("Invalid regex: query vocabulary")
});

/// Whether the text matches one of the availability phrase patterns.
pub fn matches_availability_phrase(raw: &str) -> bool {
    AVAILABILITY_PATTERNS.iter().any(|p| p.is_match(raw))
}

/// Whether any catalog keyword occurs in the lowercased text.
pub fn mentions_catalog_keyword(raw: &str, kb: &KnowledgeBase) -> bool {
    let lower = raw.to_lowercase();
    kb.indexed_programmes()
        .iter()
        .flat_map(|p| p.keywords_lower.iter())
        .any(|keyword| lower.contains(keyword.as_str()))
}

/// True if the message asks whether a programme is available.
pub fn is_availability_query(raw: &str, kb: &KnowledgeBase) -> bool {
    matches_availability_phrase(raw) || mentions_catalog_keyword(raw, kb)
}

/// Strip availability vocabulary from a message, leaving the programme being asked about.
/// Casing of the remaining words is preserved.
pub fn extract_residual(raw: &str) -> String {
    let stripped = QUERY_VOCABULARY.replace_all(raw, " ");
    collapse_whitespace(&stripped)
}
