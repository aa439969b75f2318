//! Text normalization.
//!
//! Produces the two views of a visitor message the matchers work on: the lowercased,
//! trimmed text and the same text with question words and other filler removed.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Question words, pronouns, articles and common prepositions/auxiliaries.
const STOPWORDS: &[&str] = &[
    "what", "where", "when", "who", "why", "how", "is", "are", "do", "does", "can", "could",
    "will", "would", "should", "tell", "give", "show", "explain", "i", "me", "my", "you", "your",
    "we", "our", "the", "a", "an", "to", "for", "of", "in", "on", "at", "with", "about",
];

static STOPWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\b({})\b", STOPWORDS.join("|"))).expect("Invalid regex: stopwords")
});

/// One visitor message and its normalized forms. Lives for a single turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Query {
    /// The message as typed.
    pub raw: String,
    /// Lowercased and trimmed.
    pub lower: String,
    /// `lower` without stopwords, whitespace collapsed.
    pub cleaned: String,
}

impl Query {
    pub fn new(raw: &str) -> Self {
        let lower = raw.to_lowercase().trim().to_string();
        let stripped = STOPWORD_PATTERN.replace_all(&lower, "");
        let cleaned = collapse_whitespace(&stripped);
        Self {
            raw: raw.to_string(),
            lower,
            cleaned,
        }
    }

    /// True for empty or whitespace-only input.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty()
    }

    /// Whether `needle` occurs in either normalized view.
    pub fn contains(&self, needle: &str) -> bool {
        self.lower.contains(needle) || self.cleaned.contains(needle)
    }
}

/// Normalize a raw message. Total: empty input yields empty views.
pub fn normalize(raw: &str) -> Query {
    Query::new(raw)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
