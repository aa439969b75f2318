//! Word-boundary matchers built from literal keywords.
//!
//! Keywords are data, not patterns: every metacharacter is escaped before a keyword is
//! embedded in a regex.

use regex::Regex;
use std::sync::LazyLock;

static WORD_CHAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w$").expect("Invalid regex: word character"));

/// Escape a literal so it matches itself inside a regex.
pub fn escape_pattern(literal: &str) -> String {
    regex::escape(literal)
}

fn is_word_char(c: char) -> bool {
    let mut buf = [0u8; 4];
    WORD_CHAR.is_match(c.encode_utf8(&mut buf))
}

/// Case-insensitive pattern matching `keyword` as a whole word.
///
/// A `\b` anchor is only placed on a side whose edge character is a word character; an
/// anchor next to punctuation would demand a word character outside the keyword.
pub fn word_boundary_pattern(keyword: &str) -> String {
    let lead = match keyword.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    };
    let trail = match keyword.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    };
    format!("(?i){}{}{}", lead, escape_pattern(keyword), trail)
}

pub fn compile_word_boundary(keyword: &str) -> Result<Regex, regex::Error> {
    Regex::new(&word_boundary_pattern(keyword))
}
