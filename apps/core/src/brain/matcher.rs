//! FAQ matching.
//!
//! Every FAQ entry is scored against the normalized message. Entries with a whole-word
//! keyword hit ("exact") always beat entries with substring-only hits ("partial"); a
//! partial winner must reach the minimum partial score. When nothing qualifies, a small
//! dictionary of canned phrases maps greetings, thanks and acknowledgements to their
//! entries.

use serde::Serialize;
use tracing::debug;

use super::normalizer::{normalize, Query};
use crate::config::MatchWeights;
use crate::knowledge::{FaqEntry, IndexedFaq, KnowledgeBase};

/// Canned phrase → question label, consulted in order.
pub const CANNED_PHRASES: &[(&str, &str)] = &[
    ("hello", "Greeting"),
    ("hi", "Greeting"),
    ("hey", "Greeting"),
    ("thanks", "Thank you"),
    ("thank you", "Thank you"),
    ("bye", "Goodbye"),
    ("goodbye", "Goodbye"),
    ("okay", "Acknowledgment"),
    ("ok", "Acknowledgment"),
    ("alright", "Acknowledgment"),
    ("sure", "Acknowledgment"),
    ("got it", "Acknowledgment"),
    ("understood", "Acknowledgment"),
    ("fine", "Acknowledgment"),
    ("yes", "Acknowledgment"),
    ("yeah", "Acknowledgment"),
    ("yep", "Acknowledgment"),
    ("yup", "Acknowledgment"),
];

/// A scored FAQ entry from one matching pass.
#[derive(Debug, Clone, Serialize)]
pub struct MatchCandidate<'kb> {
    pub entry: &'kb FaqEntry,
    pub score: u32,
    pub is_exact_match: bool,
}

/// Score every FAQ entry against an already-normalized query, in FAQ order.
pub fn score_faqs<'kb>(
    query: &Query,
    kb: &'kb KnowledgeBase,
    weights: &MatchWeights,
) -> Vec<MatchCandidate<'kb>> {
    kb.indexed_faqs()
        .iter()
        .map(|faq| score_entry(query, faq, weights))
        .collect()
}

fn score_entry<'kb>(query: &Query, faq: &'kb IndexedFaq, weights: &MatchWeights) -> MatchCandidate<'kb> {
    let mut score = 0;
    let mut is_exact_match = false;
    let mut keyword_matches = 0;

    for keyword in &faq.keywords {
        if query.contains(&keyword.lower) {
            if keyword.boundary.is_match(&query.lower) || keyword.boundary.is_match(&query.cleaned) {
                score += weights.exact_keyword;
                is_exact_match = true;
            } else {
                score += weights.partial_keyword;
            }
            keyword_matches += 1;
        }

        for part in &keyword.parts {
            if query.contains(part) {
                score += weights.keyword_part;
            }
        }
    }

    if keyword_matches > 1 {
        score += weights.multi_keyword_factor * keyword_matches;
    }

    for word in &faq.question_words {
        if query.contains(word) {
            score += weights.question_word;
        }
    }

    MatchCandidate {
        entry: &faq.entry,
        score,
        is_exact_match,
    }
}

/// Pick the FAQ entry answering `raw`, or `None`.
pub fn match_faq<'kb>(
    raw: &str,
    kb: &'kb KnowledgeBase,
    weights: &MatchWeights,
) -> Option<&'kb FaqEntry> {
    let query = normalize(raw);
    if query.is_empty() {
        return None;
    }

    let candidates = score_faqs(&query, kb, weights);

    let mut best_exact: Option<&MatchCandidate<'kb>> = None;
    let mut best_overall: Option<&MatchCandidate<'kb>> = None;
    for candidate in &candidates {
        if candidate.is_exact_match && best_exact.map_or(true, |b| candidate.score > b.score) {
            best_exact = Some(candidate);
        }
        let best_score = best_overall.map_or(0, |b| b.score);
        if candidate.score > best_score {
            best_overall = Some(candidate);
        }
    }

    if let Some(winner) = best_exact {
        debug!(question = %winner.entry.question, score = winner.score, "FAQ exact match");
        return Some(winner.entry);
    }

    if let Some(winner) = best_overall.filter(|b| b.score >= weights.min_partial_score) {
        debug!(question = %winner.entry.question, score = winner.score, "FAQ partial match");
        return Some(winner.entry);
    }

    let canned = canned_fallback(&query, kb);
    match canned {
        Some(entry) => debug!(question = %entry.question, "FAQ canned-phrase fallback"),
        None => debug!(query = %query.lower, "No FAQ match"),
    }
    canned
}

fn canned_fallback<'kb>(query: &Query, kb: &'kb KnowledgeBase) -> Option<&'kb FaqEntry> {
    CANNED_PHRASES
        .iter()
        .filter(|(phrase, _)| query.lower.contains(*phrase))
        .find_map(|(_, label)| kb.faq_by_question(label))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb(faqs: Vec<FaqEntry>) -> KnowledgeBase {
        KnowledgeBase::new(vec![], faqs).unwrap()
    }

    fn question<'kb>(raw: &str, kb: &'kb KnowledgeBase) -> Option<&'kb str> {
        match_faq(raw, kb, &MatchWeights::default()).map(|f| f.question.as_str())
    }

    #[test]
    fn test_scoring_breakdown() {
        let kb = kb(vec![FaqEntry::new(
            "What are the fees?",
            &["fee", "fees", "how much", "payment plan"],
            "Fees vary.",
        )]);
        let query = normalize("How much are the fees");
        let candidates = score_faqs(&query, &kb, &MatchWeights::default());
        // fee: substring only (5); fees: whole word (10); how much: whole word (10)
        // + part "much" (2); payment plan: nothing
        // 3 keywords matched: +6; question words "what"(no) "fees?"(no)
        assert_eq!(candidates[0].score, 33);
        assert!(candidates[0].is_exact_match);
    }

    #[test]
    fn test_exact_beats_higher_partial() {
        let kb = kb(vec![
            FaqEntry::new("Q1", &["cost"], "a"),
            FaqEntry::new(
                "Q2",
                &[
                    "tuitionf", "uitionfe", "itionfee", "tionfees", "tuitio", "uition", "itionf",
                    "tionfe",
                ],
                "b",
            ),
        ]);
        let query = normalize("tuitionfees cost");
        let candidates = score_faqs(&query, &kb, &MatchWeights::default());
        assert_eq!(candidates[0].score, 10);
        assert!(candidates[0].is_exact_match);
        assert!(candidates[1].score >= 40);
        assert!(!candidates[1].is_exact_match);

        assert_eq!(question("tuitionfees cost", &kb), Some("Q1"));
    }

    #[test]
    fn test_exact_tie_keeps_first_entry() {
        let kb = kb(vec![
            FaqEntry::new("First", &["campus"], "a"),
            FaqEntry::new("Second", &["campus"], "b"),
        ]);
        assert_eq!(question("campus", &kb), Some("First"));
    }

    #[test]
    fn test_partial_threshold() {
        let kb = kb(vec![FaqEntry::new("Q", &["networking"], "a")]);
        // "networking" only as part of a longer word: substring hit, 5 points
        assert_eq!(question("cloudnetworking", &kb), Some("Q"));

        let strict = MatchWeights {
            min_partial_score: 6,
            ..MatchWeights::default()
        };
        assert_eq!(
            match_faq("cloudnetworking", &kb, &strict).map(|f| f.question.as_str()),
            None
        );
    }

    #[test]
    fn test_canned_phrase_fallback() {
        let kb = kb(vec![
            FaqEntry::new("Greeting", &["good morning"], "Hello!"),
            FaqEntry::new("Acknowledgment", &["acknowledged"], "Great!"),
        ]);
        assert_eq!(question("ohhello", &kb), Some("Greeting"));
        assert_eq!(question("yupp", &kb), Some("Acknowledgment"));
        assert_eq!(question("zzz", &kb), None);
    }

    #[test]
    fn test_canned_phrase_skips_missing_label() {
        // "thanks" maps to "Thank you", absent here; "ok" comes later in the dictionary
        let kb = kb(vec![FaqEntry::new("Acknowledgment", &["acknowledged"], "Great!")]);
        assert_eq!(question("thanks, ok", &kb), Some("Acknowledgment"));
    }

    #[test]
    fn test_empty_input_short_circuits() {
        let kb = kb(vec![FaqEntry::new("Greeting", &["hi"], "Hello!")]);
        assert_eq!(question("", &kb), None);
        assert_eq!(question("   ", &kb), None);
    }

    #[test]
    fn test_pattern_special_keyword() {
        let kb = kb(vec![
            FaqEntry::new("What (ISC)² certifications do you offer?", &["(ISC)²", "isc2"], "CC"),
            FaqEntry::new("Other", &["exam"], "x"),
        ]);
        let query = normalize("Do you prepare students for (ISC)² certification?");
        let candidates = score_faqs(&query, &kb, &MatchWeights::default());
        assert!(candidates[0].is_exact_match);
        assert_eq!(
            question("Do you prepare students for (ISC)² certification?", &kb),
            Some("What (ISC)² certifications do you offer?")
        );
    }
}
