//! # Knowledge Module
//!
//! The programme catalog and FAQ set the chatbot answers from. Built once at start-up,
//! read-only afterwards, and shared between sessions behind an `Arc`.
//!
//! Construction validates the invariants the matchers rely on and precomputes the
//! lowercase forms and word-boundary matchers of every keyword, so nothing on the query
//! path can fail.

pub mod loader;
pub mod models;

use regex::Regex;
use std::collections::HashSet;
use thiserror::Error;

use crate::brain::patterns::compile_word_boundary;

pub use loader::KnowledgeFile;
pub use models::{FaqEntry, ProgrammeEntry, ProgrammeType};

/// Knowledge base construction failures.
#[derive(Debug, Error)]
pub enum KnowledgeError {
    #[error("programme has no keywords: {0}")]
    ProgrammeWithoutKeywords(String),

    #[error("FAQ entry has no keywords: {0}")]
    FaqWithoutKeywords(String),

    #[error("blank keyword in entry: {0}")]
    BlankKeyword(String),

    #[error("duplicate programme name: {0}")]
    DuplicateProgramme(String),

    #[error("duplicate FAQ question label: {0}")]
    DuplicateQuestion(String),

    #[error("cannot build word-boundary matcher for keyword {keyword:?}: {source}")]
    Pattern {
        keyword: String,
        #[source]
        source: regex::Error,
    },
}

/// Programme entry plus its lowercase forms.
#[derive(Debug)]
pub(crate) struct IndexedProgramme {
    pub(crate) entry: ProgrammeEntry,
    pub(crate) name_lower: String,
    pub(crate) keywords_lower: Vec<String>,
}

/// A single FAQ keyword ready for scoring.
#[derive(Debug)]
pub(crate) struct IndexedKeyword {
    pub(crate) lower: String,
    pub(crate) boundary: Regex,
    /// Space-separated parts longer than three characters, only for multi-part keywords.
    pub(crate) parts: Vec<String>,
}

/// FAQ entry plus its scoring material.
#[derive(Debug)]
pub(crate) struct IndexedFaq {
    pub(crate) entry: FaqEntry,
    pub(crate) keywords: Vec<IndexedKeyword>,
    /// Words of the lowercased question label longer than three characters.
    pub(crate) question_words: Vec<String>,
}

/// Immutable programme catalog and FAQ set.
#[derive(Debug)]
pub struct KnowledgeBase {
    programmes: Vec<IndexedProgramme>,
    faqs: Vec<IndexedFaq>,
}

impl KnowledgeBase {
    /// Validate and index a catalog and an FAQ set. Iteration order of both is preserved
    /// and drives every tie-break.
    pub fn new(
        programmes: Vec<ProgrammeEntry>,
        faqs: Vec<FaqEntry>,
    ) -> Result<Self, KnowledgeError> {
        let mut names = HashSet::new();
        let mut indexed_programmes = Vec::with_capacity(programmes.len());
        for entry in programmes {
            if entry.keywords.is_empty() {
                return Err(KnowledgeError::ProgrammeWithoutKeywords(entry.name));
            }
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(KnowledgeError::BlankKeyword(entry.name));
            }
            if !names.insert(entry.name.clone()) {
                return Err(KnowledgeError::DuplicateProgramme(entry.name));
            }
            indexed_programmes.push(IndexedProgramme {
                name_lower: entry.name.to_lowercase(),
                keywords_lower: entry.keywords.iter().map(|k| k.to_lowercase()).collect(),
                entry,
            });
        }

        let mut questions = HashSet::new();
        let mut indexed_faqs = Vec::with_capacity(faqs.len());
        for entry in faqs {
            if entry.keywords.is_empty() {
                return Err(KnowledgeError::FaqWithoutKeywords(entry.question));
            }
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(KnowledgeError::BlankKeyword(entry.question));
            }
            if !questions.insert(entry.question.clone()) {
                return Err(KnowledgeError::DuplicateQuestion(entry.question));
            }
            indexed_faqs.push(index_faq(entry)?);
        }

        Ok(Self {
            programmes: indexed_programmes,
            faqs: indexed_faqs,
        })
    }

    pub fn programmes(&self) -> impl Iterator<Item = &ProgrammeEntry> {
        self.programmes.iter().map(|p| &p.entry)
    }

    pub fn faqs(&self) -> impl Iterator<Item = &FaqEntry> {
        self.faqs.iter().map(|f| &f.entry)
    }

    pub fn programme_count(&self) -> usize {
        self.programmes.len()
    }

    pub fn faq_count(&self) -> usize {
        self.faqs.len()
    }

    pub fn programme_by_name(&self, name: &str) -> Option<&ProgrammeEntry> {
        self.programmes().find(|p| p.name == name)
    }

    pub fn faq_by_question(&self, question: &str) -> Option<&FaqEntry> {
        self.faqs().find(|f| f.question == question)
    }

    pub(crate) fn indexed_programmes(&self) -> &[IndexedProgramme] {
        &self.programmes
    }

    pub(crate) fn indexed_faqs(&self) -> &[IndexedFaq] {
        &self.faqs
    }
}

fn index_faq(entry: FaqEntry) -> Result<IndexedFaq, KnowledgeError> {
    let mut keywords = Vec::with_capacity(entry.keywords.len());
    for keyword in &entry.keywords {
        let lower = keyword.to_lowercase();
        let boundary = compile_word_boundary(&lower).map_err(|source| KnowledgeError::Pattern {
            keyword: keyword.clone(),
            source,
        })?;
        let parts = if lower.chars().count() > 3 && lower.split_whitespace().count() > 1 {
            lower
                .split_whitespace()
                .filter(|part| part.chars().count() > 3)
                .map(str::to_string)
                .collect()
        } else {
            Vec::new()
        };
        keywords.push(IndexedKeyword {
            lower,
            boundary,
            parts,
        });
    }

    let question_words = entry
        .question
        .to_lowercase()
        .split_whitespace()
        .filter(|w| w.chars().count() > 3)
        .map(str::to_string)
        .collect();

    Ok(IndexedFaq {
        keywords,
        question_words,
        entry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faq(question: &str, keywords: &[&str]) -> FaqEntry {
        FaqEntry::new(question, keywords, "answer")
    }

    #[test]
    fn test_rejects_faq_without_keywords() {
        let err = KnowledgeBase::new(vec![], vec![faq("Empty", &[])]).unwrap_err();
        assert!(matches!(err, KnowledgeError::FaqWithoutKeywords(ref q) if q == "Empty"));
    }

    #[test]
    fn test_rejects_programme_without_keywords() {
        let programme =
            ProgrammeEntry::new("Nothing", ProgrammeType::Certificate, "1 Week", "Online", &[]);
        let err = KnowledgeBase::new(vec![programme], vec![]).unwrap_err();
        assert!(matches!(err, KnowledgeError::ProgrammeWithoutKeywords(_)));
    }

    #[test]
    fn test_rejects_blank_keyword() {
        let err = KnowledgeBase::new(vec![], vec![faq("Blank", &["fees", "  "])]).unwrap_err();
        assert!(matches!(err, KnowledgeError::BlankKeyword(_)));
    }

    #[test]
    fn test_rejects_duplicate_programme_name() {
        let p = ProgrammeEntry::new(
            "Data Analyst",
            ProgrammeType::Certificate,
            "12 Weeks",
            "Hybrid",
            &["data"],
        );
        let err = KnowledgeBase::new(vec![p.clone(), p], vec![]).unwrap_err();
        assert!(matches!(err, KnowledgeError::DuplicateProgramme(_)));
    }

    #[test]
    fn test_rejects_duplicate_question() {
        let faqs = vec![faq("Greeting", &["hi"]), faq("Greeting", &["hey"])];
        let err = KnowledgeBase::new(vec![], faqs).unwrap_err();
        assert!(matches!(err, KnowledgeError::DuplicateQuestion(_)));
    }

    #[test]
    fn test_keyword_parts_only_for_multi_part_keywords() {
        let kb = KnowledgeBase::new(
            vec![],
            vec![faq("What are the fees?", &["fees", "payment plan", "how much"])],
        )
        .unwrap();
        let indexed = &kb.indexed_faqs()[0];
        assert!(indexed.keywords[0].parts.is_empty());
        assert_eq!(indexed.keywords[1].parts, vec!["payment", "plan"]);
        // "how" is too short to count as a part
        assert_eq!(indexed.keywords[2].parts, vec!["much"]);
        assert_eq!(indexed.question_words, vec!["what", "fees?"]);
    }

    #[test]
    fn test_preserves_order() {
        let kb = KnowledgeBase::new(
            vec![],
            vec![faq("B", &["b"]), faq("A", &["a"]), faq("C", &["c"])],
        )
        .unwrap();
        let order: Vec<&str> = kb.faqs().map(|f| f.question.as_str()).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }
}
