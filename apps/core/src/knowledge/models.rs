use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of academic offering in the programme catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgrammeType {
    Diploma,
    Certificate,
}

impl ProgrammeType {
    /// Label used when describing the programme to a visitor.
    pub fn display_label(&self) -> &'static str {
        match self {
            ProgrammeType::Diploma => "Diploma programme",
            ProgrammeType::Certificate => "Certificate programme",
        }
    }
}

impl fmt::Display for ProgrammeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgrammeType::Diploma => write!(f, "diploma"),
            ProgrammeType::Certificate => write!(f, "certificate"),
        }
    }
}

/// An entry of the programme catalog. Identity is `name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammeEntry {
    /// Unique display name, e.g. "Diploma in Cybersecurity".
    pub name: String,
    /// Diploma or certificate.
    #[serde(rename = "type")]
    pub programme_type: ProgrammeType,
    /// Free-text duration label ("2 Years", "12 Weeks").
    pub duration: String,
    /// Free-text delivery mode label ("Online / Hybrid").
    pub mode: String,
    /// Keywords associated with the programme. Order matters for tie-breaking.
    pub keywords: Vec<String>,
}

impl ProgrammeEntry {
    pub fn new(
        name: impl Into<String>,
        programme_type: ProgrammeType,
        duration: impl Into<String>,
        mode: impl Into<String>,
        keywords: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            programme_type,
            duration: duration.into(),
            mode: mode.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// A frequently-asked question with its trigger keywords and canned answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaqEntry {
    /// Canonical question label. Unique within the set; also the lookup key of the
    /// canned-phrase fallback.
    pub question: String,
    /// Trigger keywords.
    pub keywords: Vec<String>,
    /// Display payload, may contain simple inline markup.
    pub answer: String,
}

impl FaqEntry {
    pub fn new(question: impl Into<String>, keywords: &[&str], answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            answer: answer.into(),
        }
    }
}
