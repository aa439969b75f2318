use std::io;
use thiserror::Error;

use crate::knowledge::KnowledgeError;

/// Application-wide error type, consolidating all possible errors into a single enum.
///
/// Resolving a visitor's question never produces one of these: "no match" is a regular
/// outcome. Errors only come out of start-up (configuration, knowledge loading) and the
/// best-effort transcript path.
#[derive(Debug, Error)]
pub enum AppError {
    /// Represents standard input/output errors.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The knowledge base violated one of its construction invariants.
    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] KnowledgeError),

    /// Represents data validation errors (e.g., malformed knowledge file).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., unparsable environment variables).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A transcript sink could not store an entry.
    #[error("Transcript error: {0}")]
    Transcript(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
