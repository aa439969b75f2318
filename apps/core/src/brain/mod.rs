//! # Brain Module
//!
//! Fast, rule-based intent resolution for the KNS College chatbot.
//! Matches a visitor message against the programme catalog and the FAQ set.
//!
//! ## Components
//! - `normalizer`: lowercase/trim and stopword-stripped views of a message
//! - `patterns`: escaped word-boundary matchers for keywords
//! - `intent`: programme-availability detection (regex patterns + catalog keywords)
//! - `resolver`: staged programme lookup
//! - `matcher`: weighted FAQ scoring with canned-phrase fallback
//! - `analyzer`: main orchestrator

pub mod analyzer;
pub mod intent;
pub mod matcher;
pub mod normalizer;
pub mod patterns;
pub mod resolver;

pub use analyzer::{ChatBrain, ProgrammeResolution, Resolution};
pub use matcher::{match_faq, score_faqs, MatchCandidate};
pub use normalizer::{normalize, Query};
pub use resolver::resolve_programme;
