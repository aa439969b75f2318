//! Chat brain - main orchestrator for the brain module.
//!
//! Runs the per-turn control flow: programme-availability questions go to the programme
//! resolver, everything else to the FAQ matcher. All entry points are synchronous and pure
//! over the shared, read-only knowledge base.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::intent::{extract_residual, is_availability_query};
use super::matcher::match_faq;
use super::resolver::resolve_programme;
use crate::config::{MatchWeights, ResolverSettings};
use crate::knowledge::{FaqEntry, KnowledgeBase, ProgrammeEntry};

/// Outcome of programme-intent resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "matched", rename_all = "snake_case")]
pub enum ProgrammeResolution<'kb> {
    /// The message asks about a programme and the catalog has it.
    Matched { entry: &'kb ProgrammeEntry },
    /// The message asks about a programme the catalog does not have.
    Unmatched { attempted_query: String },
    /// The message is not a programme-availability question.
    NotProgrammeQuery,
}

/// Outcome of one full turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Resolution<'kb> {
    Programme { entry: &'kb ProgrammeEntry },
    ProgrammeNotFound { query: String },
    Faq { entry: &'kb FaqEntry },
    NoMatch,
}

/// Intent-resolution engine over a shared knowledge base.
#[derive(Debug, Clone)]
pub struct ChatBrain {
    knowledge: Arc<KnowledgeBase>,
    weights: MatchWeights,
    resolver: ResolverSettings,
}

impl ChatBrain {
    /// Create a brain with the default weights and resolver settings.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self::with_settings(knowledge, MatchWeights::default(), ResolverSettings::default())
    }

    pub fn with_settings(
        knowledge: Arc<KnowledgeBase>,
        weights: MatchWeights,
        resolver: ResolverSettings,
    ) -> Self {
        Self {
            knowledge,
            weights,
            resolver,
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Decide whether `text` asks about a programme and, if so, which one.
    pub fn resolve_programme_intent(&self, text: &str) -> ProgrammeResolution<'_> {
        let text = text.trim();
        if text.is_empty() || !is_availability_query(text, &self.knowledge) {
            return ProgrammeResolution::NotProgrammeQuery;
        }

        let residual = extract_residual(text);
        if residual.chars().count() >= self.resolver.min_residual_len {
            return match resolve_programme(&residual, &self.knowledge, &self.resolver) {
                Some(entry) => ProgrammeResolution::Matched { entry },
                None => ProgrammeResolution::Unmatched {
                    attempted_query: residual,
                },
            };
        }

        // Nothing specific left after stripping: try the whole message, otherwise let the
        // FAQ matcher handle generic questions such as "what courses do you offer".
        match resolve_programme(text, &self.knowledge, &self.resolver) {
            Some(entry) => ProgrammeResolution::Matched { entry },
            None => ProgrammeResolution::NotProgrammeQuery,
        }
    }

    /// Best FAQ entry for `text`, or `None`.
    pub fn resolve_faq(&self, text: &str) -> Option<&FaqEntry> {
        match_faq(text, &self.knowledge, &self.weights)
    }

    /// Resolve one visitor message.
    #[instrument(level = "debug", skip(self))]
    pub fn resolve(&self, text: &str) -> Resolution<'_> {
        if text.trim().is_empty() {
            return Resolution::NoMatch;
        }

        let resolution = match self.resolve_programme_intent(text) {
            ProgrammeResolution::Matched { entry } => Resolution::Programme { entry },
            ProgrammeResolution::Unmatched { attempted_query } => {
                Resolution::ProgrammeNotFound {
                    query: attempted_query,
                }
            }
            ProgrammeResolution::NotProgrammeQuery => match self.resolve_faq(text) {
                Some(entry) => Resolution::Faq { entry },
                None => Resolution::NoMatch,
            },
        };

        debug!(?resolution, "Resolved turn");
        resolution
    }
}
