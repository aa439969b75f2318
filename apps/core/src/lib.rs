//! KNS College chatbot core.
//!
//! Answers visitor questions from a fixed knowledge base: programme-availability
//! questions are resolved against the programme catalog, everything else is scored
//! against the FAQ set. See [`brain::ChatBrain`] for the resolution entry point and
//! [`conversation::ChatSession`] for a paced, transcript-recording session.

pub mod brain;
pub mod composer;
pub mod config;
pub mod conversation;
pub mod error;
pub mod knowledge;
pub mod telemetry;

pub use brain::{ChatBrain, ProgrammeResolution, Resolution};
pub use composer::{MessageBody, ResponseCategory, ResponseComposer, ResponseTiming, ScheduledMessage};
pub use config::{AppConfig, MatchWeights, ResolverSettings};
pub use conversation::{ChatSession, MessageSink, TranscriptSink};
pub use error::AppError;
pub use knowledge::{FaqEntry, KnowledgeBase, ProgrammeEntry, ProgrammeType};

#[cfg(test)]
mod tests;
