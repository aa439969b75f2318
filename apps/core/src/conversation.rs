//! Conversation driver.
//!
//! A [`ChatSession`] ties the brain and the composer to an output surface. Resolution is
//! synchronous; only the pacing of the reply and the transcript writes are asynchronous.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::time::{sleep_until, Instant};
use tracing::{info, warn};
use uuid::Uuid;

use crate::brain::ChatBrain;
use crate::composer::{MessageBody, ResponseComposer, ScheduledMessage};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One line of a conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub session_id: Uuid,
    pub sender: Sender,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    pub fn new(session_id: Uuid, sender: Sender, message: impl Into<String>) -> Self {
        Self {
            session_id,
            sender,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Best-effort storage for conversation lines.
///
/// Callers never wait on a sink and never show its failures to the visitor.
#[async_trait]
pub trait TranscriptSink: Send + Sync + 'static {
    async fn record(&self, entry: TranscriptEntry) -> Result<(), AppError>;
}

/// Writes transcript lines to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingTranscript;

#[async_trait]
impl TranscriptSink for TracingTranscript {
    async fn record(&self, entry: TranscriptEntry) -> Result<(), AppError> {
        info!(
            session_id = %entry.session_id,
            sender = ?entry.sender,
            timestamp = %entry.timestamp,
            message = %entry.message,
            "Transcript"
        );
        Ok(())
    }
}

/// Keeps transcript lines in memory.
#[derive(Debug, Default)]
pub struct MemoryTranscript {
    entries: Mutex<Vec<TranscriptEntry>>,
}

impl MemoryTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<TranscriptEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

#[async_trait]
impl TranscriptSink for MemoryTranscript {
    async fn record(&self, entry: TranscriptEntry) -> Result<(), AppError> {
        self.entries
            .lock()
            .map_err(|e| AppError::Transcript(e.to_string()))?
            .push(entry);
        Ok(())
    }
}

/// Output surface of a chat session.
pub trait MessageSink {
    fn display(&mut self, message: &MessageBody);
}

/// One visitor's conversation.
pub struct ChatSession {
    id: Uuid,
    brain: ChatBrain,
    composer: ResponseComposer,
    transcript: Arc<dyn TranscriptSink>,
}

impl ChatSession {
    pub fn new(
        brain: ChatBrain,
        composer: ResponseComposer,
        transcript: Arc<dyn TranscriptSink>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            brain,
            composer,
            transcript,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn brain(&self) -> &ChatBrain {
        &self.brain
    }

    /// Resolve `text` and compose the reply. Blank input gets no reply.
    pub fn respond(&self, text: &str) -> Vec<ScheduledMessage> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let resolution = self.brain.resolve(text);
        self.composer.compose(&resolution)
    }

    /// Show the welcome message and the quick questions.
    pub async fn greet<S: MessageSink + ?Sized>(&self, sink: &mut S) {
        let messages = self.composer.welcome();
        self.play(&messages, sink).await;
    }

    /// Handle one visitor message end to end.
    pub async fn turn<S: MessageSink + ?Sized>(&self, text: &str, sink: &mut S) {
        if text.trim().is_empty() {
            return;
        }
        self.record(Sender::User, text);
        let messages = self.respond(text);
        self.play(&messages, sink).await;
    }

    /// Display `messages` at their offsets from now.
    pub async fn play<S: MessageSink + ?Sized>(&self, messages: &[ScheduledMessage], sink: &mut S) {
        let start = Instant::now();
        for message in messages {
            sleep_until(start + message.offset).await;
            sink.display(&message.body);
            if let MessageBody::Text(text) = &message.body {
                self.record(Sender::Bot, text);
            }
        }
    }

    fn record(&self, sender: Sender, message: &str) {
        let transcript = Arc::clone(&self.transcript);
        let entry = TranscriptEntry::new(self.id, sender, message);
        tokio::spawn(async move {
            if let Err(e) = transcript.record(entry).await {
                warn!("Failed to record transcript entry: {}", e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::ResponseTiming;
    use crate::knowledge::{FaqEntry, KnowledgeBase, ProgrammeEntry, ProgrammeType};
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        shown: Vec<(Duration, MessageBody)>,
        start: Option<Instant>,
    }

    impl MessageSink for Recorder {
        fn display(&mut self, message: &MessageBody) {
            let start = *self.start.get_or_insert_with(Instant::now);
            self.shown.push((start.elapsed(), message.clone()));
        }
    }

    struct FailingTranscript;

    #[async_trait]
    impl TranscriptSink for FailingTranscript {
        async fn record(&self, _entry: TranscriptEntry) -> Result<(), AppError> {
            Err(AppError::Transcript("store unavailable".to_string()))
        }
    }

    fn brain() -> ChatBrain {
        let kb = KnowledgeBase::new(
            vec![ProgrammeEntry::new(
                "Diploma in Telecommunications",
                ProgrammeType::Diploma,
                "2 Years",
                "Hybrid",
                &["telecommunications", "telecom"],
            )],
            vec![FaqEntry::new(
                "Greeting",
                &["hello", "hi"],
                "Hello! Welcome.",
            )],
        )
        .unwrap();
        ChatBrain::new(Arc::new(kb))
    }

    async fn settle() {
        for _ in 0..8 {
            tokio::task::yield_now().await;
        }
    }

    #[test]
    fn test_respond_blank_input_is_silent() {
        let session = ChatSession::new(
            brain(),
            ResponseComposer::default(),
            Arc::new(MemoryTranscript::new()),
        );
        assert!(session.respond("").is_empty());
        assert!(session.respond("   \t").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_paces_messages() {
        let session = ChatSession::new(
            brain(),
            ResponseComposer::new(ResponseTiming::default()),
            Arc::new(MemoryTranscript::new()),
        );
        let mut recorder = Recorder {
            start: Some(Instant::now()),
            ..Default::default()
        };

        session.turn("do you offer telecom", &mut recorder).await;

        let offsets: Vec<u128> = recorder.shown.iter().map(|(d, _)| d.as_millis()).collect();
        assert_eq!(offsets, vec![500, 1500]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_turn_records_transcript() {
        let transcript = Arc::new(MemoryTranscript::new());
        let session = ChatSession::new(
            brain(),
            ResponseComposer::default(),
            transcript.clone(),
        );
        let mut recorder = Recorder::default();

        session.turn("hello", &mut recorder).await;
        settle().await;

        let entries = transcript.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].sender, Sender::User);
        assert_eq!(entries[0].message, "hello");
        assert_eq!(entries[1].sender, Sender::Bot);
        assert_eq!(entries[1].message, "Hello! Welcome.");
        assert!(entries.iter().all(|e| e.session_id == session.id()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_turn_records_nothing() {
        let transcript = Arc::new(MemoryTranscript::new());
        let session = ChatSession::new(brain(), ResponseComposer::default(), transcript.clone());
        let mut recorder = Recorder::default();

        session.turn("  ", &mut recorder).await;
        settle().await;

        assert!(recorder.shown.is_empty());
        assert!(transcript.entries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_greet_skips_quick_replies_in_transcript() {
        let transcript = Arc::new(MemoryTranscript::new());
        let session = ChatSession::new(brain(), ResponseComposer::default(), transcript.clone());
        let mut recorder = Recorder::default();

        session.greet(&mut recorder).await;
        settle().await;

        assert_eq!(recorder.shown.len(), 2);
        assert!(matches!(recorder.shown[1].1, MessageBody::QuickReplies(_)));
        assert_eq!(transcript.entries().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transcript_failure_does_not_interrupt() {
        let session = ChatSession::new(
            brain(),
            ResponseComposer::default(),
            Arc::new(FailingTranscript),
        );
        let mut recorder = Recorder::default();

        session.turn("hello", &mut recorder).await;
        settle().await;

        assert_eq!(recorder.shown.len(), 1);
        assert_eq!(
            recorder.shown[0].1,
            MessageBody::Text("Hello! Welcome.".to_string())
        );
    }
}
