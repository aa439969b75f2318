// KNS College chatbot - terminal front end

use anyhow::Context;
use std::io::Write;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use knsbot_core::composer::{MessageBody, ResponseComposer};
use knsbot_core::config::AppConfig;
use knsbot_core::conversation::{ChatSession, MessageSink, TracingTranscript};
use knsbot_core::telemetry::init_tracing;
use knsbot_core::{ChatBrain, KnowledgeBase};

const QUIT_COMMAND: &str = "/quit";

/// Prints bot messages to stdout.
struct ConsoleSink;

impl MessageSink for ConsoleSink {
    fn display(&mut self, message: &MessageBody) {
        let mut out = std::io::stdout().lock();
        let written = match message {
            MessageBody::Text(text) => writeln!(out, "bot> {}", text),
            MessageBody::QuickReplies(questions) => questions
                .iter()
                .try_for_each(|q| writeln!(out, "     [{}]", q)),
        };
        if written.and_then(|_| out.flush()).is_err() {
            tracing::warn!("Failed to write to stdout");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    init_tracing(config.log_format)?;

    let knowledge = match &config.knowledge_path {
        Some(path) => KnowledgeBase::from_file(path)
            .with_context(|| format!("failed to load knowledge file {}", path.display()))?,
        None => KnowledgeBase::builtin().context("failed to load built-in knowledge")?,
    };
    info!(
        programmes = knowledge.programme_count(),
        faqs = knowledge.faq_count(),
        "Knowledge base ready"
    );

    let brain = ChatBrain::with_settings(
        Arc::new(knowledge),
        config.match_weights.clone(),
        config.resolver.clone(),
    );
    let composer = ResponseComposer::new(config.timing());
    let session = ChatSession::new(brain, composer, Arc::new(TracingTranscript));
    info!(session_id = %session.id(), "Session started");

    let mut sink = ConsoleSink;
    session.greet(&mut sink).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line == QUIT_COMMAND {
            break;
        }
        session.turn(line, &mut sink).await;
    }

    info!(session_id = %session.id(), "Session ended");
    Ok(())
}
