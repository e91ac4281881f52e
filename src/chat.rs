//! Interactive chat surface.
//!
//! The conversation history is an explicit, caller-owned, append-only log
//! passed into each turn. [`run_turn`] contains all the turn-handling
//! logic and is testable without a terminal; [`run_repl`] is the thin
//! stdin loop around it.

use crate::cli::output::Output;
use crate::rag::pipeline::{PipelineOutcome, RagPipeline};
use crate::types::{Message, MessageRole, Result};
use std::io::{self, BufRead, Write};

/// Append-only, role-tagged conversation log.
#[derive(Debug, Default)]
pub struct ChatLog {
    messages: Vec<Message>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Entries are never edited or removed.
    pub fn push(&mut self, role: MessageRole, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Handle one draft: append the user message, run the pipeline, append
/// the assistant's code or a warning when generation was unavailable.
///
/// Never fails; pipeline errors are already folded into the outcome, and
/// the outcome is returned so the caller can decide presentation.
pub async fn run_turn(log: &mut ChatLog, pipeline: &RagPipeline, draft: &str) -> PipelineOutcome {
    log.push(MessageRole::User, draft);

    let outcome = pipeline.generate(draft).await;

    match &outcome {
        PipelineOutcome::Generated { code, .. } => {
            log.push(MessageRole::Assistant, code.clone());
        }
        PipelineOutcome::RetrievalFailed { reason }
        | PipelineOutcome::GenerationFailed { reason, .. } => {
            log.push(
                MessageRole::Assistant,
                format!("Could not generate code: {}", reason),
            );
        }
    }

    outcome
}

/// Interactive loop: read drafts from stdin until EOF or `exit`/`quit`.
pub async fn run_repl(pipeline: &RagPipeline, out: &Output) -> Result<()> {
    let mut log = ChatLog::new();
    let stdin = io::stdin();

    out.info("Enter a protocol draft, or 'exit' to leave.");

    loop {
        print!("draft> ");
        io::stdout().flush().ok();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                out.error(&format!("Failed to read input: {}", e));
                break;
            }
        }

        let draft = line.trim();
        if draft.is_empty() {
            continue;
        }
        if draft == "exit" || draft == "quit" {
            break;
        }

        let outcome = run_turn(&mut log, pipeline, draft).await;

        match &outcome {
            PipelineOutcome::Generated { code, context } => {
                out.info(&format!("{} context chunk(s) used", context.len()));
                out.code_block(code);
            }
            PipelineOutcome::RetrievalFailed { reason } => {
                out.warning(&format!(
                    "Could not retrieve context ({}). Is the knowledge base indexed?",
                    reason
                ));
            }
            PipelineOutcome::GenerationFailed { reason, .. } => {
                out.warning(&format!(
                    "Could not generate code ({}). Check your Ollama server and model.",
                    reason
                ));
            }
        }
    }

    out.info(&format!("Session ended after {} message(s).", log.len()));
    Ok(())
}
