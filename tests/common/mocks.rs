//! Stub implementations for testing.
//!
//! Hand-rolled stand-ins for the retriever and the LLM client, shared
//! across test files. Call counters are `Arc<AtomicUsize>` handles so a
//! test can keep one after moving the stub into the pipeline.

// Not every test binary uses every stub.
#![allow(dead_code)]

use async_trait::async_trait;
use bachgen::llm::LLMClient;
use bachgen::rag::ContextRetriever;
use bachgen::types::{AppError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Retriever returning a fixed context, or failing on demand.
pub struct StubRetriever {
    chunks: Vec<String>,
    fail: bool,
    pub calls: Arc<AtomicUsize>,
}

impl StubRetriever {
    /// Stub that returns the given chunks, in order.
    pub fn returning(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            fail: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Stub that always fails with a retrieval error.
    pub fn failing() -> Self {
        Self {
            chunks: vec![],
            fail: true,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl ContextRetriever for StubRetriever {
    async fn get_context(&self, _query: &str) -> Result<Vec<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(AppError::Retrieval("stub index unavailable".to_string()));
        }
        Ok(self.chunks.clone())
    }
}

/// LLM stub that echoes its prompt back verbatim.
pub struct EchoLlm {
    pub calls: Arc<AtomicUsize>,
}

impl EchoLlm {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl LLMClient for EchoLlm {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(prompt.to_string())
    }

    fn model_name(&self) -> &str {
        "echo"
    }
}

/// LLM stub that always fails with a generation error.
pub struct FailingLlm {
    pub calls: Arc<AtomicUsize>,
}

impl FailingLlm {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl LLMClient for FailingLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(AppError::Generation("stub model unavailable".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing"
    }
}

/// LLM stub that returns a fixed completion.
pub struct StaticLlm {
    response: String,
}

impl StaticLlm {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
        }
    }
}

#[async_trait]
impl LLMClient for StaticLlm {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Ok(self.response.clone())
    }

    fn model_name(&self) -> &str {
        "static"
    }
}
