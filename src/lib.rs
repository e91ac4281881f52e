//! # bachgen - RAG-assisted B2Scala code generator
//!
//! bachgen formalizes informal protocol drafts into B2Scala code. It keeps
//! a local knowledge base of worked protocol-to-B2Scala translations,
//! retrieves the examples most similar to a draft, and prompts a local
//! Ollama model with draft + examples to produce the formal notation.
//!
//! ## Overview
//!
//! bachgen can be used in two ways:
//!
//! 1. **As a CLI** - `bachgen chat` for an interactive session,
//!    `bachgen generate --draft <file>` for one-shot batch translation,
//!    `bachgen kb index <dir>` to build the knowledge base.
//! 2. **As a library** - wire the pipeline into your own tooling.
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use bachgen::{
//!     BachgenConfig, KbRetriever, KbVectorStore, OllamaClient, OllamaEmbedder,
//!     PromptTemplate, RagPipeline,
//! };
//! use std::sync::Arc;
//!
//! let config = BachgenConfig::load("bachgen.toml".as_ref())?;
//!
//! let store = Arc::new(KbVectorStore::open(Some(config.kb.dir.clone())).await?);
//! let embedder = Arc::new(OllamaEmbedder::new(
//!     &config.ollama.base_url,
//!     config.ollama.embedding_model.clone(),
//! )?);
//! let llm = Arc::new(OllamaClient::new(
//!     &config.ollama.base_url,
//!     config.ollama.model.clone(),
//! )?);
//!
//! let retriever = Arc::new(KbRetriever::new(
//!     store,
//!     embedder,
//!     config.kb.collection.clone(),
//!     config.kb.top_k,
//! )?);
//! let pipeline = RagPipeline::new(retriever, llm, PromptTemplate::default());
//!
//! let outcome = pipeline.generate("Define an agent named Alice").await;
//! ```
//!
//! ## Modules
//!
//! - [`rag`] - retrieval, prompt assembly, and the generation pipeline
//! - [`db`] - the embedded knowledge-base vector store
//! - [`llm`] - LLM client abstraction (Ollama)
//! - [`chat`] - interactive surface with an explicit conversation log
//! - [`cli`] - argument parsing and the batch driver
//! - [`types`] - common types and error handling

/// Interactive chat surface and conversation log.
pub mod chat;
/// CLI parsing, colored output, and command drivers.
pub mod cli;
/// Configuration loading and validation.
pub mod config;
/// Knowledge-base vector store.
pub mod db;
/// LLM client implementations.
pub mod llm;
/// Retrieval Augmented Generation components.
pub mod rag;
/// Core types (documents, messages, errors).
pub mod types;

// Re-export commonly used types
pub use chat::ChatLog;
pub use config::BachgenConfig;
pub use db::{KbVectorStore, VectorStore};
pub use llm::{LLMClient, OllamaClient};
pub use rag::{
    ContextRetriever, Embedder, KbRetriever, OllamaEmbedder, PipelineOutcome, PromptTemplate,
    RagPipeline,
};
pub use types::{AppError, Result};
