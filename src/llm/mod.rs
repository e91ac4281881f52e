//! Text-generation client abstraction.
//!
//! The pipeline only ever needs one blocking completion per request, so the
//! [`LLMClient`] trait is deliberately small. The shipped implementation
//! talks to a local Ollama server; tests substitute stub clients.

/// Core LLM client trait.
pub mod client;
/// Ollama-backed client.
pub mod ollama;

pub use client::LLMClient;
pub use ollama::OllamaClient;
