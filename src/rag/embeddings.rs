//! Query and document embedding via the Ollama embeddings API.

use crate::llm::ollama::parse_base_url;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    generation::embeddings::request::{EmbeddingsInput, GenerateEmbeddingsRequest},
    Ollama,
};

/// Turns text into a dense vector for similarity search.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Embed a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Embed a batch of texts, preserving order.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding model name.
    fn model_name(&self) -> &str;
}

/// Embedder backed by an Ollama embedding model.
pub struct OllamaEmbedder {
    client: Ollama,
    model: String,
}

impl OllamaEmbedder {
    /// Connect to the Ollama server at `base_url`.
    pub fn new(base_url: &str, model: String) -> Result<Self> {
        let (host, port) = parse_base_url(base_url)?;
        let client = Ollama::new(host, port);

        Ok(Self { client, model })
    }

    async fn request(&self, input: EmbeddingsInput) -> Result<Vec<Vec<f32>>> {
        let request = GenerateEmbeddingsRequest::new(self.model.clone(), input);

        let response = self
            .client
            .generate_embeddings(request)
            .await
            .map_err(|e| AppError::Internal(format!("Ollama embeddings error: {}", e)))?;

        Ok(response.embeddings)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self
            .request(EmbeddingsInput::Single(text.to_string()))
            .await?;

        embeddings
            .pop()
            .ok_or_else(|| AppError::Internal("Ollama returned no embedding".to_string()))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let embeddings = self
            .request(EmbeddingsInput::Multiple(texts.to_vec()))
            .await?;

        if embeddings.len() != texts.len() {
            return Err(AppError::Internal(format!(
                "Ollama returned {} embeddings for {} inputs",
                embeddings.len(),
                texts.len()
            )));
        }

        Ok(embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
