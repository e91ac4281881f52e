//! Configuration for bachgen, loaded from `bachgen.toml`.
//!
//! Every field has a default, so a missing config file yields a working
//! local-first setup (Ollama on localhost, `./kb` knowledge base). The
//! Ollama base URL can be overridden with the `OLLAMA_URL` environment
//! variable; a `.env` file is honored if present.

use crate::types::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from bachgen.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BachgenConfig {
    #[serde(default)]
    pub ollama: OllamaConfig,

    #[serde(default)]
    pub kb: KbConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

// ============= Ollama Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used for code generation.
    #[serde(default = "default_model")]
    pub model: String,

    /// Model used to embed queries and knowledge-base chunks.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.1".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            embedding_model: default_embedding_model(),
        }
    }
}

// ============= Knowledge Base Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KbConfig {
    /// Directory holding the persisted collections.
    #[serde(default = "default_kb_dir")]
    pub dir: PathBuf,

    /// Collection searched by the retriever.
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Number of top-ranked chunks retrieved per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Chunk size (characters) used when indexing example files.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Overlap (characters) between adjacent chunks.
    #[serde(default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_kb_dir() -> PathBuf {
    PathBuf::from("./kb")
}

fn default_collection() -> String {
    "b2scala_knowledge".to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_chunk_size() -> usize {
    1000
}

fn default_chunk_overlap() -> usize {
    200
}

impl Default for KbConfig {
    fn default() -> Self {
        Self {
            dir: default_kb_dir(),
            collection: default_collection(),
            top_k: default_top_k(),
            chunk_size: default_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

// ============= Output Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Where the batch surface writes the generated code.
    #[serde(default = "default_code_path")]
    pub code_path: PathBuf,

    /// Where the batch surface logs the retrieved context.
    #[serde(default = "default_context_path")]
    pub context_path: PathBuf,
}

fn default_code_path() -> PathBuf {
    PathBuf::from("generated_code.scala")
}

fn default_context_path() -> PathBuf {
    PathBuf::from("retrieved_context.txt")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            code_path: default_code_path(),
            context_path: default_context_path(),
        }
    }
}

// ============= Loading =============

impl BachgenConfig {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path).map_err(|e| {
                AppError::Configuration(format!("Failed to read {}: {}", path.display(), e))
            })?;
            toml::from_str(&raw).map_err(|e| {
                AppError::Configuration(format!("Failed to parse {}: {}", path.display(), e))
            })?
        } else {
            tracing::info!(config = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        if let Ok(url) = std::env::var("OLLAMA_URL") {
            if !url.is_empty() {
                config.ollama.base_url = url;
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Check invariants that serde defaults cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.kb.top_k == 0 {
            return Err(AppError::Configuration(
                "kb.top_k must be a positive integer".to_string(),
            ));
        }
        if self.kb.chunk_size == 0 {
            return Err(AppError::Configuration(
                "kb.chunk_size must be a positive integer".to_string(),
            ));
        }
        if self.kb.chunk_overlap >= self.kb.chunk_size {
            return Err(AppError::Configuration(format!(
                "kb.chunk_overlap ({}) must be smaller than kb.chunk_size ({})",
                self.kb.chunk_overlap, self.kb.chunk_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = BachgenConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.ollama.model, "llama3.1");
        assert_eq!(config.ollama.embedding_model, "nomic-embed-text");
        assert_eq!(config.kb.collection, "b2scala_knowledge");
        assert_eq!(config.kb.top_k, 5);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: BachgenConfig = toml::from_str(
            r#"
            [kb]
            top_k = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.kb.top_k, 3);
        assert_eq!(config.kb.chunk_size, 1000);
        assert_eq!(config.ollama.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_zero_top_k_rejected() {
        let mut config = BachgenConfig::default();
        config.kb.top_k = 0;

        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[test]
    fn test_overlap_must_be_smaller_than_chunk_size() {
        let mut config = BachgenConfig::default();
        config.kb.chunk_size = 100;
        config.kb.chunk_overlap = 100;

        assert!(config.validate().is_err());
    }
}
