//! Context retrieval against the knowledge base.

use crate::db::VectorStore;
use crate::rag::embeddings::Embedder;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only source of ranked context chunks for a query.
///
/// The seam the pipeline depends on; tests substitute stubs, production
/// uses [`KbRetriever`].
#[async_trait]
pub trait ContextRetriever: Send + Sync {
    /// Return the text of the most similar stored chunks, most-similar
    /// first, at most `top_k` of them.
    async fn get_context(&self, query: &str) -> Result<Vec<String>>;
}

/// Retriever over a persistent, pre-populated knowledge-base collection.
pub struct KbRetriever {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    collection: String,
    top_k: usize,
}

impl KbRetriever {
    /// Create a retriever. `top_k` must be positive.
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        collection: String,
        top_k: usize,
    ) -> Result<Self> {
        if top_k == 0 {
            return Err(AppError::Configuration(
                "top_k must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            store,
            embedder,
            collection,
            top_k,
        })
    }
}

#[async_trait]
impl ContextRetriever for KbRetriever {
    async fn get_context(&self, query: &str) -> Result<Vec<String>> {
        if query.trim().is_empty() {
            return Err(AppError::Input("query must not be empty".to_string()));
        }

        tracing::info!(top_k = self.top_k, collection = %self.collection, "retrieving context");

        let embedding = self
            .embedder
            .embed(query)
            .await
            .map_err(|e| AppError::Retrieval(format!("query embedding failed: {}", e)))?;

        let results = self
            .store
            .search(&self.collection, &embedding, self.top_k)
            .await
            .map_err(|e| AppError::Retrieval(format!("similarity search failed: {}", e)))?;

        Ok(results.into_iter().map(|r| r.document.content).collect())
    }
}
