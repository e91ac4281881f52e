//! Knowledge-base ingestion.
//!
//! Walks a directory of worked examples (`.txt` or `.scala`), chunks and
//! embeds them, and upserts the chunks into a collection. This is the only
//! surface that mutates the knowledge base; retrieval is read-only.

use crate::db::VectorStore;
use crate::rag::chunker::TextChunker;
use crate::rag::embeddings::Embedder;
use crate::types::{AppError, DocumentMetadata, KbDocument, Result};
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use uuid::Uuid;

const INDEXABLE_EXTENSIONS: &[&str] = &["txt", "scala"];

/// Summary of one ingestion run.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexReport {
    pub files: usize,
    pub chunks: usize,
}

pub struct KbIndexer {
    store: Arc<dyn VectorStore>,
    embedder: Arc<dyn Embedder>,
    chunker: TextChunker,
    collection: String,
}

impl KbIndexer {
    pub fn new(
        store: Arc<dyn VectorStore>,
        embedder: Arc<dyn Embedder>,
        chunker: TextChunker,
        collection: String,
    ) -> Self {
        Self {
            store,
            embedder,
            chunker,
            collection,
        }
    }

    /// Index every example file directly under `dir`.
    ///
    /// Unreadable files are skipped with a warning; an unreadable
    /// directory is an input error. The collection is created on first
    /// use, sized to the embedding model's output.
    pub async fn index_dir(&self, dir: &Path) -> Result<IndexReport> {
        let mut entries = tokio::fs::read_dir(dir).await.map_err(|e| {
            AppError::Input(format!("Cannot read example dir {}: {}", dir.display(), e))
        })?;

        let mut report = IndexReport::default();

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Input(e.to_string()))?
        {
            let path = entry.path();
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            if !INDEXABLE_EXTENSIONS.contains(&ext) {
                continue;
            }

            let text = match tokio::fs::read_to_string(&path).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "skipping unreadable file");
                    continue;
                }
            };

            let chunks = self.chunker.chunk(&text);
            if chunks.is_empty() {
                continue;
            }

            report.chunks += self.index_chunks(&path, chunks).await?;
            report.files += 1;
        }

        tracing::info!(
            files = report.files,
            chunks = report.chunks,
            collection = %self.collection,
            "knowledge base indexed"
        );
        Ok(report)
    }

    async fn index_chunks(&self, source: &Path, chunks: Vec<String>) -> Result<usize> {
        let embeddings = self.embedder.embed_batch(&chunks).await?;

        if !self.store.collection_exists(&self.collection).await? {
            let dimensions = embeddings.first().map(|e| e.len()).unwrap_or(0);
            self.store
                .create_collection(&self.collection, dimensions)
                .await?;
        }

        let title = source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("example")
            .to_string();

        let documents: Vec<KbDocument> = chunks
            .into_iter()
            .zip(embeddings)
            .map(|(content, embedding)| KbDocument {
                id: Uuid::new_v4().to_string(),
                content,
                metadata: DocumentMetadata {
                    title: title.clone(),
                    source: source.display().to_string(),
                    created_at: Utc::now(),
                    tags: vec!["example".to_string()],
                },
                embedding: Some(embedding),
            })
            .collect();

        self.store.upsert(&self.collection, &documents).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::KbVectorStore;
    use async_trait::async_trait;

    struct CountingEmbedder;

    #[async_trait]
    impl Embedder for CountingEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.len() as f32, 1.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
        }

        fn model_name(&self) -> &str {
            "counting"
        }
    }

    fn indexer(store: Arc<KbVectorStore>) -> KbIndexer {
        KbIndexer::new(
            store,
            Arc::new(CountingEmbedder),
            TextChunker::new(100, 10),
            "examples".to_string(),
        )
    }

    #[tokio::test]
    async fn test_index_dir_ingests_example_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ping.txt"), "tell(ping) get(pong)").unwrap();
        std::fs::write(dir.path().join("auth.scala"), "object Auth extends App").unwrap();
        std::fs::write(dir.path().join("notes.md"), "not indexed").unwrap();

        let store = Arc::new(KbVectorStore::open(None).await.unwrap());
        let report = indexer(store.clone()).index_dir(dir.path()).await.unwrap();

        assert_eq!(report.files, 2);
        assert_eq!(report.chunks, 2);
        assert_eq!(store.count("examples").await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_missing_dir_is_input_error() {
        let store = Arc::new(KbVectorStore::open(None).await.unwrap());
        let result = indexer(store).index_dir(Path::new("/no/such/dir")).await;

        assert!(matches!(result, Err(AppError::Input(_))));
    }

    #[tokio::test]
    async fn test_empty_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("empty.txt"), "").unwrap();

        let store = Arc::new(KbVectorStore::open(None).await.unwrap());
        let report = indexer(store).index_dir(dir.path()).await.unwrap();

        assert_eq!(report.files, 0);
        assert_eq!(report.chunks, 0);
    }
}
