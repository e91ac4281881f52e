//! Vector store abstraction and the embedded knowledge-base backend.
//!
//! The [`VectorStore`] trait is the narrow interface the retriever sees;
//! [`KbVectorStore`] is the shipped backend: an embedded, pure-Rust store
//! holding one named collection per JSON file under the knowledge-base
//! directory. Search is exact cosine similarity over the full collection;
//! collections are expected to fit in memory.

use crate::types::{AppError, KbDocument, Result, SearchResult};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

/// Information about a collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    pub document_count: usize,
    pub dimensions: usize,
}

/// Abstract trait for vector store operations.
///
/// Retrieval only needs `search`; the ingestion surface also creates
/// collections and upserts documents. Results are always sorted by
/// descending similarity and truncated to the requested limit.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Get the name of this vector store backend.
    fn provider_name(&self) -> &'static str;

    /// Create a new collection with the specified vector dimensions.
    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()>;

    /// Check if a collection exists.
    async fn collection_exists(&self, name: &str) -> Result<bool>;

    /// List all collections in the store.
    async fn list_collections(&self) -> Result<Vec<CollectionInfo>>;

    /// Upsert documents with their embeddings into a collection.
    ///
    /// Documents are identified by their `id` field; an existing id is
    /// replaced. Every document must carry an embedding.
    async fn upsert(&self, collection: &str, documents: &[KbDocument]) -> Result<usize>;

    /// Search a collection for the vectors most similar to `embedding`.
    ///
    /// Returns at most `limit` results, sorted by descending cosine
    /// similarity. Embeddings are stripped from the returned documents.
    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>>;

    /// Count documents in a collection.
    async fn count(&self, collection: &str) -> Result<usize>;
}

// ============================================================================
// Embedded JSON-backed store
// ============================================================================

#[derive(Debug, Default, Serialize, Deserialize)]
struct KbCollection {
    dimensions: usize,
    documents: HashMap<String, KbDocument>,
}

/// Embedded vector store persisting each collection as a JSON file.
///
/// With a path, collections are loaded at open and rewritten after every
/// mutation; with `None` the store is purely in-memory (tests, scratch use).
pub struct KbVectorStore {
    path: Option<PathBuf>,
    collections: Arc<RwLock<HashMap<String, KbCollection>>>,
}

impl KbVectorStore {
    /// Open a store rooted at `path`, loading any persisted collections.
    ///
    /// A missing directory is not an error (the knowledge base may simply
    /// not have been indexed yet); a present-but-unreadable collection
    /// file is.
    pub async fn open(path: Option<PathBuf>) -> Result<Self> {
        let store = Self {
            path,
            collections: Arc::new(RwLock::new(HashMap::new())),
        };

        if let Some(ref dir) = store.path {
            if dir.is_dir() {
                store.load_collections(dir.clone()).await?;
            }
        }

        Ok(store)
    }

    async fn load_collections(&self, dir: PathBuf) -> Result<()> {
        let mut entries = tokio::fs::read_dir(&dir).await.map_err(|e| {
            AppError::Initialization(format!("Failed to read KB dir {}: {}", dir.display(), e))
        })?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AppError::Initialization(e.to_string()))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()).map(String::from) else {
                continue;
            };

            let raw = tokio::fs::read_to_string(&path).await.map_err(|e| {
                AppError::Initialization(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let collection: KbCollection = serde_json::from_str(&raw).map_err(|e| {
                AppError::Initialization(format!(
                    "Corrupted collection file {}: {}",
                    path.display(),
                    e
                ))
            })?;

            tracing::debug!(
                collection = %name,
                documents = collection.documents.len(),
                "loaded collection"
            );
            self.collections.write().insert(name, collection);
        }

        Ok(())
    }

    async fn save_collection(&self, name: &str) -> Result<()> {
        let Some(ref dir) = self.path else {
            return Ok(());
        };

        let data = {
            let collections = self.collections.read();
            let collection = collections
                .get(name)
                .ok_or_else(|| AppError::NotFound(format!("Collection '{}' not found", name)))?;
            serde_json::to_string_pretty(collection)
                .map_err(|e| AppError::Internal(format!("Failed to serialize collection: {}", e)))?
        };

        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create KB dir: {}", e)))?;

        let file = dir.join(format!("{}.json", name));
        tokio::fs::write(&file, data)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to write {}: {}", file.display(), e)))?;

        Ok(())
    }

    fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
        if a.len() != b.len() {
            return 0.0;
        }

        let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
        let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        dot_product / (norm_a * norm_b)
    }
}

#[async_trait]
impl VectorStore for KbVectorStore {
    fn provider_name(&self) -> &'static str {
        "kb-json"
    }

    async fn create_collection(&self, name: &str, dimensions: usize) -> Result<()> {
        {
            let mut collections = self.collections.write();
            if collections.contains_key(name) {
                return Err(AppError::Input(format!(
                    "Collection '{}' already exists",
                    name
                )));
            }
            collections.insert(
                name.to_string(),
                KbCollection {
                    dimensions,
                    documents: HashMap::new(),
                },
            );
        }

        self.save_collection(name).await
    }

    async fn collection_exists(&self, name: &str) -> Result<bool> {
        Ok(self.collections.read().contains_key(name))
    }

    async fn list_collections(&self) -> Result<Vec<CollectionInfo>> {
        let collections = self.collections.read();
        let mut infos: Vec<CollectionInfo> = collections
            .iter()
            .map(|(name, col)| CollectionInfo {
                name: name.clone(),
                document_count: col.documents.len(),
                dimensions: col.dimensions,
            })
            .collect();
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    async fn upsert(&self, collection: &str, documents: &[KbDocument]) -> Result<usize> {
        let count = {
            let mut collections = self.collections.write();
            let col = collections.get_mut(collection).ok_or_else(|| {
                AppError::NotFound(format!("Collection '{}' not found", collection))
            })?;

            let mut count = 0;
            for doc in documents {
                if doc.embedding.is_none() {
                    return Err(AppError::Input(format!(
                        "Document '{}' is missing embedding",
                        doc.id
                    )));
                }
                col.documents.insert(doc.id.clone(), doc.clone());
                count += 1;
            }
            count
        };

        self.save_collection(collection).await?;
        Ok(count)
    }

    async fn search(
        &self,
        collection: &str,
        embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>> {
        let collections = self.collections.read();
        let col = collections
            .get(collection)
            .ok_or_else(|| AppError::NotFound(format!("Collection '{}' not found", collection)))?;

        let mut results: Vec<SearchResult> = col
            .documents
            .values()
            .filter_map(|doc| {
                let doc_embedding = doc.embedding.as_ref()?;
                let score = Self::cosine_similarity(embedding, doc_embedding);
                Some(SearchResult {
                    document: KbDocument {
                        id: doc.id.clone(),
                        content: doc.content.clone(),
                        metadata: doc.metadata.clone(),
                        embedding: None,
                    },
                    score,
                })
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(limit);

        Ok(results)
    }

    async fn count(&self, collection: &str) -> Result<usize> {
        let collections = self.collections.read();
        let col = collections
            .get(collection)
            .ok_or_else(|| AppError::NotFound(format!("Collection '{}' not found", collection)))?;
        Ok(col.documents.len())
    }
}
