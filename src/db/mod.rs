//! Knowledge-base storage.

/// Vector store trait and the embedded JSON-backed implementation.
pub mod vectorstore;

pub use vectorstore::{CollectionInfo, KbVectorStore, VectorStore};
