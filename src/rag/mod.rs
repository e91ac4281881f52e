//! Retrieval Augmented Generation pipeline.
//!
//! The flow for one draft:
//!
//! 1. **Retrieval** - the draft is embedded and the top-k most similar
//!    knowledge-base chunks are fetched, most-similar first.
//! 2. **Prompt assembly** - a single prompt string is built from the
//!    instruction template, the draft, and the chunks in ranked order.
//! 3. **Generation** - the prompt is sent to the LLM once; the raw
//!    response is returned together with the context that was used.
//!
//! Ingestion (chunk, embed, upsert) lives in [`indexer`] and is only
//! reachable from the `kb index` CLI surface; retrieval never mutates
//! the knowledge base.

pub mod chunker;
pub mod embeddings;
pub mod indexer;
pub mod pipeline;
pub mod prompt;
pub mod retriever;

pub use embeddings::{Embedder, OllamaEmbedder};
pub use pipeline::{PipelineOutcome, RagPipeline};
pub use prompt::PromptTemplate;
pub use retriever::{ContextRetriever, KbRetriever};
