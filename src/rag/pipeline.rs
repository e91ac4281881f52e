//! The retrieval-then-generation pipeline.

use crate::llm::LLMClient;
use crate::rag::prompt::PromptTemplate;
use crate::rag::retriever::ContextRetriever;
use std::sync::Arc;

/// Explicit result of one pipeline run.
///
/// Retrieval and generation failures are distinct variants so callers can
/// tell them apart without inspecting a shared null; both carry a
/// human-readable reason, and a generation failure keeps the context that
/// was already retrieved.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// The model produced code.
    Generated {
        code: String,
        context: Vec<String>,
    },
    /// Similarity search failed; the LLM was never invoked.
    RetrievalFailed { reason: String },
    /// The LLM call failed after context was retrieved.
    GenerationFailed {
        reason: String,
        context: Vec<String>,
    },
}

impl PipelineOutcome {
    /// The generated code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Generated { code, .. } => Some(code),
            _ => None,
        }
    }

    /// The context chunks that were retrieved (empty on retrieval failure).
    pub fn context(&self) -> &[String] {
        match self {
            Self::Generated { context, .. } | Self::GenerationFailed { context, .. } => context,
            Self::RetrievalFailed { .. } => &[],
        }
    }

    /// The failure reason, if the run did not produce code.
    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Generated { .. } => None,
            Self::RetrievalFailed { reason } | Self::GenerationFailed { reason, .. } => {
                Some(reason)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Generated { .. })
    }
}

/// One configurable pipeline: retriever, generator, and the prompt
/// template are all injected.
pub struct RagPipeline {
    retriever: Arc<dyn ContextRetriever>,
    llm: Arc<dyn LLMClient>,
    template: PromptTemplate,
}

impl RagPipeline {
    pub fn new(
        retriever: Arc<dyn ContextRetriever>,
        llm: Arc<dyn LLMClient>,
        template: PromptTemplate,
    ) -> Self {
        Self {
            retriever,
            llm,
            template,
        }
    }

    /// Run the pipeline for one draft: retrieve, assemble, generate.
    ///
    /// One blocking retrieval call, one blocking generation call. No
    /// retry, no caching, no streaming. Errors never propagate out of
    /// this method; they are folded into the outcome.
    pub async fn generate(&self, draft: &str) -> PipelineOutcome {
        let context = match self.retriever.get_context(draft).await {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "context retrieval failed");
                return PipelineOutcome::RetrievalFailed {
                    reason: e.to_string(),
                };
            }
        };

        let prompt = self.template.render(draft, &context);

        tracing::info!(model = self.llm.model_name(), "generating answer with LLM");
        match self.llm.generate(&prompt).await {
            Ok(code) => PipelineOutcome::Generated { code, context },
            Err(e) => {
                tracing::warn!(error = %e, "LLM invocation failed");
                PipelineOutcome::GenerationFailed {
                    reason: e.to_string(),
                    context,
                }
            }
        }
    }
}
