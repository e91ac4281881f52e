//! Batch driver: translate one draft file and write the outputs.

use super::output::Output;
use crate::rag::pipeline::{PipelineOutcome, RagPipeline};
use std::path::Path;

/// Run the batch surface for one draft file.
///
/// Returns the process exit code: 0 on success, 1 when the draft file is
/// missing/unreadable (the pipeline is never invoked) or when generation
/// failed. On failure, whatever context was retrieved is still written
/// before returning.
pub async fn run(
    pipeline: &RagPipeline,
    draft_path: &Path,
    code_path: &Path,
    context_path: &Path,
    out: &Output,
) -> i32 {
    let draft = match tokio::fs::read_to_string(draft_path).await {
        Ok(draft) => draft,
        Err(e) => {
            out.error(&format!(
                "Cannot read draft file {}: {}",
                draft_path.display(),
                e
            ));
            return 1;
        }
    };

    let outcome = pipeline.generate(&draft).await;

    write_context(context_path, outcome.context(), out).await;

    match outcome {
        PipelineOutcome::Generated { code, .. } => {
            if let Err(e) = tokio::fs::write(code_path, &code).await {
                out.error(&format!(
                    "Failed to write generated code to {}: {}",
                    code_path.display(),
                    e
                ));
                return 1;
            }
            out.success(&format!("Generated code written to {}", code_path.display()));
            0
        }
        PipelineOutcome::RetrievalFailed { reason } => {
            out.error(&format!("Context retrieval failed: {}", reason));
            1
        }
        PipelineOutcome::GenerationFailed { reason, .. } => {
            out.error(&format!("Code generation failed: {}", reason));
            1
        }
    }
}

/// Best-effort context log; a write failure is reported but never changes
/// the exit code.
async fn write_context(path: &Path, context: &[String], out: &Output) {
    if context.is_empty() {
        return;
    }

    let text = context.join("\n---\n");
    match tokio::fs::write(path, text).await {
        Ok(()) => out.info(&format!("Retrieved context logged to {}", path.display())),
        Err(e) => out.warning(&format!(
            "Failed to log context to {}: {}",
            path.display(),
            e
        )),
    }
}
