//! Batch surface: exit codes, output files, and round-trip fidelity.

mod common;

use bachgen::cli::generate;
use bachgen::cli::output::Output;
use bachgen::rag::{PromptTemplate, RagPipeline};
use common::mocks::{FailingLlm, StaticLlm, StubRetriever};
use std::sync::atomic::Ordering;
use std::sync::Arc;

const GENERATED: &str = "// Ping pong protocol\nobject PingPong extends App {\n  // Alice tells, Bob gets\n}\n";

fn pipeline_with(retriever: StubRetriever, llm: impl bachgen::llm::LLMClient + 'static) -> RagPipeline {
    RagPipeline::new(Arc::new(retriever), Arc::new(llm), PromptTemplate::default())
}

#[tokio::test]
async fn test_missing_draft_exits_one_without_generating() {
    let dir = tempfile::tempdir().unwrap();
    let retriever = StubRetriever::returning(&["example A"]);
    let retriever_calls = retriever.calls.clone();
    let llm = FailingLlm::new();
    let llm_calls = llm.calls.clone();
    let pipeline = pipeline_with(retriever, llm);

    let code = generate::run(
        &pipeline,
        &dir.path().join("no_such_draft.txt"),
        &dir.path().join("out.scala"),
        &dir.path().join("context.txt"),
        &Output::no_color(),
    )
    .await;

    assert_eq!(code, 1);
    assert_eq!(retriever_calls.load(Ordering::SeqCst), 0);
    assert_eq!(llm_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_successful_run_writes_outputs_and_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let draft_path = dir.path().join("draft.txt");
    let code_path = dir.path().join("out.scala");
    let context_path = dir.path().join("context.txt");
    std::fs::write(&draft_path, "Define a ping pong protocol").unwrap();

    let pipeline = pipeline_with(
        StubRetriever::returning(&["example A", "example B"]),
        StaticLlm::new(GENERATED),
    );

    let code = generate::run(
        &pipeline,
        &draft_path,
        &code_path,
        &context_path,
        &Output::no_color(),
    )
    .await;

    assert_eq!(code, 0);

    // Round-trip: the artifact on disk is byte-identical to the response.
    let written = std::fs::read(&code_path).unwrap();
    assert_eq!(written, GENERATED.as_bytes());

    let context = std::fs::read_to_string(&context_path).unwrap();
    assert_eq!(context, "example A\n---\nexample B");
}

#[tokio::test]
async fn test_generation_failure_exits_one_but_logs_context() {
    let dir = tempfile::tempdir().unwrap();
    let draft_path = dir.path().join("draft.txt");
    let code_path = dir.path().join("out.scala");
    let context_path = dir.path().join("context.txt");
    std::fs::write(&draft_path, "Define a ping pong protocol").unwrap();

    let pipeline = pipeline_with(
        StubRetriever::returning(&["example A"]),
        FailingLlm::new(),
    );

    let code = generate::run(
        &pipeline,
        &draft_path,
        &code_path,
        &context_path,
        &Output::no_color(),
    )
    .await;

    assert_eq!(code, 1);
    // Best-effort partial output: context is persisted, code is not.
    assert!(context_path.exists());
    assert!(!code_path.exists());
}

#[tokio::test]
async fn test_retrieval_failure_exits_one_with_no_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let draft_path = dir.path().join("draft.txt");
    let code_path = dir.path().join("out.scala");
    let context_path = dir.path().join("context.txt");
    std::fs::write(&draft_path, "Define a ping pong protocol").unwrap();

    let pipeline = pipeline_with(StubRetriever::failing(), StaticLlm::new(GENERATED));

    let code = generate::run(
        &pipeline,
        &draft_path,
        &code_path,
        &context_path,
        &Output::no_color(),
    )
    .await;

    assert_eq!(code, 1);
    assert!(!context_path.exists());
    assert!(!code_path.exists());
}

#[tokio::test]
async fn test_utf8_draft_round_trips_through_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let draft_path = dir.path().join("draft.txt");
    let code_path = dir.path().join("out.scala");
    let context_path = dir.path().join("context.txt");
    std::fs::write(&draft_path, "Protocole d'échange de clés").unwrap();

    let response = "// Protocole d'échange — généré\nobject Échange extends App {}\n";
    let pipeline = pipeline_with(StubRetriever::returning(&["exemple"]), StaticLlm::new(response));

    let code = generate::run(
        &pipeline,
        &draft_path,
        &code_path,
        &context_path,
        &Output::no_color(),
    )
    .await;

    assert_eq!(code, 0);
    assert_eq!(std::fs::read_to_string(&code_path).unwrap(), response);
}
