use std::sync::Arc;

use bachgen::{
    chat,
    cli::{generate, init, output::Output, Cli, Commands, KbCommands},
    config::BachgenConfig,
    db::{KbVectorStore, VectorStore},
    llm::OllamaClient,
    rag::{
        chunker::TextChunker, indexer::KbIndexer, KbRetriever, OllamaEmbedder, PromptTemplate,
        RagPipeline,
    },
};
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "bachgen=debug" } else { "bachgen=info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn open_store(config: &BachgenConfig) -> anyhow::Result<Arc<KbVectorStore>> {
    let store = KbVectorStore::open(Some(config.kb.dir.clone())).await?;
    Ok(Arc::new(store))
}

fn build_embedder(config: &BachgenConfig) -> anyhow::Result<Arc<OllamaEmbedder>> {
    Ok(Arc::new(OllamaEmbedder::new(
        &config.ollama.base_url,
        config.ollama.embedding_model.clone(),
    )?))
}

async fn build_pipeline(config: &BachgenConfig) -> anyhow::Result<RagPipeline> {
    let store = open_store(config).await?;
    let embedder = build_embedder(config)?;
    let llm = Arc::new(OllamaClient::new(
        &config.ollama.base_url,
        config.ollama.model.clone(),
    )?);

    let retriever = Arc::new(KbRetriever::new(
        store,
        embedder,
        config.kb.collection.clone(),
        config.kb.top_k,
    )?);

    Ok(RagPipeline::new(retriever, llm, PromptTemplate::default()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();
    init_tracing(cli.verbose);

    let out = if cli.no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match cli.command {
        Some(Commands::Init { path, force }) => match init::run(&path, force, &out) {
            init::InitResult::Success => {}
            init::InitResult::AlreadyExists => std::process::exit(1),
            init::InitResult::Error(e) => anyhow::bail!("init failed: {}", e),
        },

        Some(Commands::Generate {
            draft,
            output,
            context_log,
        }) => {
            let config = BachgenConfig::load(&cli.config)?;
            let pipeline = build_pipeline(&config).await?;

            let code_path = output.unwrap_or_else(|| config.output.code_path.clone());
            let context_path = context_log.unwrap_or_else(|| config.output.context_path.clone());

            let code = generate::run(&pipeline, &draft, &code_path, &context_path, &out).await;
            std::process::exit(code);
        }

        Some(Commands::Kb(KbCommands::Index { dir })) => {
            let config = BachgenConfig::load(&cli.config)?;
            let store = open_store(&config).await?;
            let embedder = build_embedder(&config)?;

            let indexer = KbIndexer::new(
                store,
                embedder,
                TextChunker::new(config.kb.chunk_size, config.kb.chunk_overlap),
                config.kb.collection.clone(),
            );

            let report = indexer.index_dir(&dir).await?;
            out.success(&format!(
                "Indexed {} file(s) into {} chunk(s)",
                report.files, report.chunks
            ));
        }

        Some(Commands::Kb(KbCommands::Stats)) => {
            let config = BachgenConfig::load(&cli.config)?;
            let store = open_store(&config).await?;

            let collections = store.list_collections().await?;
            if collections.is_empty() {
                out.info("Knowledge base is empty. Run 'bachgen kb index <dir>' first.");
            } else {
                for info in collections {
                    out.kv(
                        &info.name,
                        &format!("{} document(s), {} dims", info.document_count, info.dimensions),
                    );
                }
            }
        }

        Some(Commands::Chat) | None => {
            let config = BachgenConfig::load(&cli.config)?;
            let pipeline = build_pipeline(&config).await?;

            out.banner();
            chat::run_repl(&pipeline, &out).await?;
        }
    }

    Ok(())
}
