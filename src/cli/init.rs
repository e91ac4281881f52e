//! Init command implementation
//!
//! Scaffolds a bachgen project: a commented default configuration file
//! and an empty knowledge-base directory.

use super::output::Output;
use std::fs;
use std::path::Path;

/// Result of the init operation
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (bachgen.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

const DEFAULT_CONFIG: &str = r#"# bachgen configuration

[ollama]
# Base URL of the Ollama server. Can be overridden with OLLAMA_URL.
base_url = "http://localhost:11434"
# Model used for code generation.
model = "llama3.1"
# Model used to embed queries and knowledge-base chunks.
embedding_model = "nomic-embed-text"

[kb]
# Directory holding the persisted collections.
dir = "./kb"
# Collection searched by the retriever.
collection = "b2scala_knowledge"
# Number of top-ranked chunks retrieved per query.
top_k = 5
# Chunking used when indexing example files (word counts).
chunk_size = 1000
chunk_overlap = 200

[output]
# Where `bachgen generate` writes the generated code.
code_path = "generated_code.scala"
# Where `bachgen generate` logs the retrieved context.
context_path = "retrieved_context.txt"
"#;

/// Run the init command
pub fn run(path: &Path, force: bool, output: &Output) -> InitResult {
    output.banner();

    let config_path = path.join("bachgen.toml");
    if config_path.exists() && !force {
        output.warning("bachgen.toml already exists!");
        output.hint("Use --force to overwrite the existing file");
        return InitResult::AlreadyExists;
    }

    let kb_dir = path.join("kb");
    if !kb_dir.exists() {
        if let Err(e) = fs::create_dir_all(&kb_dir) {
            output.error(&format!("Failed to create kb directory: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("directory", "kb");
    }

    if let Err(e) = fs::write(&config_path, DEFAULT_CONFIG) {
        output.error(&format!("Failed to create bachgen.toml: {}", e));
        return InitResult::Error(e.to_string());
    }
    output.created("config", "bachgen.toml");

    output.hint("Next steps:");
    output.command("bachgen kb index <dir-of-examples>");
    output.command("bachgen chat");

    InitResult::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_creates_config_and_kb_dir() {
        let dir = tempfile::tempdir().unwrap();
        let output = Output::no_color();

        let result = run(dir.path(), false, &output);
        assert!(matches!(result, InitResult::Success));
        assert!(dir.path().join("bachgen.toml").exists());
        assert!(dir.path().join("kb").is_dir());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let output = Output::no_color();

        run(dir.path(), false, &output);
        let result = run(dir.path(), false, &output);
        assert!(matches!(result, InitResult::AlreadyExists));
    }

    #[test]
    fn test_generated_config_parses_with_defaults() {
        let config: crate::config::BachgenConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.kb.top_k, 5);
    }

    #[test]
    fn test_init_force_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let output = Output::no_color();

        std::fs::write(dir.path().join("bachgen.toml"), "stale").unwrap();
        let result = run(dir.path(), true, &output);
        assert!(matches!(result, InitResult::Success));

        let contents = std::fs::read_to_string(dir.path().join("bachgen.toml")).unwrap();
        assert!(contents.contains("[ollama]"));
    }
}
