//! CLI for bachgen.
//!
//! Provides command-line interface parsing and handling for the bachgen
//! binary. Uses clap for argument parsing and owo-colors for colored
//! terminal output.

pub mod generate;
pub mod init;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// bachgen - B2Scala protocol draft formalizer
///
/// A RAG-powered assistant that retrieves worked protocol-to-B2Scala
/// translations from a local knowledge base and drives a local Ollama
/// model to formalize informal protocol drafts.
#[derive(Parser, Debug)]
#[command(
    name = "bachgen",
    author = "Dirmacs <build@dirmacs.com>",
    version,
    about = "bachgen - RAG-assisted B2Scala code generator",
    long_about = "A RAG-powered assistant that formalizes informal protocol drafts into\n\
                  B2Scala code, using a local knowledge base of worked translations and\n\
                  a local Ollama model.\n\n\
                  Run without arguments to start an interactive chat session.",
    after_help = "EXAMPLES:\n    \
                  bachgen init                       # Scaffold bachgen.toml and the kb/ directory\n    \
                  bachgen kb index ./examples        # Embed example files into the knowledge base\n    \
                  bachgen generate --draft draft.txt # Translate one draft, write outputs\n    \
                  bachgen chat                       # Interactive session (also the default)"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "bachgen.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a bachgen project with a default configuration file
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Overwrite an existing configuration file
        #[arg(short, long)]
        force: bool,
    },

    /// Translate one draft file and write the generated code
    Generate {
        /// Path to the protocol draft file
        #[arg(short, long)]
        draft: PathBuf,

        /// Where to write the generated code (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Where to log the retrieved context (overrides config)
        #[arg(long)]
        context_log: Option<PathBuf>,
    },

    /// Start an interactive chat session
    Chat,

    /// Manage the knowledge base
    #[command(subcommand)]
    Kb(KbCommands),
}

/// Knowledge-base management subcommands
#[derive(Subcommand, Debug)]
pub enum KbCommands {
    /// Index a directory of example files (.txt, .scala) into the KB
    Index {
        /// Directory containing the example files
        dir: PathBuf,
    },

    /// Show collections and document counts
    Stats,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
