//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI parser for `repotest`.
#[derive(Debug, Parser)]
#[command(
    name = "repotest",
    version,
    about = "Browse hosted repositories and generate tests with a language model"
)]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API.
    Serve {
        /// Port to listen on (overrides `PORT`).
        #[arg(long)]
        port: Option<u16>,
    },
    /// List repositories visible to the configured token.
    Repos,
    /// List code files on a repository's default branch.
    Files {
        /// Repository owner.
        owner: String,
        /// Repository name.
        repo: String,
    },
    /// Generate test summaries for local files.
    Summarize {
        /// Files to summarize.
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Generate test code for one summary of a local file.
    Generate {
        /// File under test.
        path: PathBuf,
        /// Identifier of the summary being implemented.
        #[arg(long)]
        summary_id: String,
        /// Description of the test case.
        #[arg(long)]
        summary_text: String,
    },
}
