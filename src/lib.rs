//! Core library entry for the `repotest` service and CLI.

pub mod adapters;
pub mod cassette;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod generate;
pub mod ports;
pub mod repository;
pub mod server;

use clap::Parser;

use crate::config::AppConfig;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails, configuration is
/// invalid, or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        // --help and --version land here too; they go to stdout and succeed.
        Err(err) if !err.use_stderr() => {
            return err.print().map_err(|e| format!("Failed to write help: {e}"));
        }
        Err(err) => return Err(err.to_string()),
    };
    let config = AppConfig::from_env()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start async runtime: {e}"))?;
    runtime.block_on(commands::dispatch(cli.command, &config))
}
