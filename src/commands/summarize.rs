//! `repotest summarize` command.

use std::path::{Path, PathBuf};

use super::{print_json, read_source};
use crate::context::ServiceContext;
use crate::generate::{self, FileInput};
use crate::server::envelope::SummaryResponse;

/// Execute the `summarize` command.
///
/// Each path becomes one file of the batch, named as given on the command
/// line.
///
/// # Errors
///
/// Returns an error string if a file cannot be read, the batch is invalid,
/// no provider is configured, or the model call fails.
pub async fn run(ctx: &ServiceContext, paths: &[PathBuf]) -> Result<(), String> {
    let files = load_files(paths)?;
    let batch = generate::generate_summaries(ctx, &files).await.map_err(|e| e.to_string())?;
    print_json(&SummaryResponse::from(batch))
}

fn load_files(paths: &[PathBuf]) -> Result<Vec<FileInput>, String> {
    paths
        .iter()
        .map(|path| Ok(FileInput { filename: display_name(path), content: read_source(path)? }))
        .collect()
}

fn display_name(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
