//! `repotest generate` command.

use std::path::Path;

use super::{print_json, read_source};
use crate::context::ServiceContext;
use crate::generate::{self, CodeRequest};
use crate::server::envelope::CodeResponse;

/// Execute the `generate` command.
///
/// # Errors
///
/// Returns an error string if the file cannot be read, a field is blank,
/// no provider is configured, or the model call fails.
pub async fn run(
    ctx: &ServiceContext,
    path: &Path,
    summary_id: String,
    summary_text: String,
) -> Result<(), String> {
    let request = CodeRequest {
        summary_id,
        summary_text,
        file_content: read_source(path)?,
        filename: Some(path.to_string_lossy().into_owned()),
    };
    let generation = generate::generate_code(ctx, &request).await.map_err(|e| e.to_string())?;
    print_json(&CodeResponse::from(generation))
}
