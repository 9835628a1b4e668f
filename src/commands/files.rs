//! `repotest files` command.

use super::print_json;
use crate::context::ServiceContext;
use crate::repository;
use crate::server::envelope::FilesResponse;

/// Execute the `files` command.
///
/// # Errors
///
/// Returns an error string if hosting is unconfigured, the repository does
/// not exist, or the provider fails.
pub async fn run(ctx: &ServiceContext, owner: &str, repo: &str) -> Result<(), String> {
    let listing = repository::list_files(ctx, owner, repo).await.map_err(|e| e.to_string())?;
    print_json(&FilesResponse::from(listing))
}
