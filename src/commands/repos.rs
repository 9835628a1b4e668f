//! `repotest repos` command.

use super::print_json;
use crate::context::ServiceContext;
use crate::repository;
use crate::server::envelope::ReposResponse;

/// Execute the `repos` command.
///
/// Prints the same body `GET /api/repos` returns.
///
/// # Errors
///
/// Returns an error string if hosting is unconfigured or the listing fails.
pub async fn run(ctx: &ServiceContext) -> Result<(), String> {
    let repos = repository::list_repositories(ctx).await.map_err(|e| e.to_string())?;
    print_json(&ReposResponse::from(repos))
}
