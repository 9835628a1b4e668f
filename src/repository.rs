//! Repository listing and code-file discovery through the hosting port.

use serde::Serialize;
use tracing::{debug, info};

use crate::classify::{classify_tree, CodeFileRecord, RepoLocation};
use crate::context::ServiceContext;
use crate::error::{ServiceError, ServiceResult};
use crate::ports::{HostingApi, RepositorySummary};

/// Identifies the repository a file listing belongs to.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RepositoryRef {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// `owner/name`.
    pub full_name: String,
}

/// Code files of one repository's default branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFiles {
    /// Which repository was listed.
    pub repository: RepositoryRef,
    /// Branch the tree was read from.
    pub branch: String,
    /// Classified code files, in provider order.
    pub files: Vec<CodeFileRecord>,
}

/// Checks that `value` is usable as a single repository path segment.
fn check_segment(field: &str, value: &str) -> ServiceResult<()> {
    if value.is_empty() {
        return Err(ServiceError::validation("owner and repo are required"));
    }
    if matches!(value, "." | "..") || value.contains(['/', '\\', '?', '#']) {
        return Err(ServiceError::validation(format!("{field} {value:?} is not a valid name")));
    }
    Ok(())
}

fn hosting(ctx: &ServiceContext) -> ServiceResult<&dyn HostingApi> {
    ctx.hosting.as_deref().ok_or(ServiceError::HostingNotConfigured)
}

/// Lists the user's repositories, most recently updated first.
///
/// # Errors
///
/// Returns a configuration error when no hosting credential is configured,
/// or the provider's failure otherwise.
pub async fn list_repositories(ctx: &ServiceContext) -> ServiceResult<Vec<RepositorySummary>> {
    let repos = hosting(ctx)?
        .list_repositories()
        .await
        .map_err(|e| ServiceError::from_hosting(e.to_string()))?;
    info!(count = repos.len(), "listed repositories");
    Ok(repos)
}

/// Lists the code files on a repository's default branch.
///
/// # Errors
///
/// Returns a validation error for blank names or names that are not a
/// single path segment, a configuration error when
/// no hosting credential is configured, [`ServiceError::NotFound`] when the
/// provider reports the repository missing, or an upstream error otherwise.
pub async fn list_files(
    ctx: &ServiceContext,
    owner: &str,
    repo: &str,
) -> ServiceResult<RepositoryFiles> {
    let (owner, repo) = (owner.trim(), repo.trim());
    check_segment("owner", owner)?;
    check_segment("repo", repo)?;
    let api = hosting(ctx)?;

    let branch = api
        .default_branch(owner, repo)
        .await
        .map_err(|e| ServiceError::from_hosting(e.to_string()))?;
    debug!(owner, repo, branch = %branch, "resolved default branch");

    let entries = api
        .tree(owner, repo, &branch)
        .await
        .map_err(|e| ServiceError::from_hosting(e.to_string()))?;

    let location = RepoLocation::new(owner, repo, branch);
    let files = classify_tree(&entries, &location);
    info!(
        owner,
        repo,
        entries = entries.len(),
        files = files.len(),
        "classified repository tree"
    );

    Ok(RepositoryFiles {
        repository: RepositoryRef {
            owner: owner.to_string(),
            name: repo.to_string(),
            full_name: format!("{owner}/{repo}"),
        },
        branch: location.branch,
        files,
    })
}
