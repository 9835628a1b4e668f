//! Repository hosting port for repository metadata and file trees.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::PortError;

/// Boxed future returned by every [`HostingApi`] method.
pub type HostingFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, PortError>> + Send + 'a>>;

/// Snapshot of one repository as reported by the hosting API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RepositorySummary {
    /// Provider-assigned numeric identifier.
    pub id: u64,
    /// Short repository name.
    pub name: String,
    /// Fully-qualified `owner/name`.
    pub full_name: String,
    /// Free-form description, if the owner set one.
    pub description: Option<String>,
    /// Primary language detected by the provider.
    pub language: Option<String>,
    /// Star count.
    pub stars: u32,
    /// Fork count.
    pub forks: u32,
    /// Whether the repository is private.
    pub private: bool,
    /// Last update time.
    pub updated_at: DateTime<Utc>,
}

/// Kind of node in a recursive tree listing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A file with content.
    Blob,
    /// A directory.
    Tree,
    /// A submodule pointer.
    Commit,
    /// Anything the provider adds later.
    #[serde(other)]
    Other,
}

/// One node of a repository's recursive tree listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TreeEntry {
    /// Slash-separated path relative to the repository root.
    #[serde(default)]
    pub path: Option<String>,
    /// Node kind.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Content size in bytes; directories have none.
    #[serde(default)]
    pub size: Option<u64>,
    /// Opaque content hash.
    #[serde(default)]
    pub sha: String,
    /// API reference for the node's content.
    #[serde(default)]
    pub url: Option<String>,
}

/// Decodes tree entries one by one, dropping those that do not decode.
///
/// A node with no `type` or a non-numeric `size` is skipped instead of
/// failing the whole listing.
#[must_use]
pub fn decode_tree_entries(values: Vec<Value>) -> Vec<TreeEntry> {
    let total = values.len();
    let entries: Vec<TreeEntry> =
        values.into_iter().filter_map(|value| serde_json::from_value(value).ok()).collect();
    if entries.len() < total {
        warn!(skipped = total - entries.len(), "skipped malformed tree entries");
    }
    entries
}

/// Read access to a repository hosting service.
///
/// Abstracting the hosting API allows deterministic replay and testing
/// without network access or credentials.
pub trait HostingApi: Send + Sync {
    /// Lists the authenticated user's repositories, most recently updated first.
    ///
    /// # Errors
    ///
    /// Returns an error carrying the provider's message if the call fails.
    fn list_repositories(&self) -> HostingFuture<'_, Vec<RepositorySummary>>;

    /// Returns the name of the repository's default branch.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository does not exist or the call fails.
    fn default_branch(&self, owner: &str, repo: &str) -> HostingFuture<'_, String>;

    /// Returns the full recursive tree listing of `branch`.
    ///
    /// # Errors
    ///
    /// Returns an error if the branch or repository cannot be read.
    fn tree(&self, owner: &str, repo: &str, branch: &str) -> HostingFuture<'_, Vec<TreeEntry>>;
}
