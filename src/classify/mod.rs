//! Turns a hosting API tree listing into classified code-file records.
//!
//! Classification is a pure, total function: directories and files with
//! unrecognized extensions are dropped, malformed entries are skipped, and
//! input order is preserved.

pub mod languages;

use serde::{Deserialize, Serialize};

use crate::ports::{EntryKind, TreeEntry};

pub use languages::{is_code_extension, language_for};

/// Base URL for raw file content downloads.
pub const RAW_CONTENT_BASE: &str = "https://raw.githubusercontent.com";

/// A code file selected from a repository tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeFileRecord {
    /// Slash-separated path relative to the repository root.
    pub path: String,
    /// Language label, `None` for accepted extensions without one.
    pub language: Option<String>,
    /// Size in bytes as reported by the provider, `0` when absent.
    pub size: u64,
    /// Provider content hash, verbatim.
    pub sha: String,
    /// Raw-content download URL.
    pub download_url: Option<String>,
}

/// Identifies which branch of which repository a tree was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Branch the tree was read from.
    pub branch: String,
}

impl RepoLocation {
    /// Creates a location from its parts.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        branch: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            branch: branch.into(),
        }
    }

    /// Raw-content URL for `path` on this branch. Not fetched.
    #[must_use]
    pub fn raw_url(&self, path: &str) -> String {
        format!("{RAW_CONTENT_BASE}/{}/{}/{}/{path}", self.owner, self.repo, self.branch)
    }
}

/// Extension of the final path segment, lowercased.
///
/// Returns `None` when the segment has no `.` or ends with one.
#[must_use]
pub fn extension_of(path: &str) -> Option<String> {
    let file_name = path.rsplit('/').next().unwrap_or(path);
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Classifies one tree entry, returning `None` when it is not a code file.
#[must_use]
pub fn classify_entry(entry: &TreeEntry, location: &RepoLocation) -> Option<CodeFileRecord> {
    if entry.kind != EntryKind::Blob {
        return None;
    }
    let path = entry.path.as_deref().filter(|p| !p.is_empty())?;
    let ext = extension_of(path)?;
    if !is_code_extension(&ext) {
        return None;
    }

    Some(CodeFileRecord {
        path: path.to_string(),
        language: language_for(&ext).map(str::to_string),
        size: entry.size.unwrap_or(0),
        sha: entry.sha.clone(),
        download_url: Some(location.raw_url(path)),
    })
}

/// Classifies a full tree listing, keeping input order.
#[must_use]
pub fn classify_tree(entries: &[TreeEntry], location: &RepoLocation) -> Vec<CodeFileRecord> {
    entries.iter().filter_map(|entry| classify_entry(entry, location)).collect()
}
