//! Recording adapter for the `HostingApi` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::{HostingApi, HostingFuture, RepositorySummary, TreeEntry};

/// Records hosting API interactions while delegating to an inner implementation.
pub struct RecordingHostingApi {
    inner: Box<dyn HostingApi>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingHostingApi {
    /// Creates a new recording hosting API wrapping the given implementation.
    pub fn new(inner: Box<dyn HostingApi>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

#[derive(Serialize)]
struct RepoInput {
    owner: String,
    repo: String,
}

#[derive(Serialize)]
struct TreeInput {
    owner: String,
    repo: String,
    branch: String,
}

impl HostingApi for RecordingHostingApi {
    fn list_repositories(&self) -> HostingFuture<'_, Vec<RepositorySummary>> {
        Box::pin(async move {
            let result = self.inner.list_repositories().await;
            record_result(&self.recorder, "hosting", "list_repositories", &(), &result);
            result
        })
    }

    fn default_branch(&self, owner: &str, repo: &str) -> HostingFuture<'_, String> {
        let input = RepoInput { owner: owner.to_string(), repo: repo.to_string() };
        Box::pin(async move {
            let result = self.inner.default_branch(&input.owner, &input.repo).await;
            record_result(&self.recorder, "hosting", "default_branch", &input, &result);
            result
        })
    }

    fn tree(&self, owner: &str, repo: &str, branch: &str) -> HostingFuture<'_, Vec<TreeEntry>> {
        let input = TreeInput {
            owner: owner.to_string(),
            repo: repo.to_string(),
            branch: branch.to_string(),
        };
        Box::pin(async move {
            let result = self.inner.tree(&input.owner, &input.repo, &input.branch).await;
            record_result(&self.recorder, "hosting", "tree", &input, &result);
            result
        })
    }
}
