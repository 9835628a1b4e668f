//! Replaying adapter for the `HostingApi` port.

use std::sync::{Arc, Mutex};

use serde_json::Value;

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{decode_tree_entries, HostingApi, HostingFuture, RepositorySummary, TreeEntry};

/// Serves recorded hosting API responses from a cassette.
pub struct ReplayingHostingApi {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingHostingApi {
    /// Create a replaying hosting API backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl HostingApi for ReplayingHostingApi {
    fn list_repositories(&self) -> HostingFuture<'_, Vec<RepositorySummary>> {
        let output = next_output(Some(&self.replayer), "hosting", "list_repositories");
        Box::pin(async move { replay_result(output) })
    }

    fn default_branch(&self, _owner: &str, _repo: &str) -> HostingFuture<'_, String> {
        let output = next_output(Some(&self.replayer), "hosting", "default_branch");
        Box::pin(async move { replay_result(output) })
    }

    fn tree(&self, _owner: &str, _repo: &str, _branch: &str) -> HostingFuture<'_, Vec<TreeEntry>> {
        let output = next_output(Some(&self.replayer), "hosting", "tree");
        Box::pin(async move { replay_result::<Vec<Value>>(output).map(decode_tree_entries) })
    }
}
