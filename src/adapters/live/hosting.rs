//! Live adapter for the `HostingApi` port using the GitHub REST API.

use chrono::{DateTime, Utc};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::ports::hosting::decode_tree_entries;
use crate::ports::{HostingApi, HostingFuture, PortError, RepositorySummary, TreeEntry};

const USER_AGENT: &str = concat!("repotest/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";
const REPOS_PER_PAGE: u32 = 100;

/// GitHub client authenticated with a personal access token.
pub struct GitHubHostingApi {
    client: Client,
    base_url: String,
    token: String,
}

impl GitHubHostingApi {
    /// Creates a client for the API at `base_url` using `token`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Builds `<base>/<segments...>`, percent-encoding each segment so that
    /// `/`, `?` and `#` inside a name stay part of that segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, PortError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| -> PortError {
            format!("Invalid GitHub API URL {:?}: {e}", self.base_url).into()
        })?;
        url.path_segments_mut()
            .map_err(|()| -> PortError {
                format!("GitHub API URL {:?} cannot take a path", self.base_url).into()
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(&self, url: Url) -> Result<T, PortError> {
        debug!(path = url.path(), "GitHub request");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .send()
            .await
            .map_err(|e| -> PortError { format!("GitHub API request failed: {e}").into() })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| -> PortError {
            format!("Failed to read GitHub API response: {e}").into()
        })?;

        if !status.is_success() {
            let msg = serde_json::from_str::<GitHubError>(&body).map(|e| e.message).unwrap_or(body);
            return Err(format!("GitHub API error ({}): {msg}", status.as_u16()).into());
        }

        serde_json::from_str(&body)
            .map_err(|e| format!("Failed to parse GitHub API response: {e}").into())
    }
}

/// Repository object returned by `/user/repos`.
#[derive(Deserialize)]
struct GitHubRepo {
    id: u64,
    name: String,
    full_name: String,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: u32,
    forks_count: u32,
    private: bool,
    updated_at: DateTime<Utc>,
}

impl From<GitHubRepo> for RepositorySummary {
    fn from(repo: GitHubRepo) -> Self {
        Self {
            id: repo.id,
            name: repo.name,
            full_name: repo.full_name,
            description: repo.description,
            language: repo.language,
            stars: repo.stargazers_count,
            forks: repo.forks_count,
            private: repo.private,
            updated_at: repo.updated_at,
        }
    }
}

#[derive(Deserialize)]
struct GitHubRepoDetail {
    default_branch: String,
}

/// Entries stay raw here so one malformed node cannot fail the listing.
#[derive(Deserialize)]
struct GitHubTree {
    tree: Vec<Value>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Deserialize)]
struct GitHubError {
    message: String,
}

impl HostingApi for GitHubHostingApi {
    fn list_repositories(&self) -> HostingFuture<'_, Vec<RepositorySummary>> {
        Box::pin(async move {
            let mut url = self.endpoint(&["user", "repos"])?;
            url.query_pairs_mut()
                .append_pair("sort", "updated")
                .append_pair("direction", "desc")
                .append_pair("per_page", &REPOS_PER_PAGE.to_string());
            let repos: Vec<GitHubRepo> = self.fetch(url).await?;
            Ok(repos.into_iter().map(RepositorySummary::from).collect())
        })
    }

    fn default_branch(&self, owner: &str, repo: &str) -> HostingFuture<'_, String> {
        let url = self.endpoint(&["repos", owner, repo]);
        Box::pin(async move {
            let detail: GitHubRepoDetail = self.fetch(url?).await?;
            Ok(detail.default_branch)
        })
    }

    fn tree(&self, owner: &str, repo: &str, branch: &str) -> HostingFuture<'_, Vec<TreeEntry>> {
        let url = self.endpoint(&["repos", owner, repo, "git", "trees", branch]).map(|mut url| {
            url.query_pairs_mut().append_pair("recursive", "1");
            url
        });
        let full_name = format!("{owner}/{repo}");
        Box::pin(async move {
            let listing: GitHubTree = self.fetch(url?).await?;
            if listing.truncated {
                warn!(
                    repository = %full_name,
                    entries = listing.tree.len(),
                    "GitHub truncated the tree listing"
                );
            }
            Ok(decode_tree_entries(listing.tree))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::Uri;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    #[test]
    fn repository_json_maps_to_summary() {
        let raw = r#"{
            "id": 42, "name": "widgets", "full_name": "acme/widgets",
            "description": null, "language": "TypeScript",
            "stargazers_count": 7, "forks_count": 2, "private": true,
            "updated_at": "2025-01-02T03:04:05Z", "default_branch": "main"
        }"#;
        let repo: GitHubRepo = serde_json::from_str(raw).unwrap();
        let summary = RepositorySummary::from(repo);
        assert_eq!(summary.full_name, "acme/widgets");
        assert_eq!(summary.stars, 7);
        assert_eq!(summary.forks, 2);
        assert!(summary.private);
        assert_eq!(summary.description, None);
        assert_eq!(summary.updated_at.to_rfc3339(), "2025-01-02T03:04:05+00:00");
    }

    #[test]
    fn tree_listing_defaults_truncated_flag() {
        let listing: GitHubTree = serde_json::from_str(r#"{"sha": "x", "tree": []}"#).unwrap();
        assert!(!listing.truncated);
        assert!(listing.tree.is_empty());
    }

    /// Serves a fixed body for every path and records each request URI.
    async fn recording_server() -> (String, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::clone(&seen);
        let app = Router::new()
            .fallback(|State(seen): State<Arc<Mutex<Vec<String>>>>, uri: Uri| async move {
                seen.lock().unwrap().push(uri.to_string());
                Json(json!({
                    "default_branch": "fix#12",
                    "tree": [
                        {"path": "src/app.ts", "type": "blob", "sha": "b1", "size": 10},
                        {"path": "weird.py", "sha": "b2"}
                    ]
                }))
            })
            .with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        (format!("http://{addr}"), seen)
    }

    #[tokio::test]
    async fn names_are_sent_as_single_encoded_segments() {
        let (base, seen) = recording_server().await;
        let api = GitHubHostingApi::new(base, "token");

        let branch = api.default_branch("acme", "widgets").await.unwrap();
        assert_eq!(branch, "fix#12");
        api.tree("acme", "widgets", &branch).await.unwrap();
        api.default_branch("acme", "../../user/keys?x=").await.unwrap();

        let uris = seen.lock().unwrap().clone();
        assert_eq!(uris[0], "/repos/acme/widgets");
        assert_eq!(uris[1], "/repos/acme/widgets/git/trees/fix%2312?recursive=1");
        assert!(uris[2].starts_with("/repos/acme/"), "escaped the repos path: {}", uris[2]);
        assert!(!uris[2].contains('?'), "query injected: {}", uris[2]);
    }

    #[tokio::test]
    async fn tree_skips_entries_that_do_not_decode() {
        let (base, _seen) = recording_server().await;
        let api = GitHubHostingApi::new(base, "token");

        let entries = api.tree("acme", "widgets", "main").await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path.as_deref(), Some("src/app.ts"));
    }

    #[tokio::test]
    async fn repository_listing_asks_for_most_recent_first() {
        let (base, seen) = recording_server().await;
        let api = GitHubHostingApi::new(base, "token");

        // The fixed body is not a repository array, so only the request matters.
        let _ = api.list_repositories().await;
        let uris = seen.lock().unwrap().clone();
        assert_eq!(uris[0], "/user/repos?sort=updated&direction=desc&per_page=100");
    }
}
