//! Runtime configuration read from the environment.

use std::env;
use std::path::PathBuf;

/// Default language model used for generation.
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
/// Default base URL of the GitHub REST API.
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
/// Default HTTP listen port.
pub const DEFAULT_PORT: u16 = 3001;

/// Process-wide configuration, built once at startup.
///
/// Credentials are optional: a missing one disables the matching
/// integration instead of failing startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Token for the hosting API.
    pub github_token: Option<String>,
    /// Base URL of the hosting API.
    pub github_api_url: String,
    /// Credential for the language-model provider.
    pub anthropic_api_key: Option<String>,
    /// Model identifier sent with every completion request.
    pub model: String,
    /// HTTP listen port for `serve`.
    pub port: u16,
    /// Directory to record port interactions into.
    pub record_dir: Option<PathBuf>,
    /// Cassette file or directory to replay instead of calling live services.
    pub replay_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            anthropic_api_key: None,
            model: DEFAULT_MODEL.to_string(),
            port: DEFAULT_PORT,
            record_dir: None,
            replay_path: None,
        }
    }
}

impl AppConfig {
    /// Loads `.env` (if present) and reads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error string if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, String> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    ///
    /// Returns an error string if `PORT` is set but is not a valid port number.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match get("PORT") {
            Some(raw) => {
                raw.parse::<u16>().map_err(|e| format!("Invalid PORT value {raw:?}: {e}"))?
            }
            None => DEFAULT_PORT,
        };

        Ok(Self {
            github_token: get("GITHUB_TOKEN"),
            github_api_url: get("GITHUB_API_URL").map_or_else(
                || DEFAULT_GITHUB_API_URL.to_string(),
                |u| u.trim_end_matches('/').to_string(),
            ),
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            model: get("REPOTEST_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            port,
            record_dir: get("REPOTEST_RECORD").map(PathBuf::from),
            replay_path: get("REPOTEST_REPLAY").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_environment_is_empty() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.github_token.is_none());
        assert!(config.anthropic_api_key.is_none());
    }

    #[test]
    fn reads_credentials_and_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("GITHUB_TOKEN", "ghp_abc"),
            ("ANTHROPIC_API_KEY", "sk-test"),
            ("REPOTEST_MODEL", "claude-test"),
            ("GITHUB_API_URL", "http://localhost:9000/"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.github_token.as_deref(), Some("ghp_abc"));
        assert_eq!(config.anthropic_api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "claude-test");
        assert_eq!(config.github_api_url, "http://localhost:9000");
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn blank_credentials_count_as_unset() {
        let config = AppConfig::from_lookup(lookup_from(&[("GITHUB_TOKEN", "   ")])).unwrap();
        assert!(config.github_token.is_none());
    }

    #[test]
    fn rejects_malformed_port() {
        let err = AppConfig::from_lookup(lookup_from(&[("PORT", "eighty")])).unwrap_err();
        assert!(err.contains("Invalid PORT"));
    }
}
