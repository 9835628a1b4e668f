//! Per-port cassette selection for replay.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use super::format::Cassette;
use super::replayer::CassetteReplayer;

/// Shared handle to a replayer, as held by replaying adapters.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Optional cassette file per port.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CassetteConfig {
    /// Cassette for the hosting port.
    pub hosting: Option<PathBuf>,
    /// Cassette for the LLM port.
    pub llm: Option<PathBuf>,
    /// Cassette for the clock port.
    pub clock: Option<PathBuf>,
}

/// Loaded replayers, one per configured port.
pub struct PortReplayers {
    /// Replayer for the hosting port.
    pub hosting: Option<SharedReplayer>,
    /// Replayer for the LLM port.
    pub llm: Option<SharedReplayer>,
    /// Replayer for the clock port.
    pub clock: Option<SharedReplayer>,
}

/// File name a recording session uses for `port`.
#[must_use]
pub fn cassette_file_name(port: &str) -> String {
    format!("{port}.cassette.yaml")
}

impl CassetteConfig {
    /// Picks up `<port>.cassette.yaml` files that exist in `dir`.
    #[must_use]
    pub fn from_dir(dir: &Path) -> Self {
        let find = |port: &str| Some(dir.join(cassette_file_name(port))).filter(|p| p.is_file());
        Self {
            hosting: find("hosting"),
            llm: find("llm"),
            clock: find("clock"),
        }
    }

    /// Load one cassette file into a shareable replayer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<SharedReplayer, String> {
        let cassette = Cassette::load(path)?;
        Ok(Arc::new(Mutex::new(CassetteReplayer::new(&cassette))))
    }

    /// Load every configured cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn load_all(&self) -> Result<PortReplayers, String> {
        Ok(PortReplayers {
            hosting: self.hosting.as_deref().map(Self::load).transpose()?,
            llm: self.llm.as_deref().map(Self::load).transpose()?,
            clock: self.clock.as_deref().map(Self::load).transpose()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use serde_json::json;

    #[test]
    fn from_dir_finds_only_existing_cassettes() {
        let dir = std::env::temp_dir().join("repotest_cassette_config_dir");
        let _ = std::fs::remove_dir_all(&dir);
        let mut rec = CassetteRecorder::new(dir.join(cassette_file_name("hosting")), "h", "abc");
        rec.record("hosting", "list_repositories", json!(null), json!({"Ok": []}));
        rec.finish().unwrap();

        let config = CassetteConfig::from_dir(&dir);
        assert_eq!(config.hosting, Some(dir.join("hosting.cassette.yaml")));
        assert!(config.llm.is_none());
        assert!(config.clock.is_none());

        let replayers = config.load_all().unwrap();
        assert!(replayers.hosting.is_some());
        assert!(replayers.llm.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_all_reports_unreadable_cassette() {
        let config = CassetteConfig {
            llm: Some(PathBuf::from("/nonexistent/llm.cassette.yaml")),
            ..CassetteConfig::default()
        };
        let err = config.load_all().err().unwrap();
        assert!(err.contains("Failed to read cassette file"));
    }
}
