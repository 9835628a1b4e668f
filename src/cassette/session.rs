//! Recording session managing one cassette recorder per port.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::warn;

use super::config::cassette_file_name;
use super::recorder::CassetteRecorder;

/// Per-port recorders writing into one timestamped directory.
///
/// The directory can later be replayed with `REPOTEST_REPLAY=<dir>`.
pub struct RecordingSession {
    /// Recorder for hosting API interactions.
    pub hosting: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for LLM interactions.
    pub llm: Arc<Mutex<CassetteRecorder>>,
    /// Recorder for clock interactions.
    pub clock: Arc<Mutex<CassetteRecorder>>,
    output_dir: PathBuf,
}

impl RecordingSession {
    /// Start a session in a new `<root>/<timestamp>/` directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory already exists or cannot be created.
    pub fn new(root: &Path) -> Result<Self, String> {
        let timestamp = Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let output_dir = root.join(&timestamp);

        if output_dir.exists() {
            return Err(format!("Cassette directory already exists: {}", output_dir.display()));
        }
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create cassette directory: {e}"))?;

        let commit = commit_hash();
        let make_recorder = |port: &str| {
            let path = output_dir.join(cassette_file_name(port));
            let name = format!("{timestamp}-{port}");
            Arc::new(Mutex::new(CassetteRecorder::new(path, name, &commit)))
        };

        Ok(Self {
            hosting: make_recorder("hosting"),
            llm: make_recorder("llm"),
            clock: make_recorder("clock"),
            output_dir,
        })
    }

    /// Directory the cassettes are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write every port's cassette and return the output directory.
    ///
    /// Ports with no recorded interactions are skipped so replay treats
    /// them as unconfigured.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds its recorder or a file
    /// cannot be written.
    pub fn finish(self) -> Result<PathBuf, String> {
        fn finish_one(arc: Arc<Mutex<CassetteRecorder>>, port: &str) -> Result<(), String> {
            let recorder = Arc::try_unwrap(arc)
                .map_err(|_| format!("Recording adapter for {port} still has references"))?
                .into_inner()
                .map_err(|e| format!("Recorder lock for {port} poisoned: {e}"))?;
            if recorder.is_empty() {
                return Ok(());
            }
            recorder.finish().map_err(|e| format!("Failed to write {port} cassette: {e}"))?;
            Ok(())
        }

        finish_one(self.hosting, "hosting")?;
        finish_one(self.llm, "llm")?;
        finish_one(self.clock, "clock")?;

        Ok(self.output_dir)
    }
}

/// Current git commit hash, or `"unknown"` outside a repository.
fn commit_hash() -> String {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        warn!("could not determine git commit hash for cassette, using 'unknown'");
        "unknown".to_string()
    })
}
