//! Service context bundling all port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{AnthropicLlmClient, GitHubHostingApi, LiveClock};
use crate::adapters::recording::{RecordingClock, RecordingHostingApi, RecordingLlmClient};
use crate::adapters::replaying::{ReplayingClock, ReplayingHostingApi, ReplayingLlmClient};
use crate::cassette::config::CassetteConfig;
use crate::cassette::format::Cassette;
use crate::cassette::replayer::CassetteReplayer;
use crate::cassette::session::RecordingSession;
use crate::config::{AppConfig, DEFAULT_MODEL};
use crate::ports::clock::Clock;
use crate::ports::hosting::HostingApi;
use crate::ports::llm::LlmClient;

/// Bundles the port trait objects used by the services.
///
/// The hosting and LLM ports are optional: `None` means the matching
/// credential was absent at startup, and operations needing that port fail
/// with a configuration error. Built once and shared read-only by every
/// request.
pub struct ServiceContext {
    /// Clock for stamping generated artifacts.
    pub clock: Box<dyn Clock>,
    /// Repository hosting API, if configured.
    pub hosting: Option<Box<dyn HostingApi>>,
    /// Language model client, if configured.
    pub llm: Option<Box<dyn LlmClient>>,
    /// Model identifier sent with completion requests.
    pub model: String,
}

impl ServiceContext {
    /// Creates a live context from configuration.
    #[must_use]
    pub fn live(config: &AppConfig) -> Self {
        Self {
            clock: Box::new(LiveClock),
            hosting: config.github_token.as_ref().map(|token| {
                let api = GitHubHostingApi::new(&config.github_api_url, token);
                Box::new(api) as Box<dyn HostingApi>
            }),
            llm: config.anthropic_api_key.as_ref().map(|key| {
                Box::new(AnthropicLlmClient::new(key, &config.model)) as Box<dyn LlmClient>
            }),
            model: config.model.clone(),
        }
    }

    /// Creates a live context whose port traffic is captured by `session`.
    ///
    /// Unconfigured ports stay unconfigured and record nothing.
    #[must_use]
    pub fn recording(config: &AppConfig, session: &RecordingSession) -> Self {
        let live = Self::live(config);
        Self {
            clock: Box::new(RecordingClock::new(live.clock, Arc::clone(&session.clock))),
            hosting: live.hosting.map(|inner| {
                Box::new(RecordingHostingApi::new(inner, Arc::clone(&session.hosting)))
                    as Box<dyn HostingApi>
            }),
            llm: live.llm.map(|inner| {
                Box::new(RecordingLlmClient::new(inner, Arc::clone(&session.llm)))
                    as Box<dyn LlmClient>
            }),
            model: live.model,
        }
    }

    /// Creates a replaying context from one cassette holding every port.
    ///
    /// Each port gets its own replayer so per-port ordering is independent.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let cassette = Cassette::load(path)?;
        let replayer = || Arc::new(Mutex::new(CassetteReplayer::new(&cassette)));

        Ok(Self {
            clock: Box::new(ReplayingClock::new(replayer())),
            hosting: Some(Box::new(ReplayingHostingApi::new(replayer()))),
            llm: Some(Box::new(ReplayingLlmClient::new(replayer()))),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Creates a replaying context from per-port cassette files.
    ///
    /// Hosting and LLM ports without a cassette are left unconfigured; the
    /// clock without a cassette panics when read.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured cassette file cannot be read or parsed.
    pub fn replaying_from(config: &CassetteConfig) -> Result<Self, String> {
        let replayers = config.load_all()?;

        Ok(Self {
            clock: Box::new(
                replayers.clock.map_or_else(ReplayingClock::unconfigured, ReplayingClock::new),
            ),
            hosting: replayers
                .hosting
                .map(|r| Box::new(ReplayingHostingApi::new(r)) as Box<dyn HostingApi>),
            llm: replayers.llm.map(|r| Box::new(ReplayingLlmClient::new(r)) as Box<dyn LlmClient>),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Replays a cassette file, or a directory of per-port cassettes.
    ///
    /// # Errors
    ///
    /// Returns an error if any cassette cannot be read or parsed.
    pub fn replaying_path(path: &Path) -> Result<Self, String> {
        if path.is_dir() {
            Self::replaying_from(&CassetteConfig::from_dir(path))
        } else {
            Self::replaying(path)
        }
    }

    /// Whether repository operations are available.
    #[must_use]
    pub fn hosting_configured(&self) -> bool {
        self.hosting.is_some()
    }

    /// Whether generation operations are available.
    #[must_use]
    pub fn llm_configured(&self) -> bool {
        self.llm.is_some()
    }
}
