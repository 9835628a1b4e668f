//! Error taxonomy shared by the services and both outer surfaces.

use thiserror::Error;

/// Failure raised by the repository and generation services.
///
/// Parsing of model output never produces one of these; malformed output
/// degrades to a fallback result instead.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// No hosting credential was configured at startup.
    #[error("GitHub integration not configured: set GITHUB_TOKEN to enable repository access")]
    HostingNotConfigured,

    /// No language-model credential was configured at startup.
    #[error("AI provider not configured: set ANTHROPIC_API_KEY to enable generation")]
    ProviderNotConfigured,

    /// The hosting provider reported that the repository does not exist.
    #[error("Repository not found: {0}")]
    NotFound(String),

    /// The request was rejected before any external call was made.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Transport or provider failure, message passed through verbatim.
    #[error("{0}")]
    Upstream(String),
}

/// Result type alias for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Phrase the hosting provider uses for missing repositories.
const NOT_FOUND_PHRASE: &str = "Not Found";

impl ServiceError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Classify a hosting provider failure by its message text.
    #[must_use]
    pub fn from_hosting(message: String) -> Self {
        if message.contains(NOT_FOUND_PHRASE) {
            Self::NotFound(message)
        } else {
            Self::Upstream(message)
        }
    }

    /// Short, stable category string for failure envelopes.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::HostingNotConfigured => "GitHub integration not configured",
            Self::ProviderNotConfigured => "AI provider not configured",
            Self::NotFound(_) => "Repository not found",
            Self::Validation(_) => "Invalid request",
            Self::Upstream(_) => "Upstream request failed",
        }
    }

    /// Detail message for failure envelopes.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::NotFound(msg) | Self::Validation(msg) | Self::Upstream(msg) => msg.clone(),
            Self::HostingNotConfigured | Self::ProviderNotConfigured => self.to_string(),
        }
    }

    /// Map to HTTP status code.
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            Self::HostingNotConfigured => 503,
            Self::NotFound(_) => 404,
            Self::Validation(_) => 400,
            Self::ProviderNotConfigured | Self::Upstream(_) => 500,
        }
    }

    /// Whether the failure needs operator action rather than a retry.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::HostingNotConfigured | Self::ProviderNotConfigured)
    }
}
