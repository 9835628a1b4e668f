//! JSON response shapes shared by the HTTP surface and the CLI.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, warn};

use crate::classify::CodeFileRecord;
use crate::error::ServiceError;
use crate::generate::{CodeGeneration, SummaryBatch, TestSummary};
use crate::ports::RepositorySummary;
use crate::repository::{RepositoryFiles, RepositoryRef};

/// Body of `GET /api/repos`.
#[derive(Debug, Serialize)]
pub struct ReposResponse {
    /// Always `true`.
    pub success: bool,
    /// Repositories, most recently updated first.
    pub repos: Vec<RepositorySummary>,
    /// Number of repositories.
    pub total: usize,
}

impl From<Vec<RepositorySummary>> for ReposResponse {
    fn from(repos: Vec<RepositorySummary>) -> Self {
        Self {
            success: true,
            total: repos.len(),
            repos,
        }
    }
}

/// Body of `GET /api/repos/{owner}/{repo}/files`.
#[derive(Debug, Serialize)]
pub struct FilesResponse {
    /// Always `true`.
    pub success: bool,
    /// Code files on the default branch.
    pub files: Vec<CodeFileRecord>,
    /// Number of files.
    pub total: usize,
    /// The listed repository.
    pub repository: RepositoryRef,
}

impl From<RepositoryFiles> for FilesResponse {
    fn from(listing: RepositoryFiles) -> Self {
        Self {
            success: true,
            total: listing.files.len(),
            files: listing.files,
            repository: listing.repository,
        }
    }
}

/// Body of `POST /api/generate-summary`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    /// Always `true`.
    pub success: bool,
    /// Generated summaries.
    pub summaries: Vec<TestSummary>,
    /// Number of summaries.
    pub total: usize,
    /// Completion time.
    pub generated_at: DateTime<Utc>,
    /// Provider label.
    pub ai_provider: String,
}

impl From<SummaryBatch> for SummaryResponse {
    fn from(batch: SummaryBatch) -> Self {
        Self {
            success: true,
            total: batch.summaries.len(),
            summaries: batch.summaries,
            generated_at: batch.generated_at,
            ai_provider: batch.provider,
        }
    }
}

/// Body of `POST /api/generate-code`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeResponse {
    /// Always `true`.
    pub success: bool,
    /// Generated test code.
    pub code: String,
    /// Implementation language.
    pub language: String,
    /// Test framework label.
    pub test_framework: String,
    /// Completion time.
    pub generated_at: DateTime<Utc>,
    /// Provider label.
    pub ai_provider: String,
}

impl From<CodeGeneration> for CodeResponse {
    fn from(generation: CodeGeneration) -> Self {
        Self {
            success: true,
            code: generation.artifact.code,
            language: generation.artifact.language,
            test_framework: generation.artifact.test_framework,
            generated_at: generation.generated_at,
            ai_provider: generation.provider,
        }
    }
}

/// Body of every failed request.
#[derive(Debug, Serialize)]
pub struct FailureResponse {
    /// Always `false`.
    pub success: bool,
    /// Short category.
    pub error: String,
    /// Longer explanation, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<&ServiceError> for FailureResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            success: false,
            error: err.category().to_string(),
            message: Some(err.detail()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if self.is_configuration() {
            error!(status = status.as_u16(), error = %self, "integration not configured");
        } else {
            warn!(status = status.as_u16(), error = %self, "request failed");
        }
        (status, Json(FailureResponse::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::GeneratedCodeArtifact;
    use serde_json::json;

    #[test]
    fn failure_envelope_shape() {
        let body = serde_json::to_value(FailureResponse::from(&ServiceError::HostingNotConfigured))
            .unwrap();
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"], json!("GitHub integration not configured"));
        assert!(body["message"].as_str().unwrap().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn failure_envelope_omits_absent_message() {
        let body = serde_json::to_value(FailureResponse {
            success: false,
            error: "Not found".into(),
            message: None,
        })
        .unwrap();
        assert!(body.get("message").is_none());
    }

    #[test]
    fn code_response_uses_camel_case() {
        let response = CodeResponse::from(CodeGeneration {
            artifact: GeneratedCodeArtifact {
                code: "test()".into(),
                language: "Python".into(),
                test_framework: "pytest".into(),
            },
            provider: "p".into(),
            generated_at: "2025-01-01T00:00:00Z".parse().unwrap(),
        });
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body["testFramework"], json!("pytest"));
        assert_eq!(body["aiProvider"], json!("p"));
        assert_eq!(body["generatedAt"], json!("2025-01-01T00:00:00Z"));
    }

    #[test]
    fn error_status_codes() {
        assert_eq!(ServiceError::HostingNotConfigured.into_response().status(), 503);
        assert_eq!(ServiceError::NotFound("x".into()).into_response().status(), 404);
        assert_eq!(ServiceError::validation("x").into_response().status(), 400);
    }
}
