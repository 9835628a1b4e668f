//! Route handlers. Each one is a thin shim over a service operation.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::envelope::{
    CodeResponse, FailureResponse, FilesResponse, ReposResponse, SummaryResponse,
};
use crate::context::ServiceContext;
use crate::error::{ServiceError, ServiceResult};
use crate::generate::{self, CodeRequest, FileInput};
use crate::repository;

/// Shared state handed to every handler.
pub type AppState = Arc<ServiceContext>;

/// Body of `GET /api/health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"`.
    pub status: &'static str,
    /// Whether repository routes are usable.
    pub github: bool,
    /// Whether generation routes are usable.
    pub ai: bool,
}

pub(super) async fn health(State(ctx): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        github: ctx.hosting_configured(),
        ai: ctx.llm_configured(),
    })
}

pub(super) async fn list_repos(State(ctx): State<AppState>) -> ServiceResult<Json<ReposResponse>> {
    let repos = repository::list_repositories(&ctx).await?;
    Ok(Json(repos.into()))
}

pub(super) async fn list_files(
    State(ctx): State<AppState>,
    Path((owner, repo)): Path<(String, String)>,
) -> ServiceResult<Json<FilesResponse>> {
    let listing = repository::list_files(&ctx, &owner, &repo).await?;
    Ok(Json(listing.into()))
}

/// Loosely typed summary request so that missing fields become a
/// validation failure rather than an extractor rejection.
#[derive(Debug, Deserialize)]
pub(super) struct SummaryPayload {
    files: Option<Vec<FilePayload>>,
}

#[derive(Debug, Deserialize)]
struct FilePayload {
    filename: Option<String>,
    content: Option<String>,
}

impl SummaryPayload {
    fn into_files(self) -> ServiceResult<Vec<FileInput>> {
        let files = self
            .files
            .filter(|f| !f.is_empty())
            .ok_or_else(|| ServiceError::validation("files must be a non-empty array"))?;
        files
            .into_iter()
            .enumerate()
            .map(|(index, file)| match (file.filename, file.content) {
                (Some(filename), Some(content)) => Ok(FileInput { filename, content }),
                _ => Err(ServiceError::validation(format!(
                    "files[{index}] must have both filename and content"
                ))),
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CodePayload {
    summary_id: Option<String>,
    summary_text: Option<String>,
    file_content: Option<String>,
    filename: Option<String>,
}

impl From<CodePayload> for CodeRequest {
    fn from(payload: CodePayload) -> Self {
        Self {
            summary_id: payload.summary_id.unwrap_or_default(),
            summary_text: payload.summary_text.unwrap_or_default(),
            file_content: payload.file_content.unwrap_or_default(),
            filename: payload.filename,
        }
    }
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> ServiceResult<T> {
    payload.map(|Json(inner)| inner).map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "rejected request body");
        ServiceError::validation(rejection.body_text())
    })
}

pub(super) async fn generate_summary(
    State(ctx): State<AppState>,
    payload: Result<Json<SummaryPayload>, JsonRejection>,
) -> ServiceResult<Json<SummaryResponse>> {
    let files = body(payload)?.into_files()?;
    let batch = generate::generate_summaries(&ctx, &files).await?;
    Ok(Json(batch.into()))
}

pub(super) async fn generate_code(
    State(ctx): State<AppState>,
    payload: Result<Json<CodePayload>, JsonRejection>,
) -> ServiceResult<Json<CodeResponse>> {
    let request = CodeRequest::from(body(payload)?);
    let generation = generate::generate_code(&ctx, &request).await?;
    Ok(Json(generation.into()))
}

/// Whether `path` is the files route with a blank `owner` or `repo`, which
/// the router cannot match because its parameters need a non-empty segment.
fn is_files_route_missing_params(path: &str) -> bool {
    path.strip_prefix("/api/repos/")
        .and_then(|rest| rest.strip_suffix("/files"))
        .is_some_and(|params| {
            let segments: Vec<&str> = params.split('/').collect();
            segments.len() == 2 && segments.iter().any(|s| s.is_empty())
        })
}

pub(super) async fn not_found(uri: Uri) -> Response {
    if is_files_route_missing_params(uri.path()) {
        return ServiceError::validation("owner and repo are required").into_response();
    }
    (
        StatusCode::NOT_FOUND,
        Json(FailureResponse {
            success: false,
            error: "Not found".to_string(),
            message: Some(format!("No route for {}", uri.path())),
        }),
    )
        .into_response()
}
