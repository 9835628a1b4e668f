//! Test summary and test code generation through the language-model port.
//!
//! Each operation runs prompt construction, a single model call, and
//! response parsing in that order. Nothing is retried.

pub mod parse;
pub mod prompt;
pub mod target;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::context::ServiceContext;
use crate::error::{ServiceError, ServiceResult};
use crate::ports::llm::{CompletionRequest, LlmClient};

pub use parse::{parse_code, parse_summaries, SummaryParse, PARSE_ERROR_ID};
pub use target::{detect_target, TestTarget};

/// Token budget for summary generation.
const SUMMARY_MAX_TOKENS: u32 = 2048;
/// Token budget for code generation.
const CODE_MAX_TOKENS: u32 = 4096;

/// One source file submitted for summary generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileInput {
    /// File name or repository path.
    pub filename: String,
    /// Raw text content.
    pub content: String,
}

/// A proposed test case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    /// Identifier, unique within one generated batch.
    pub summary_id: String,
    /// One or two sentence description.
    pub summary_text: String,
}

/// Request to turn one summary into test code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CodeRequest {
    /// Summary being implemented.
    pub summary_id: String,
    /// Description of the test case.
    pub summary_text: String,
    /// Source of the file under test.
    pub file_content: String,
    /// Name of the file under test, used for language detection.
    #[serde(default)]
    pub filename: Option<String>,
}

impl CodeRequest {
    /// File name shown in prompts.
    #[must_use]
    pub fn display_filename(&self) -> &str {
        self.filename.as_deref().filter(|f| !f.is_empty()).unwrap_or("source file")
    }

    /// Test target for this request's file.
    #[must_use]
    pub fn target(&self) -> TestTarget {
        detect_target(self.filename.as_deref().unwrap_or_default(), &self.file_content)
    }

    /// Checks that all required fields are present.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing field.
    pub fn validate(&self) -> ServiceResult<()> {
        for (name, value) in [
            ("summaryId", &self.summary_id),
            ("summaryText", &self.summary_text),
            ("fileContent", &self.file_content),
        ] {
            if value.trim().is_empty() {
                return Err(ServiceError::validation(format!("{name} is required")));
            }
        }
        Ok(())
    }
}

/// Generated test code plus the labels it was generated for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCodeArtifact {
    /// Test source code.
    pub code: String,
    /// Implementation language.
    pub language: String,
    /// Test framework label.
    pub test_framework: String,
}

/// Result of [`generate_summaries`].
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBatch {
    /// Parsed summaries, or the single sentinel on unusable output.
    pub summaries: Vec<TestSummary>,
    /// Provider that produced them.
    pub provider: String,
    /// When generation finished.
    pub generated_at: DateTime<Utc>,
}

/// Result of [`generate_code`].
#[derive(Debug, Clone, PartialEq)]
pub struct CodeGeneration {
    /// The generated artifact.
    pub artifact: GeneratedCodeArtifact,
    /// Provider that produced it.
    pub provider: String,
    /// When generation finished.
    pub generated_at: DateTime<Utc>,
}

/// Checks a summary batch: non-empty, every file named and with non-blank
/// content. Blank means empty or whitespace only, as in [`CodeRequest::validate`].
///
/// # Errors
///
/// Returns a validation error describing the first problem found.
pub fn validate_files(files: &[FileInput]) -> ServiceResult<()> {
    if files.is_empty() {
        return Err(ServiceError::validation("files must be a non-empty array"));
    }
    for (index, file) in files.iter().enumerate() {
        if file.filename.trim().is_empty() || file.content.trim().is_empty() {
            return Err(ServiceError::validation(format!(
                "files[{index}] must have both filename and content"
            )));
        }
    }
    Ok(())
}

fn llm(ctx: &ServiceContext) -> ServiceResult<&dyn LlmClient> {
    ctx.llm.as_deref().ok_or(ServiceError::ProviderNotConfigured)
}

/// Generates test-case summaries for a batch of files.
///
/// # Errors
///
/// Returns a validation error for an invalid batch, a configuration error
/// when no provider is configured, or an upstream error if the model call
/// fails. Unparseable model output is not an error.
pub async fn generate_summaries(
    ctx: &ServiceContext,
    files: &[FileInput],
) -> ServiceResult<SummaryBatch> {
    validate_files(files)?;
    let llm = llm(ctx)?;

    let request = CompletionRequest {
        model: ctx.model.clone(),
        prompt: prompt::build_summary_prompt(files),
        max_tokens: SUMMARY_MAX_TOKENS,
    };
    debug!(files = files.len(), prompt_bytes = request.prompt.len(), "requesting summaries");

    let response = llm
        .complete(&request)
        .await
        .map_err(|e| ServiceError::Upstream(format!("Summary generation failed: {e}")))?;

    let parsed = parse_summaries(&response.text);
    if parsed.is_fallback() {
        warn!(response_bytes = response.text.len(), "model output was not a usable summary array");
    }
    let summaries = parsed.into_summaries();
    info!(
        files = files.len(),
        summaries = summaries.len(),
        prompt_tokens = response.prompt_tokens,
        completion_tokens = response.completion_tokens,
        "generated test summaries"
    );

    Ok(SummaryBatch {
        summaries,
        provider: llm.provider_label(),
        generated_at: ctx.clock.now(),
    })
}

/// Generates test code implementing one summary.
///
/// # Errors
///
/// Returns a validation error for missing fields, a configuration error
/// when no provider is configured, or an upstream error if the model call
/// fails.
pub async fn generate_code(
    ctx: &ServiceContext,
    request: &CodeRequest,
) -> ServiceResult<CodeGeneration> {
    request.validate()?;
    let llm = llm(ctx)?;
    let target = request.target();

    let completion = CompletionRequest {
        model: ctx.model.clone(),
        prompt: prompt::build_code_prompt(request, target),
        max_tokens: CODE_MAX_TOKENS,
    };
    debug!(summary_id = %request.summary_id, language = target.language, "requesting test code");

    let response = llm
        .complete(&completion)
        .await
        .map_err(|e| ServiceError::Upstream(format!("Code generation failed: {e}")))?;

    let artifact = GeneratedCodeArtifact {
        code: parse_code(&response.text),
        language: target.language.to_string(),
        test_framework: target.framework.to_string(),
    };
    info!(
        summary_id = %request.summary_id,
        language = target.language,
        framework = target.framework,
        code_bytes = artifact.code.len(),
        "generated test code"
    );

    Ok(CodeGeneration {
        artifact,
        provider: llm.provider_label(),
        generated_at: ctx.clock.now(),
    })
}
