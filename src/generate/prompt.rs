//! Prompt construction for summary and code generation.

use std::fmt::Write as _;

use super::target::TestTarget;
use super::{CodeRequest, FileInput};

/// Maximum characters of each file embedded in a summary prompt.
pub const SUMMARY_CONTENT_LIMIT: usize = 2000;
/// Maximum characters of the source file embedded in a code prompt.
pub const CODE_CONTENT_LIMIT: usize = 3000;
/// Appended to content that was cut short.
pub const TRUNCATION_MARKER: &str = "\n... [truncated]";

/// Truncates `content` to at most `limit` characters, appending
/// [`TRUNCATION_MARKER`] when anything was removed.
#[must_use]
pub fn truncate_content(content: &str, limit: usize) -> String {
    match content.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &content[..cut]),
        None => content.to_string(),
    }
}

/// Builds the prompt asking for test-case summaries of a batch of files.
#[must_use]
pub fn build_summary_prompt(files: &[FileInput]) -> String {
    let mut prompt = String::new();

    prompt.push_str(
        "You are a senior test engineer. Analyze the following source files and \
         propose test cases that would give meaningful coverage.\n\n",
    );
    prompt.push_str("## Files\n\n");

    for file in files {
        let _ = writeln!(prompt, "### {}", file.filename);
        let _ = writeln!(prompt, "```");
        let _ = writeln!(prompt, "{}", truncate_content(&file.content, SUMMARY_CONTENT_LIMIT));
        let _ = writeln!(prompt, "```\n");
    }

    prompt.push_str(
        "## Instructions\n\n\
         Respond with a JSON array only, in exactly this format:\n\
         [\n  \
           {\"summaryId\": \"<unique short id>\", \"summaryText\": \"<1-2 sentence description of the test case>\"},\n  \
           ...\n\
         ]\n\n\
         - Each summaryId must be unique within the array.\n\
         - Each summaryText describes one test case in one or two sentences.\n\
         - Cover normal behavior, edge cases, and error handling.\n\n\
         IMPORTANT: Return ONLY the JSON array. Do not include explanations, prose, \
         or markdown fences before or after the JSON.\n",
    );

    prompt
}

/// Builds the prompt asking for test code implementing one summary.
#[must_use]
pub fn build_code_prompt(request: &CodeRequest, target: TestTarget) -> String {
    let mut prompt = String::new();
    let filename = request.display_filename();

    let _ = writeln!(
        prompt,
        "You are a senior test engineer. Write {} tests using {} for the source file below.\n",
        target.language, target.framework
    );
    let _ = writeln!(prompt, "## Test case ({})\n\n{}\n", request.summary_id, request.summary_text);
    let _ = writeln!(prompt, "## Source file: {filename}\n");
    let _ = writeln!(prompt, "```");
    let _ = writeln!(prompt, "{}", truncate_content(&request.file_content, CODE_CONTENT_LIMIT));
    let _ = writeln!(prompt, "```\n");

    let _ = write!(
        prompt,
        "## Instructions\n\n\
         - Language: {}\n\
         - Test framework: {}\n\
         - Import the code under test from `{filename}` using a relative path.\n\
         - Include any setup, mocks, and assertions needed for the test to run.\n\n\
         Return ONLY the test code. Do not wrap it in markdown fences and do not add explanations.\n",
        target.language, target.framework
    );

    prompt
}
