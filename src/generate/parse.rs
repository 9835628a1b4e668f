//! Parsing of raw model output into typed results.
//!
//! Nothing here fails: malformed summary output degrades to a single
//! sentinel summary, and code output is passed through after removing a
//! wrapping markdown fence.

use std::collections::HashSet;

use serde_json::Value;

use super::TestSummary;

/// Identifier of the sentinel summary returned when output cannot be parsed.
pub const PARSE_ERROR_ID: &str = "parse-error-1";
/// Description carried by the sentinel summary.
pub const PARSE_ERROR_TEXT: &str =
    "The AI response could not be parsed into test summaries. Please try generating again.";

const FENCE: &str = "```";

/// Outcome of parsing summary output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryParse {
    /// At least one well-formed summary was found.
    Parsed(Vec<TestSummary>),
    /// Nothing usable was found; carries the sentinel summary.
    Fallback(TestSummary),
}

impl SummaryParse {
    /// Whether parsing fell back to the sentinel.
    #[must_use]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }

    /// Flattens the outcome into the summaries to return to callers.
    #[must_use]
    pub fn into_summaries(self) -> Vec<TestSummary> {
        match self {
            Self::Parsed(summaries) => summaries,
            Self::Fallback(sentinel) => vec![sentinel],
        }
    }
}

/// The fixed summary returned when model output is unusable.
#[must_use]
pub fn sentinel_summary() -> TestSummary {
    TestSummary {
        summary_id: PARSE_ERROR_ID.to_string(),
        summary_text: PARSE_ERROR_TEXT.to_string(),
    }
}

/// Substring from the first `[` to the last `]`, if both exist in that order.
fn bracketed_slice(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

fn parse_json(text: &str) -> Option<Value> {
    bracketed_slice(text)
        .and_then(|slice| serde_json::from_str(slice).ok())
        .or_else(|| serde_json::from_str(text.trim()).ok())
}

/// Validates one array element, requiring string `summaryId` and `summaryText`.
fn summary_from_value(value: &Value) -> Option<TestSummary> {
    let object = value.as_object()?;
    let id = object.get("summaryId")?.as_str()?;
    let text = object.get("summaryText")?.as_str()?;
    Some(TestSummary { summary_id: id.to_string(), summary_text: text.to_string() })
}

/// Parses raw model output into test summaries.
///
/// Elements failing validation are dropped individually; an element whose
/// `summaryId` repeats an earlier one is dropped as well.
#[must_use]
pub fn parse_summaries(text: &str) -> SummaryParse {
    let Some(Value::Array(items)) = parse_json(text) else {
        return SummaryParse::Fallback(sentinel_summary());
    };

    let mut seen = HashSet::new();
    let summaries: Vec<TestSummary> = items
        .iter()
        .filter_map(summary_from_value)
        .filter(|summary| seen.insert(summary.summary_id.clone()))
        .collect();

    if summaries.is_empty() {
        SummaryParse::Fallback(sentinel_summary())
    } else {
        SummaryParse::Parsed(summaries)
    }
}

/// Extracts test code from raw model output.
///
/// Removes one opening fence line (with optional language tag) and one
/// closing fence; everything between is returned untouched.
#[must_use]
pub fn parse_code(text: &str) -> String {
    let mut code = text.trim();

    if let Some(rest) = code.strip_prefix(FENCE) {
        code = match rest.split_once('\n') {
            Some((_tag, body)) => body,
            None => rest,
        };
    }
    if let Some(rest) = code.strip_suffix(FENCE) {
        code = rest.strip_suffix('\n').unwrap_or(rest);
        code = code.strip_suffix('\r').unwrap_or(code);
    }

    code.to_string()
}
