use super::{DEFAULT_SCORE, ReviewResult};
use serde::Deserialize;
use serde::de::Error as _;
use serde_json::{Number, Value};

const FENCE: &str = "```";

/// Shape the model is asked for, with every top-level field optional.
/// `null` is treated the same as a missing field. Section entries are not
/// inspected.
#[derive(Debug, Deserialize)]
struct RawReview {
    bugs: Option<Vec<Value>>,
    optimizations: Option<Vec<Value>>,
    best_practices: Option<Vec<Value>>,
    score: Option<Number>,
}

impl From<RawReview> for ReviewResult {
    fn from(raw: RawReview) -> Self {
        Self {
            bugs: raw.bugs.unwrap_or_default(),
            optimizations: raw.optimizations.unwrap_or_default(),
            best_practices: raw.best_practices.unwrap_or_default(),
            score: raw.score.unwrap_or_else(|| DEFAULT_SCORE.into()),
        }
    }
}

/// Trim the completion and unwrap a fenced block if there is one.
///
/// The opening fence may carry a language tag (` ```json `). A missing
/// closing fence is tolerated.
pub fn strip_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(rest) = text.strip_prefix(FENCE) else {
        return text;
    };

    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+')))
        .unwrap_or(rest.len());
    let body = &rest[tag_len..];

    let body = match body.rfind(FENCE) {
        Some(end) => &body[..end],
        None => body,
    };

    body.trim()
}

/// Parse a completion into a [`ReviewResult`], filling in defaults for
/// missing sections. Anything that is not a JSON object, a section that is
/// not a list, or a score that is not a number is an error.
pub fn parse_review(raw: &str) -> Result<ReviewResult, serde_json::Error> {
    let value: Value = serde_json::from_str(strip_fences(raw))?;
    if !value.is_object() {
        return Err(serde_json::Error::custom("expected a JSON object"));
    }

    let raw: RawReview = serde_json::from_value(value)?;
    Ok(raw.into())
}
