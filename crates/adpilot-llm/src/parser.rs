use adpilot_core::{AdPilotError, Shape, Structured};
use serde_json::Value;

const FENCE: &str = "```";

/// Removes a surrounding fenced code block (with optional language tag).
/// Text without a complete fence pair is returned trimmed but otherwise as-is.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(open) = trimmed.find(FENCE) else {
        return trimmed;
    };
    let after_open = &trimmed[open + FENCE.len()..];
    let Some(close) = after_open.find(FENCE) else {
        return trimmed;
    };
    let inner = &after_open[..close];

    // Drop a language tag such as `json` sitting directly after the fence.
    let inner = match inner.find('\n') {
        Some(newline) if is_language_tag(&inner[..newline]) => &inner[newline + 1..],
        _ => inner.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    inner.trim()
}

fn is_language_tag(s: &str) -> bool {
    s.trim()
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Parses raw backend text into `T`, checking the top-level JSON shape
/// against `T::schema()` before deserializing.
pub fn parse_response<T: Structured>(text: Option<&str>) -> Result<T, AdPilotError> {
    let text = text.map(str::trim).unwrap_or_default();
    if text.is_empty() {
        return Err(AdPilotError::EmptyResponse);
    }

    let cleaned = strip_code_fence(text);
    let value: Value = serde_json::from_str(cleaned)?;

    let expected = T::schema().shape();
    let found = Shape::of(&value);
    if expected != found {
        return Err(AdPilotError::ShapeMismatch {
            expected: expected.name(),
            found: found.name(),
        });
    }

    Ok(serde_json::from_value(value)?)
}
