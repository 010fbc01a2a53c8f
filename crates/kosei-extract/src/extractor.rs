//! The extraction cascade.
//!
//! Strategies run in a fixed order and the first success wins. Earlier
//! strategies are stricter; later ones trade precision for recall so that a
//! mangled but recognizable response still yields usable text.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

/// JSON field the model is instructed to respond with.
pub const CORRECTED_TEXT_KEY: &str = "corrected_text";

/// Maximum characters of the response echoed back in a malformed-response error.
const SNIPPET_MAX_CHARS: usize = 200;

// =============================================================================
// Compiled regex sets (compiled once, reused across calls)
// =============================================================================

// ```json ... ``` or bare ``` ... ```; the fence language tag is optional.
static FENCED_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?i:json)?[ \t]*\r?\n?(.*?)\r?\n?```").unwrap());

// A single brace-to-brace span with no nested braces.
static FLAT_OBJECT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)\{[^{}]*"corrected_text"[^{}]*\}"#).unwrap());

// One level of brace nesting allowed inside the object.
static NESTED_OBJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{(?:[^{}]|\{[^{}]*\})*"corrected_text"(?:[^{}]|\{[^{}]*\})*\}"#).unwrap()
});

// Last resort: capture the field's string value directly, honoring escapes.
static FIELD_CAPTURE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""corrected_text"\s*:\s*"((?:[^"\\]|\\.)*)""#).unwrap());

// =============================================================================
// Types
// =============================================================================

/// Which cascade stage recovered the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The whole response parsed as a JSON object.
    Direct,
    /// A fenced code block contained the JSON object.
    FencedBlock,
    /// A flat `{...}` span inside surrounding prose parsed.
    FlatObject,
    /// A `{...}` span with one level of nesting parsed.
    NestedObject,
    /// The field value was captured by regex from broken JSON.
    FieldCapture,
    /// The response carried no JSON structure and was taken verbatim.
    PlainProse,
}

/// Successful extraction: the recovered text plus the stage that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub text: String,
    pub strategy: Strategy,
}

/// The response looked structured but every strategy failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("response looked structured but `corrected_text` could not be recovered: {snippet}")]
    Malformed { snippet: String },
}

// =============================================================================
// Cascade
// =============================================================================

/// Recover the corrected text from a raw model response body.
///
/// Returns [`ExtractError::Malformed`] only when the response starts with a
/// brace or a code fence yet no strategy could recover the field; anything
/// else falls through to [`Strategy::PlainProse`] and is returned verbatim.
pub fn extract_corrected_text(body: &str) -> Result<Extraction, ExtractError> {
    let trimmed = body.trim();

    // 1. The response is exactly the JSON object we asked for.
    if let Some(text) = parse_object(trimmed) {
        return Ok(ok(text, Strategy::Direct));
    }

    // 2. The object is wrapped in a fenced code block, possibly among several.
    for caps in FENCED_BLOCK_RE.captures_iter(trimmed) {
        if let Some(inner) = caps.get(1) {
            if let Some(text) = parse_object(inner.as_str().trim()) {
                return Ok(ok(text, Strategy::FencedBlock));
            }
        }
    }

    // 3. A flat object embedded in prose.
    for m in FLAT_OBJECT_RE.find_iter(trimmed) {
        if let Some(text) = parse_object(m.as_str()) {
            return Ok(ok(text, Strategy::FlatObject));
        }
    }

    // 4. Same, but tolerate one level of nested braces.
    for m in NESTED_OBJECT_RE.find_iter(trimmed) {
        if let Some(text) = parse_object(m.as_str()) {
            return Ok(ok(text, Strategy::NestedObject));
        }
    }

    // 5. Broken JSON: pull the field value out by regex and unescape it.
    if let Some(caps) = FIELD_CAPTURE_RE.captures(trimmed) {
        if let Some(m) = caps.get(1) {
            let text = unescape_json_fragment(m.as_str());
            return Ok(ok(text, Strategy::FieldCapture));
        }
    }

    // 6. A structured-looking response that nothing could parse is an error;
    //    plain prose is assumed to be the corrected text itself.
    if trimmed.starts_with('{') || trimmed.starts_with("```") {
        return Err(ExtractError::Malformed {
            snippet: snippet_of(trimmed),
        });
    }
    Ok(ok(trimmed.to_string(), Strategy::PlainProse))
}

// =============================================================================
// Helpers
// =============================================================================

/// Parse a candidate as a JSON object and pull out the corrected-text field.
///
/// Returns `None` unless the candidate is valid JSON with a string value
/// under [`CORRECTED_TEXT_KEY`].
fn parse_object(candidate: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(candidate).ok()?;
    value
        .get(CORRECTED_TEXT_KEY)?
        .as_str()
        .map(|s| s.to_string())
}

/// Undo JSON string escapes in a regex-captured fragment.
///
/// Handles the escapes the model actually produces; an unrecognized escape is
/// passed through with its backslash intact.
fn unescape_json_fragment(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut chars = fragment.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('/') => out.push('/'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// First [`SNIPPET_MAX_CHARS`] characters of the response, for error messages.
fn snippet_of(body: &str) -> String {
    body.chars().take(SNIPPET_MAX_CHARS).collect()
}

fn ok(text: String, strategy: Strategy) -> Extraction {
    debug!(?strategy, "Recovered corrected text");
    Extraction { text, strategy }
}

// =============================================================================
// Tests
// =============================================================================
