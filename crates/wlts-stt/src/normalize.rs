//! Response normalization
//!
//! The remote service is asked for `verbose_json`, but the body that comes
//! back is treated as untrusted: a plain mapping with a `text` key must be
//! produced no matter what arrived. The strategies form an ordered chain of
//! typed conversion attempts; the first that succeeds wins, and every
//! transition past the first is logged rather than silently swallowed.

use serde_json::{Map, Value};

/// Sentinel display text when the mapping carries no usable `text` field
pub const TEXT_UNAVAILABLE: &str = "Transcription text not available";

/// Which conversion strategy produced the normalized mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Direct structural coercion: the body was a JSON object
    Coerced,
    /// The body was valid JSON but not an object; round-tripped into a mapping
    Serialized,
    /// The body was plain UTF-8 text; wrapped as `{text, segments: []}`
    TextOnly,
    /// Last resort: lossy stringification of the raw bytes
    StringFallback,
}

impl Normalization {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Coerced => "coerced",
            Self::Serialized => "serialized",
            Self::TextOnly => "text_only",
            Self::StringFallback => "string_fallback",
        }
    }
}

/// Coerce a raw response body into a plain mapping
///
/// Never fails: the final strategy accepts arbitrary bytes. The returned
/// mapping is passed through as transparently as possible — only the
/// fallback strategies synthesize fields.
pub fn normalize(body: &[u8]) -> (Normalization, Map<String, Value>) {
    // Strategy 1: the expected case, a verbose JSON object
    if let Ok(fields) = serde_json::from_slice::<Map<String, Value>>(body) {
        return (Normalization::Coerced, fields);
    }

    // Strategy 2: valid JSON with a non-object top level
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        tracing::debug!(
            strategy = Normalization::Serialized.as_str(),
            "response was not a JSON object, round-tripping through serde"
        );
        let text = match value {
            Value::String(s) => s,
            other => other.to_string(),
        };
        return (Normalization::Serialized, text_only_fields(text));
    }

    // Strategy 3: not JSON at all, but readable text
    if let Ok(text) = std::str::from_utf8(body) {
        tracing::warn!(
            strategy = Normalization::TextOnly.as_str(),
            "response was not JSON, extracting plain text"
        );
        return (Normalization::TextOnly, text_only_fields(text.trim().to_string()));
    }

    // Strategy 4: never raise past this point
    tracing::warn!(
        strategy = Normalization::StringFallback.as_str(),
        "response was not valid UTF-8, stringifying lossily"
    );
    let text = String::from_utf8_lossy(body).into_owned();
    (Normalization::StringFallback, text_only_fields(text))
}

/// Display text for a normalized mapping
///
/// `fields["text"]` when it is a string, else the fixed sentinel.
pub fn display_text(fields: &Map<String, Value>) -> String {
    fields
        .get("text")
        .and_then(Value::as_str)
        .map_or_else(|| TEXT_UNAVAILABLE.to_string(), ToString::to_string)
}

fn text_only_fields(text: String) -> Map<String, Value> {
    let mut fields = Map::new();
    fields.insert("text".to_string(), Value::String(text));
    fields.insert("segments".to_string(), Value::Array(Vec::new()));
    fields
}
