use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::error::SttError;
use crate::normalize::Normalization;

/// Fixed instructional text when a submission carries no audio
pub const NO_AUDIO_TEXT: &str = "Please upload an audio file.";

/// Parameters forwarded with the remote transcription call
///
/// Nothing here is validated locally: out-of-range temperatures and
/// unknown language codes are the remote service's to reject.
#[derive(Debug, Clone)]
pub struct TranscriptionParams {
    /// ISO 639-1 code or the sentinel "auto", forwarded verbatim
    pub language: String,
    /// Free-text context prompt; empty means none
    pub prompt: String,
    /// Sampling temperature in `[0.0, 1.0]` by remote contract
    pub temperature: f32,
}

/// A normalized transcription
#[derive(Debug)]
pub struct Transcription {
    /// Display text: `raw["text"]` or the sentinel
    pub text: String,
    /// The remote response coerced to a plain mapping, passed through as
    /// transparently as possible
    pub raw: Map<String, Value>,
    /// Which conversion strategy produced `raw`
    pub normalization: Normalization,
}

/// Wire shape of the request boundary: the (display text, structured result)
/// pair, produced for success and failure alike
#[derive(Debug, Serialize)]
pub struct TranscriptionOutcome {
    /// Text for the transcription panel
    pub text: String,
    /// JSON for the raw-response panel
    pub result: Value,
}

impl TranscriptionOutcome {
    pub fn success(transcription: Transcription) -> Self {
        Self {
            text: transcription.text,
            result: Value::Object(transcription.raw),
        }
    }

    pub fn failure(error: &SttError) -> Self {
        match error {
            SttError::NoAudioProvided => Self {
                text: NO_AUDIO_TEXT.to_string(),
                result: json!({ "error": error.to_string() }),
            },
            other => {
                let message = other.to_string();
                Self {
                    text: format!("Error: {message}"),
                    result: json!({ "error": message }),
                }
            }
        }
    }
}
