use std::path::Path;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};

use crate::error::SttError;
use crate::http_client::http_client;
use crate::normalize::{display_text, normalize};
use crate::types::{Transcription, TranscriptionParams};

const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1";

/// Client for the hosted transcription endpoint
///
/// Holds only the credential and request defaults; each call is
/// independent. Constructed once at startup and injected wherever a
/// transcription is needed.
pub struct TranscriptionClient {
    client: Client,
    base_url: String,
    api_key: SecretString,
    model: String,
}

impl TranscriptionClient {
    pub fn new(api_key: SecretString, base_url: Option<String>, model: String) -> Self {
        let client = http_client();
        let base_url = base_url.unwrap_or_else(|| DEFAULT_GROQ_API_URL.to_string());

        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    /// Transcribe an audio file with word- and segment-level timestamps
    ///
    /// Opens the file and performs exactly one request — no retries, no
    /// local timeout beyond the shared client default, no cancellation.
    /// A success response of any shape is normalized into a mapping with a
    /// `text` key; only transport and API failures surface as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the request cannot be
    /// sent, or the service responds with a non-success status
    pub async fn transcribe(&self, path: &Path, params: &TranscriptionParams) -> crate::error::Result<Transcription> {
        let audio = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.wav")
            .to_string();

        let url = format!("{}/audio/transcriptions", self.base_url);

        tracing::debug!(
            "transcription request: {} bytes, model={}, language={}",
            audio.len(),
            self.model,
            params.language,
        );

        let mut form = reqwest::multipart::Form::new()
            .part(
                "file",
                reqwest::multipart::Part::bytes(audio)
                    .file_name(filename.clone())
                    .mime_str(content_type_for(&filename))
                    .map_err(|e| SttError::InvalidRequest(format!("Invalid content type: {e}")))?,
            )
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .text("timestamp_granularities[]", "word")
            .text("timestamp_granularities[]", "segment")
            .text("language", params.language.clone())
            .text("temperature", params.temperature.to_string());

        if !params.prompt.is_empty() {
            form = form.text("prompt", params.prompt.clone());
        }

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key.expose_secret()))
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("transcription request failed to send: {e}");
                SttError::ConnectionError(e.to_string())
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            let message = api_error_message(&error_text);

            tracing::error!("transcription API error ({status}): {message}");

            return Err(match status.as_u16() {
                401 => SttError::AuthenticationFailed(message),
                400 => SttError::InvalidRequest(message),
                _ => SttError::ProviderApiError {
                    status: status.as_u16(),
                    message,
                },
            });
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("failed to read transcription response body: {e}");
            SttError::ConnectionError(e.to_string())
        })?;

        let (normalization, raw) = normalize(&body);
        let text = display_text(&raw);

        tracing::debug!(strategy = normalization.as_str(), "transcription complete");

        Ok(Transcription {
            text,
            raw,
            normalization,
        })
    }
}

/// Upload MIME type derived from the filename extension
fn content_type_for(filename: &str) -> &'static str {
    match Path::new(filename).extension().and_then(|e| e.to_str()) {
        Some("wav") => "audio/wav",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("ogg" | "opus") => "audio/ogg",
        Some("flac") => "audio/flac",
        Some("webm") => "audio/webm",
        _ => "application/octet-stream",
    }
}

/// Pull the human-readable message out of an API error body when possible
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| body.to_string())
}
