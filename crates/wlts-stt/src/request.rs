use std::str::FromStr;

use axum::body::Body;
use axum::extract::{FromRequest, Multipart};
use axum::response::{IntoResponse, Response};

use crate::materialize::SampleFormat;

/// Body limit for audio uploads (32 MiB)
pub const BODY_LIMIT_BYTES: usize = 32 << 20;

/// Audio part of a submission: an encoded file upload or a raw PCM buffer
#[derive(Debug)]
pub enum AudioUpload {
    /// Encoded audio bytes (wav, mp3, …) with the original filename
    File { bytes: Vec<u8>, filename: String },
    /// Raw little-endian PCM from a recorder widget
    Samples {
        bytes: Vec<u8>,
        format: SampleFormat,
        sample_rate: u32,
    },
}

/// One decoded form submission
///
/// `audio` is optional on purpose: a submission without audio is answered
/// with the instructional outcome, not a transport error.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub audio: Option<AudioUpload>,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub temperature: Option<f32>,
}

/// Extractor for the multipart transcription form
pub struct ExtractUpload(pub UploadForm);

fn bad_request(message: impl Into<String>) -> Response {
    (axum::http::StatusCode::BAD_REQUEST, message.into()).into_response()
}

impl<S> FromRequest<S> for ExtractUpload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(request: http::Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err((
                axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: multipart/form-data'",
            )
                .into_response());
        }

        let mut multipart = Multipart::from_request(request, state)
            .await
            .map_err(|e| bad_request(format!("Failed to parse multipart form: {e}")))?;

        let mut file: Option<(Vec<u8>, String)> = None;
        let mut samples: Option<Vec<u8>> = None;
        let mut sample_rate: Option<u32> = None;
        let mut format = SampleFormat::default();
        let mut form = UploadForm::default();

        while let Ok(Some(field)) = multipart.next_field().await {
            let field_name = field.name().unwrap_or("").to_string();

            match field_name.as_str() {
                "file" => {
                    let filename = field.file_name().unwrap_or("audio.wav").to_string();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| bad_request(format!("Failed to read audio data: {e}")))?;
                    file = Some((bytes.to_vec(), filename));
                }
                "samples" => {
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| bad_request(format!("Failed to read sample data: {e}")))?;
                    samples = Some(bytes.to_vec());
                }
                "sample_rate" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| bad_request(format!("Failed to read sample_rate field: {e}")))?;
                    sample_rate =
                        Some(text.parse::<u32>().map_err(|e| bad_request(format!("Invalid sample rate: {e}")))?);
                }
                "format" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| bad_request(format!("Failed to read format field: {e}")))?;
                    format = SampleFormat::from_str(&text).map_err(|e| bad_request(e.to_string()))?;
                }
                "language" => {
                    form.language = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| bad_request(format!("Failed to read language field: {e}")))?,
                    );
                }
                "prompt" => {
                    form.prompt = Some(
                        field
                            .text()
                            .await
                            .map_err(|e| bad_request(format!("Failed to read prompt field: {e}")))?,
                    );
                }
                "temperature" => {
                    let text = field
                        .text()
                        .await
                        .map_err(|e| bad_request(format!("Failed to read temperature field: {e}")))?;
                    // Parsed but never range-checked; the remote service
                    // owns temperature validation
                    form.temperature =
                        Some(text.parse::<f32>().map_err(|e| bad_request(format!("Invalid temperature value: {e}")))?);
                }
                _ => {
                    // Skip unknown fields
                }
            }
        }

        form.audio = match (file, samples) {
            (Some(_), Some(_)) => {
                return Err(bad_request("Provide either 'file' or 'samples', not both"));
            }
            (Some((bytes, filename)), None) => Some(AudioUpload::File { bytes, filename }),
            (None, Some(bytes)) => {
                let Some(sample_rate) = sample_rate else {
                    return Err(bad_request("'samples' requires a 'sample_rate' field"));
                };
                Some(AudioUpload::Samples {
                    bytes,
                    format,
                    sample_rate,
                })
            }
            (None, None) => None,
        };

        Ok(Self(form))
    }
}
