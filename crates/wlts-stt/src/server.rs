use secrecy::SecretString;

use crate::client::TranscriptionClient;
use crate::error::SttError;
use crate::materialize::{AudioInput, SampleBuffer, materialize, spool};
use crate::request::{AudioUpload, UploadForm};
use crate::types::{TranscriptionOutcome, TranscriptionParams};

/// Environment variable holding the provider credential
const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Transcription front-end: one injected client plus request defaults
pub struct Server {
    client: TranscriptionClient,
    default_language: String,
}

impl Server {
    /// Handle one form submission end to end
    ///
    /// Always produces the outcome tuple: missing audio yields the
    /// instructional outcome without a remote call, and every failure is
    /// converted at this boundary rather than propagated.
    pub async fn process(&self, form: UploadForm) -> TranscriptionOutcome {
        let Some(upload) = form.audio else {
            tracing::debug!("submission without audio, skipping remote call");
            return TranscriptionOutcome::failure(&SttError::NoAudioProvided);
        };

        let params = TranscriptionParams {
            language: form.language.unwrap_or_else(|| self.default_language.clone()),
            prompt: form.prompt.unwrap_or_default(),
            temperature: form.temperature.unwrap_or(0.0),
        };

        match self.run(upload, &params).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("error processing audio: {e}");
                TranscriptionOutcome::failure(&e)
            }
        }
    }

    /// Transcribe an already-shaped audio input
    ///
    /// Library entry point for embedded callers that bypass the multipart
    /// boundary; failures are still folded into the outcome tuple.
    pub async fn transcribe_audio(&self, input: AudioInput, params: &TranscriptionParams) -> TranscriptionOutcome {
        match self.transcribe_input(input, params).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::error!("error processing audio: {e}");
                TranscriptionOutcome::failure(&e)
            }
        }
    }

    async fn run(&self, upload: AudioUpload, params: &TranscriptionParams) -> crate::error::Result<TranscriptionOutcome> {
        // Either way the pipeline deals only in paths from here on
        let audio = match upload {
            AudioUpload::File { bytes, filename } => spool(&bytes, &filename)?,
            AudioUpload::Samples {
                bytes,
                format,
                sample_rate,
            } => materialize(AudioInput::Samples {
                data: SampleBuffer::from_le_bytes(&bytes, format)?,
                sample_rate,
            })?,
        };

        let result = self.client.transcribe(audio.path(), params).await;
        // `audio` drops here: spooled and materialized temp files are
        // cleaned up after success and failure alike
        result.map(TranscriptionOutcome::success)
    }

    async fn transcribe_input(
        &self,
        input: AudioInput,
        params: &TranscriptionParams,
    ) -> crate::error::Result<TranscriptionOutcome> {
        let audio = materialize(input)?;
        let result = self.client.transcribe(audio.path(), params).await;
        // `audio` drops here: owned temp files are cleaned up, caller-owned
        // paths are left alone
        result.map(TranscriptionOutcome::success)
    }
}

/// Builder for constructing the transcription server from configuration
pub struct SttServerBuilder<'a> {
    config: &'a wlts_config::Config,
}

impl<'a> SttServerBuilder<'a> {
    pub const fn new(config: &'a wlts_config::Config) -> Self {
        Self { config }
    }

    /// Resolve the credential and construct the injected client
    ///
    /// The API key is read once here, at startup: config first, then the
    /// process environment, defaulting to the empty string. An empty key
    /// fails at request time with an authorization error, not here.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured language default is unusable
    pub fn build(self) -> crate::error::Result<Server> {
        let stt = &self.config.stt;

        let api_key = stt.api_key.clone().unwrap_or_else(|| {
            SecretString::from(std::env::var(API_KEY_ENV).unwrap_or_default())
        });

        let default_language = stt.language.trim().to_string();
        if default_language.is_empty() {
            return Err(SttError::ConfigError("default language must not be empty".to_string()));
        }

        tracing::debug!(
            model = %stt.model,
            language = %default_language,
            "initializing transcription client"
        );

        let client = TranscriptionClient::new(api_key, stt.base_url.clone(), stt.model.clone());

        Ok(Server {
            client,
            default_language,
        })
    }
}
