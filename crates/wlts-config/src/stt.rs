use secrecy::SecretString;
use serde::Deserialize;

/// Transcription provider configuration
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SttConfig {
    /// API key; normally `{{ env.GROQ_API_KEY | default("") }}`.
    ///
    /// When omitted, the `GROQ_API_KEY` process environment variable is
    /// read at startup, defaulting to the empty string. An empty key is
    /// rejected by the remote service at request time, not at startup.
    #[serde(default)]
    pub api_key: Option<SecretString>,
    /// Base URL override for the hosted transcription endpoint
    #[serde(default)]
    pub base_url: Option<String>,
    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,
    /// Default language hint (ISO 639-1 or the sentinel "auto")
    #[serde(default = "default_language")]
    pub language: String,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            model: default_model(),
            language: default_language(),
        }
    }
}

fn default_model() -> String {
    "whisper-large-v3-turbo".to_string()
}

fn default_language() -> String {
    "en".to_string()
}
