use thiserror::Error;

pub type Result<T> = std::result::Result<T, SttError>;

/// Errors raised by the transcription subsystem
///
/// Every variant is converted into the outcome tuple shape at the request
/// boundary; none of them propagate to the HTTP layer as a raw fault.
#[derive(Debug, Error)]
pub enum SttError {
    /// Submission arrived without any audio; no remote call is attempted
    #[error("No audio file provided")]
    NoAudioProvided,

    /// Malformed local sample buffer caught during materialization
    #[error("invalid audio input: {0}")]
    InvalidAudioInput(String),

    /// Local filesystem failure while spooling or reading audio
    #[error("audio i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// WAV encoding failure during materialization
    #[error("wav encoding failed: {0}")]
    WavEncoding(#[from] hound::Error),

    /// The remote service rejected the request as malformed
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The remote service rejected the configured credential
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The request never reached the remote service
    #[error("failed to reach transcription service: {0}")]
    ConnectionError(String),

    /// Any other non-success response from the remote service
    #[error("transcription service error ({status}): {message}")]
    ProviderApiError { status: u16, message: String },

    /// Provider configuration problem caught at startup
    #[error("configuration error: {0}")]
    ConfigError(String),
}
