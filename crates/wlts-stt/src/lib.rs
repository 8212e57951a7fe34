#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod client;
mod error;
mod http_client;
mod materialize;
mod normalize;
mod request;
mod server;
mod types;

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    routing::post,
};

pub use client::TranscriptionClient;
pub use error::{Result, SttError};
pub use materialize::{AudioInput, MaterializedAudio, SampleBuffer, SampleFormat, materialize, spool};
pub use normalize::{Normalization, TEXT_UNAVAILABLE, display_text, normalize};
pub use request::{AudioUpload, UploadForm};
pub use server::{Server, SttServerBuilder};
pub use types::{NO_AUDIO_TEXT, Transcription, TranscriptionOutcome, TranscriptionParams};
use request::ExtractUpload;

/// Build the transcription server from configuration
///
/// # Errors
///
/// Returns an error if the server fails to initialize
pub fn build_server(config: &wlts_config::Config) -> anyhow::Result<Arc<Server>> {
    let server = Arc::new(
        SttServerBuilder::new(config)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to initialize transcription server: {e}"))?,
    );
    Ok(server)
}

/// Create the endpoint router for transcription
pub fn endpoint_router() -> Router<Arc<Server>> {
    Router::new()
        .route("/v1/audio/transcriptions", post(transcribe))
        .layer(DefaultBodyLimit::max(request::BODY_LIMIT_BYTES))
}

/// Handle one transcription submission
///
/// Well-formed submissions always get the outcome tuple back with HTTP 200,
/// error cases included; only malformed transport (bad multipart, oversized
/// body) is rejected before this point.
async fn transcribe(State(server): State<Arc<Server>>, ExtractUpload(form): ExtractUpload) -> Json<TranscriptionOutcome> {
    tracing::debug!("transcription handler called");

    let outcome = server.process(form).await;

    Json(outcome)
}
