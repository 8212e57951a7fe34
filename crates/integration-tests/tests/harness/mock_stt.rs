//! Mock transcription backend for integration tests
//!
//! Implements a minimal Whisper-compatible `/v1/audio/transcriptions`
//! endpoint that records what it received and returns a canned response

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Everything the mock saw in the last multipart submission
#[derive(Debug, Clone, Default)]
pub struct CapturedRequest {
    pub model: Option<String>,
    pub language: Option<String>,
    pub prompt: Option<String>,
    pub response_format: Option<String>,
    pub temperature: Option<String>,
    pub granularities: Vec<String>,
    pub filename: Option<String>,
    pub file_bytes: Vec<u8>,
}

struct MockSttState {
    request_count: AtomicU32,
    captured: Mutex<Option<CapturedRequest>>,
    status: StatusCode,
    body: Vec<u8>,
    content_type: String,
}

/// Mock backend that returns a predictable response
pub struct MockStt {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockSttState>,
}

impl MockStt {
    /// Start a mock that answers 200 with the given JSON payload
    pub async fn start_with_json(payload: &serde_json::Value) -> anyhow::Result<Self> {
        Self::start_inner(StatusCode::OK, payload.to_string().into_bytes(), "application/json").await
    }

    /// Start a mock that answers 200 with a raw (possibly non-JSON) body
    pub async fn start_with_body(body: &[u8], content_type: &str) -> anyhow::Result<Self> {
        Self::start_inner(StatusCode::OK, body.to_vec(), content_type).await
    }

    /// Start a mock that fails every request with the given status and body
    pub async fn start_failing(status: u16, body: &str) -> anyhow::Result<Self> {
        Self::start_inner(StatusCode::from_u16(status)?, body.as_bytes().to_vec(), "application/json").await
    }

    async fn start_inner(status: StatusCode, body: Vec<u8>, content_type: &str) -> anyhow::Result<Self> {
        let state = Arc::new(MockSttState {
            request_count: AtomicU32::new(0),
            captured: Mutex::new(None),
            status,
            body,
            content_type: content_type.to_owned(),
        });

        let app = Router::new()
            .route("/v1/audio/transcriptions", routing::post(handle_transcription))
            .layer(DefaultBodyLimit::max(64 << 20))
            .with_state(Arc::clone(&state));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Base URL for configuring the mock as the provider
    ///
    /// Includes `/v1` since the client appends `/audio/transcriptions`
    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    /// Number of transcription requests received
    pub fn request_count(&self) -> u32 {
        self.state.request_count.load(Ordering::Relaxed)
    }

    /// The last request the mock saw, if any
    pub fn captured(&self) -> Option<CapturedRequest> {
        self.state.captured.lock().unwrap().clone()
    }
}

impl Drop for MockStt {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_transcription(State(state): State<Arc<MockSttState>>, mut multipart: Multipart) -> impl IntoResponse {
    state.request_count.fetch_add(1, Ordering::Relaxed);

    let mut captured = CapturedRequest::default();

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "file" => {
                captured.filename = field.file_name().map(ToString::to_string);
                captured.file_bytes = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
            }
            "model" => captured.model = field.text().await.ok(),
            "language" => captured.language = field.text().await.ok(),
            "prompt" => captured.prompt = field.text().await.ok(),
            "response_format" => captured.response_format = field.text().await.ok(),
            "temperature" => captured.temperature = field.text().await.ok(),
            "timestamp_granularities[]" => {
                if let Ok(value) = field.text().await {
                    captured.granularities.push(value);
                }
            }
            _ => {}
        }
    }

    *state.captured.lock().unwrap() = Some(captured);

    (
        state.status,
        [(header::CONTENT_TYPE, state.content_type.clone())],
        state.body.clone(),
    )
}
