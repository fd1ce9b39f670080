//! Stub Ollama server
//!
//! Answers `/api/generate` with a configurable status, body and delay, and
//! records the generate requests it received.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

#[derive(Clone)]
struct Behavior {
    status: StatusCode,
    body: String,
    delay: Duration,
}

#[derive(Clone)]
struct FakeState {
    behavior: Behavior,
    requests: Arc<Mutex<Vec<Value>>>,
}

pub struct FakeOllama {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Value>>>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

async fn generate(State(state): State<FakeState>, Json(request): Json<Value>) -> impl IntoResponse {
    state.requests.lock().unwrap().push(request);
    if !state.behavior.delay.is_zero() {
        tokio::time::sleep(state.behavior.delay).await;
    }
    (
        state.behavior.status,
        [("content-type", "application/json")],
        state.behavior.body.clone(),
    )
}

async fn tags() -> impl IntoResponse {
    Json(json!({ "models": [{ "name": "test-model:latest" }] }))
}

#[allow(dead_code)]
impl FakeOllama {
    /// Answers every generate call with `{"response": <text>, "done": true}`
    pub async fn replying(text: &str) -> Self {
        let body = json!({ "response": text, "done": true }).to_string();
        Self::spawn(StatusCode::OK, &body, Duration::ZERO).await
    }

    pub async fn spawn(status: StatusCode, body: &str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            behavior: Behavior {
                status,
                body: body.to_string(),
                delay,
            },
            requests: requests.clone(),
        };

        let app = Router::new()
            .route("/api/generate", post(generate))
            .route("/api/tags", get(tags))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake Ollama");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Fake Ollama failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}", port),
            requests,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Generate request bodies received so far
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl Drop for FakeOllama {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
