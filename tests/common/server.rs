//! Test server lifecycle management
//!
//! This module manages spawning and shutting down test HTTP servers.
//! Each test gets an isolated server with its own scorer, generator and tables.

use super::constants::*;
use moodmelody_server::chat::ReplyResolver;
use moodmelody_server::generation::{
    GenerationOptions, NoOpGenerator, OllamaGenerator, TextGenerator,
};
use moodmelody_server::mood::MoodTables;
use moodmelody_server::sentiment::{LexiconScorer, SentimentScorer};
use moodmelody_server::server::{
    make_app, state::ServerState, RequestsLoggingLevel, ServerConfig,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// Test server instance
///
/// When dropped, the server gracefully shuts down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawns a server with generation disabled, so every reply comes from
    /// the canned responders.
    pub async fn spawn() -> Self {
        Self::spawn_with_generator(Arc::new(NoOpGenerator)).await
    }

    /// Spawns a server whose generator talks to the Ollama server at `url`
    pub async fn spawn_with_ollama(url: &str) -> Self {
        Self::spawn_with_generator(Arc::new(OllamaGenerator::new(url, TEST_MODEL))).await
    }

    pub async fn spawn_with_generator(generator: Arc<dyn TextGenerator>) -> Self {
        Self::spawn_with(
            generator,
            Arc::new(LexiconScorer::default()),
            MoodTables::default(),
        )
        .await
    }

    /// Spawns a new test server on a random port
    ///
    /// # Panics
    ///
    /// Panics if port binding fails or the server doesn't become ready
    /// within timeout.
    pub async fn spawn_with(
        generator: Arc<dyn TextGenerator>,
        scorer: Arc<dyn SentimentScorer>,
        tables: MoodTables,
    ) -> Self {
        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        // Create shutdown channel
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };

        let resolver = Arc::new(ReplyResolver::new(
            generator,
            GenerationOptions {
                timeout: Duration::from_millis(GENERATION_TIMEOUT_MS),
            },
        ));
        let state = ServerState::new(config.clone(), scorer, resolver, Arc::new(tables));

        let app = make_app(config, state).expect("Failed to build app");

        // Spawn server in background task with graceful shutdown
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the /health endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/health", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
