//! Text generator trait definition.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Options for a generation request.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Request timeout. A slow backend must not hold a request slot forever.
    pub timeout: Duration,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Errors that can occur when asking a backend for a completion.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Generation is disabled")]
    Disabled,
}

impl GenerationError {
    /// Short label for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Connection(_) => "connection",
            GenerationError::Api { .. } => "api",
            GenerationError::InvalidResponse(_) => "invalid_response",
            GenerationError::Timeout => "timeout",
            GenerationError::Disabled => "disabled",
        }
    }
}

/// Trait for prompt-in, text-out completion backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the provider's name (e.g., "ollama").
    fn name(&self) -> &str;

    /// Get the model being used.
    fn model(&self) -> &str;

    /// Generate a completion for a single prompt.
    ///
    /// Returns the generated text as produced by the backend (untrimmed).
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError>;

    /// Check if the backend is healthy and reachable.
    async fn health_check(&self) -> Result<(), GenerationError>;
}
