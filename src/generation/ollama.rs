//! Ollama text generator implementation.

use super::provider::{GenerationError, GenerationOptions, TextGenerator};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(5);

/// Ollama text generator.
///
/// Connects to an Ollama server and uses its `/api/generate` endpoint with
/// streaming disabled, so each call yields one complete response.
pub struct OllamaGenerator {
    client: Client,
    base_url: String,
    model: String,
}

impl OllamaGenerator {
    /// Create a new Ollama generator.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the Ollama server (e.g., "http://localhost:11434").
    /// * `model` - Model to use (e.g., "llama2").
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn map_send_error(e: reqwest::Error) -> GenerationError {
        if e.is_timeout() {
            GenerationError::Timeout
        } else {
            GenerationError::Connection(e.to_string())
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let url = format!("{}/api/generate", self.base_url);

        let request = OllamaGenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
        };

        debug!(
            model = %self.model,
            prompt_len = prompt.len(),
            "Sending generate request to Ollama"
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .timeout(options.timeout)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        let status = response.status();
        if status.as_u16() != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let generated: OllamaGenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout
            } else {
                GenerationError::InvalidResponse(format!(
                    "Failed to parse Ollama response: {}",
                    e
                ))
            }
        })?;

        debug!(
            done = ?generated.done,
            response_len = generated.response.len(),
            "Received generate response from Ollama"
        );

        Ok(generated.response)
    }

    async fn health_check(&self) -> Result<(), GenerationError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .timeout(HEALTH_CHECK_TIMEOUT)
            .send()
            .await
            .map_err(Self::map_send_error)?;

        if !response.status().is_success() {
            return Err(GenerationError::Api {
                status: response.status().as_u16(),
                message: "Health check failed".to_string(),
            });
        }

        let tags: OllamaTagsResponse = response.json().await.map_err(|e| {
            GenerationError::InvalidResponse(format!("Failed to parse tags response: {}", e))
        })?;

        // Ollama reports "llama2:latest" for a model pulled as "llama2"
        let model_exists = tags.models.iter().any(|m| {
            m.name == self.model || m.name.strip_suffix(":latest") == Some(self.model.as_str())
        });
        if !model_exists {
            warn!(
                model = %self.model,
                available_models = ?tags.models.iter().map(|m| &m.name).collect::<Vec<_>>(),
                "Configured model not found in Ollama"
            );
        }

        Ok(())
    }
}

// Ollama API types

#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    /// Absent on some error-ish 200 replies; treated as an empty completion.
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct OllamaTagsResponse {
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}
