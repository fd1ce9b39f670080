//! HTTP client for end-to-end tests
//!
//! This module provides a high-level HTTP client that wraps reqwest
//! and provides methods for all MoodMelody endpoints.
//!
//! When API routes or request formats change, update only this file.

use super::constants::*;
use reqwest::Response;
use serde_json::{json, Value};
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    /// The base URL of the test server
    pub base_url: String,
}

#[allow(dead_code)]
impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    // ========================================================================
    // Chat Endpoints
    // ========================================================================

    /// GET /get?msg=...
    pub async fn get_chat(&self, msg: &str) -> Response {
        self.client
            .get(format!("{}/get", self.base_url))
            .query(&[("msg", msg)])
            .send()
            .await
            .expect("Chat request failed")
    }

    /// GET /get without a msg parameter
    pub async fn get_chat_without_msg(&self) -> Response {
        self.client
            .get(format!("{}/get", self.base_url))
            .send()
            .await
            .expect("Chat request failed")
    }

    /// Sends a chat message and returns the parsed JSON body
    pub async fn chat(&self, msg: &str) -> Value {
        let response = self.get_chat(msg).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Chat response is not JSON")
    }

    // ========================================================================
    // Playlist Endpoints
    // ========================================================================

    /// POST /forward/ with {"msg": ...}
    pub async fn post_forward(&self, msg: &str) -> Response {
        self.client
            .post(format!("{}/forward/", self.base_url))
            .json(&json!({ "msg": msg }))
            .send()
            .await
            .expect("Playlist request failed")
    }

    /// POST /forward/ with an arbitrary raw body
    pub async fn post_forward_raw(&self, body: &str) -> Response {
        self.client
            .post(format!("{}/forward/", self.base_url))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Playlist request failed")
    }

    /// Requests a playlist and returns the parsed JSON body
    pub async fn playlist(&self, msg: &str) -> Value {
        let response = self.post_forward(msg).await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Playlist response is not JSON")
    }

    // ========================================================================
    // Other Endpoints
    // ========================================================================

    pub async fn get_home(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Home request failed")
    }

    pub async fn get_health(&self) -> Response {
        self.client
            .get(format!("{}/health", self.base_url))
            .send()
            .await
            .expect("Health request failed")
    }
}
