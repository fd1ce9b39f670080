//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{TestServer, TestClient};
//!
//! #[tokio::test]
//! async fn test_greeting() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let body = client.chat("hello").await;
//!     assert_eq!(body["emotion"], "neutral");
//! }
//! ```

mod client;
mod constants;
mod fake_ollama;
mod server;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use client::TestClient;
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fake_ollama::FakeOllama;
#[allow(unused_imports)]
pub use server::TestServer;
