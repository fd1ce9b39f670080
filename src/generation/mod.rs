//! Text generation backends.
//!
//! This module provides a trait-based abstraction over completion backends,
//! so the chat resolver can work against Ollama, a disabled backend, or a
//! test double.

mod noop;
mod ollama;
mod provider;

pub use noop::NoOpGenerator;
pub use ollama::OllamaGenerator;
pub use provider::{GenerationError, GenerationOptions, TextGenerator};
