//! MoodMelody Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod chat;
pub mod config;
pub mod generation;
pub mod mood;
pub mod sentiment;
pub mod server;

// Re-export commonly used types for convenience
pub use chat::{ReplyResolver, ReplySource, ResolvedReply};
pub use generation::{NoOpGenerator, OllamaGenerator, TextGenerator};
pub use mood::{classify, Emotion, MoodTables};
pub use sentiment::{LexiconScorer, SentimentScorer};
pub use server::{run_server, RequestsLoggingLevel};
