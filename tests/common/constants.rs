//! Shared constants for end-to-end tests

#![allow(dead_code)]

// ============================================================================
// Timeouts
// ============================================================================

/// How long to wait for a spawned server to answer its health check
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Delay between readiness polls
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;

/// Timeout for every request made by the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Generation timeout used by servers talking to a fake Ollama
pub const GENERATION_TIMEOUT_MS: u64 = 300;

// ============================================================================
// Expected payloads
// ============================================================================

pub const TEST_MODEL: &str = "test-model";

pub const INVALID_MESSAGE_REPLY: &str = "Please provide a valid message.";

pub const GREETING_REPLY: &str = "Hello there! How are you feeling today?";

pub const GRATITUDE_REPLY: &str = "You're welcome! Happy to help.";

pub const DEFAULT_PLAYLIST_URL: &str = "https://open.spotify.com/genre/mood";

pub const SAD_PLAYLIST_URL: &str = "https://open.spotify.com/genre/mood-sad";

pub const HAPPY_PLAYLIST_URL: &str = "https://open.spotify.com/genre/mood-happy";

pub const PLAYLIST_MESSAGE: &str =
    "Using a general mood playlist as we couldn't connect to Spotify.";

pub const PLAYLIST_FAILURE_MESSAGE: &str =
    "Unable to fetch a playlist at the moment. Using a general mood playlist instead.";

/// Suggestion appended to replies for text without sentiment words
pub const NEUTRAL_SUGGESTION: &str = "I sense you're feeling neutral. Would you like me to recommend some study music music? Click the 'Get Music' button!";
