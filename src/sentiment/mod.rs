//! Sentiment polarity scoring.
//!
//! Request handlers only see the [`SentimentScorer`] trait; the bundled
//! [`LexiconScorer`] is the default implementation.

mod lexicon;

pub use lexicon::LexiconScorer;

use anyhow::Result;

/// Scores the polarity of a piece of text.
pub trait SentimentScorer: Send + Sync {
    /// Get the scorer's name, used in logs.
    fn name(&self) -> &str;

    /// Polarity in `[-1.0, 1.0]`: negative for negative sentiment, positive
    /// for positive sentiment, `0.0` when the text carries no sentiment.
    fn score(&self, text: &str) -> Result<f64>;
}
