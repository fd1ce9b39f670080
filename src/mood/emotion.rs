//! Discrete emotions and the polarity classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of emotion labels the service knows about.
///
/// The classifier only ever produces a subset of these (see [`classify`]);
/// the others exist so that genre tables loaded from config can refer to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Ecstatic,
    Happy,
    Calm,
    Neutral,
    Relaxed,
    Melancholic,
    Sad,
    Devastated,
    Motivated,
    Romantic,
    Nostalgic,
    Energetic,
    Focused,
    Angry,
    Peaceful,
    Festive,
    Love,
}

impl Emotion {
    pub const ALL: [Emotion; 17] = [
        Emotion::Ecstatic,
        Emotion::Happy,
        Emotion::Calm,
        Emotion::Neutral,
        Emotion::Relaxed,
        Emotion::Melancholic,
        Emotion::Sad,
        Emotion::Devastated,
        Emotion::Motivated,
        Emotion::Romantic,
        Emotion::Nostalgic,
        Emotion::Energetic,
        Emotion::Focused,
        Emotion::Angry,
        Emotion::Peaceful,
        Emotion::Festive,
        Emotion::Love,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Emotion::Ecstatic => "ecstatic",
            Emotion::Happy => "happy",
            Emotion::Calm => "calm",
            Emotion::Neutral => "neutral",
            Emotion::Relaxed => "relaxed",
            Emotion::Melancholic => "melancholic",
            Emotion::Sad => "sad",
            Emotion::Devastated => "devastated",
            Emotion::Motivated => "motivated",
            Emotion::Romantic => "romantic",
            Emotion::Nostalgic => "nostalgic",
            Emotion::Energetic => "energetic",
            Emotion::Focused => "focused",
            Emotion::Angry => "angry",
            Emotion::Peaceful => "peaceful",
            Emotion::Festive => "festive",
            Emotion::Love => "love",
        }
    }

    /// Parses a label, returning `None` for anything outside the closed set.
    pub fn from_label(label: &str) -> Option<Emotion> {
        let label = label.trim();
        Emotion::ALL
            .iter()
            .copied()
            .find(|e| e.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Emotion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Emotion::from_label(s).ok_or_else(|| anyhow::anyhow!("Unknown emotion label: {}", s))
    }
}

/// Maps a polarity score in `[-1, 1]` to an emotion.
///
/// Bands are checked in order and the first match wins, so the order of the
/// arms matters: the exact-zero check sits between the positive and the
/// negative bands, and anything left over (including NaN) is `Relaxed`.
pub fn classify(score: f64) -> Emotion {
    if score > 0.7 {
        Emotion::Ecstatic
    } else if score > 0.4 {
        Emotion::Happy
    } else if score > 0.1 {
        Emotion::Calm
    } else if score == 0.0 {
        Emotion::Neutral
    } else if score < -0.7 {
        Emotion::Devastated
    } else if score < -0.4 {
        Emotion::Sad
    } else if score < -0.1 {
        Emotion::Melancholic
    } else {
        Emotion::Relaxed
    }
}
