//! Lexicon-based polarity scorer.
//!
//! Every word found in the lexicon contributes its polarity, scaled by an
//! intensifier right before it and flipped (and damped) by a negator within
//! the two preceding words. The text's polarity is the mean of those
//! contributions. Text without any lexicon word scores exactly `0.0`.

use super::SentimentScorer;
use anyhow::Result;
use std::collections::HashMap;
use unicode_segmentation::UnicodeSegmentation;

/// Multiplier applied to a word preceded by a negator.
const NEGATION_FACTOR: f64 = -0.5;

/// How many preceding words are searched for a negator.
const NEGATION_WINDOW: usize = 2;

const LEXICON: &[(&str, f64)] = &[
    // positive
    ("good", 0.7),
    ("great", 0.8),
    ("happy", 0.8),
    ("happier", 0.8),
    ("glad", 0.5),
    ("love", 0.5),
    ("loved", 0.7),
    ("lovely", 0.5),
    ("amazing", 0.6),
    ("awesome", 1.0),
    ("wonderful", 1.0),
    ("fantastic", 0.4),
    ("excellent", 1.0),
    ("best", 1.0),
    ("better", 0.5),
    ("nice", 0.6),
    ("fun", 0.3),
    ("excited", 0.375),
    ("exciting", 0.3),
    ("joy", 0.8),
    ("joyful", 0.8),
    ("cheerful", 0.8),
    ("beautiful", 0.85),
    ("perfect", 1.0),
    ("brilliant", 0.9),
    ("calm", 0.3),
    ("peaceful", 0.25),
    ("relaxed", 0.2),
    ("fine", 0.4),
    ("okay", 0.5),
    ("ok", 0.5),
    ("cool", 0.35),
    ("proud", 0.8),
    ("grateful", 0.6),
    ("thrilled", 0.7),
    ("delighted", 0.7),
    ("pleased", 0.5),
    ("energetic", 0.4),
    ("motivated", 0.3),
    ("romantic", 0.3),
    // negative
    ("bad", -0.7),
    ("sad", -0.5),
    ("unhappy", -0.6),
    ("angry", -0.5),
    ("mad", -0.625),
    ("furious", -0.9),
    ("upset", -0.4),
    ("terrible", -1.0),
    ("awful", -1.0),
    ("horrible", -1.0),
    ("worst", -1.0),
    ("worse", -0.4),
    ("hate", -0.8),
    ("hated", -0.9),
    ("depressed", -0.6),
    ("depressing", -0.6),
    ("lonely", -0.5),
    ("miserable", -1.0),
    ("tired", -0.4),
    ("bored", -0.5),
    ("boring", -1.0),
    ("stressed", -0.5),
    ("anxious", -0.25),
    ("worried", -0.4),
    ("hurt", -0.5),
    ("crying", -0.4),
    ("broken", -0.4),
    ("disappointed", -0.75),
    ("annoyed", -0.4),
    ("annoying", -0.8),
    ("frustrated", -0.7),
    ("scared", -0.5),
    ("afraid", -0.6),
    ("sick", -0.7),
    ("painful", -0.7),
    ("heartbroken", -0.8),
    ("hopeless", -0.7),
    ("devastated", -0.9),
    ("poor", -0.4),
    ("wrong", -0.5),
    ("stupid", -0.8),
    ("ugly", -0.7),
    ("dull", -0.3),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.3),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("totally", 1.4),
    ("quite", 1.1),
    ("pretty", 1.1),
    ("slightly", 0.5),
    ("somewhat", 0.7),
    ("kinda", 0.7),
];

const NEGATORS: &[&str] = &["not", "no", "never", "nothing", "hardly", "without"];

pub struct LexiconScorer {
    lexicon: HashMap<&'static str, f64>,
    intensifiers: HashMap<&'static str, f64>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    pub fn new() -> Self {
        Self {
            lexicon: LEXICON.iter().copied().collect(),
            intensifiers: INTENSIFIERS.iter().copied().collect(),
        }
    }

    fn is_negator(word: &str) -> bool {
        NEGATORS.contains(&word)
            || word.ends_with("n't")
            || word.ends_with("n\u{2019}t")
            || word == "dont"
            || word == "cant"
    }

    fn polarity(&self, text: &str) -> f64 {
        let words: Vec<String> = text.unicode_words().map(|w| w.to_lowercase()).collect();

        let mut total = 0.0;
        let mut matched = 0usize;

        for (i, word) in words.iter().enumerate() {
            let Some(&polarity) = self.lexicon.get(word.as_str()) else {
                continue;
            };

            let mut value = polarity;
            if i > 0 {
                if let Some(&multiplier) = self.intensifiers.get(words[i - 1].as_str()) {
                    value *= multiplier;
                }
            }

            let window_start = i.saturating_sub(NEGATION_WINDOW);
            if words[window_start..i].iter().any(|w| Self::is_negator(w)) {
                value *= NEGATION_FACTOR;
            }

            total += value;
            matched += 1;
        }

        if matched == 0 {
            return 0.0;
        }
        (total / matched as f64).clamp(-1.0, 1.0)
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn score(&self, text: &str) -> Result<f64> {
        Ok(self.polarity(text))
    }
}
