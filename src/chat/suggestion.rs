//! Music suggestion appended to chat replies.

use crate::mood::{Emotion, MoodTables};

/// Replies starting with one of these are apologies; the suggestion replaces
/// them instead of being appended.
const ERROR_PREFIXES: &[&str] = &["I'm having trouble", "I'm not sure"];

pub fn suggestion_sentence(emotion: Emotion, genre: &str) -> String {
    format!(
        "I sense you're feeling {}. Would you like me to recommend some {} music? Click the 'Get Music' button!",
        emotion, genre
    )
}

/// Adds the music suggestion for `emotion` to a resolved reply.
///
/// Only emotions with an explicit genre entry get a suggestion; for the rest
/// the reply is returned unchanged.
pub fn decorate_reply(reply: &str, emotion: Emotion, tables: &MoodTables) -> String {
    let Some(genre) = tables.genre_entry(emotion) else {
        return reply.to_string();
    };

    let suggestion = suggestion_sentence(emotion, genre);
    if ERROR_PREFIXES.iter().any(|prefix| reply.starts_with(prefix)) {
        suggestion
    } else {
        format!("{}\n\n{}", reply, suggestion)
    }
}
