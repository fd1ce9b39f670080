//! Emotion → genre → playlist lookup tables.
//!
//! Tables are built once at startup (built-in defaults, optionally overridden
//! from the TOML config) and shared read-only with the request handlers.

use super::Emotion;
use std::collections::HashMap;

/// Genre used when an emotion has no entry in the genre table.
pub const DEFAULT_GENRE: &str = "chill";

/// Generic mood playlist used when no playlist key matches a genre.
pub const DEFAULT_PLAYLIST_URL: &str = "https://open.spotify.com/genre/mood";

const BUILTIN_GENRES: &[(Emotion, &str)] = &[
    (Emotion::Ecstatic, "party"),
    (Emotion::Happy, "happy vibes"),
    (Emotion::Calm, "chill"),
    (Emotion::Neutral, "study music"),
    (Emotion::Relaxed, "acoustic"),
    (Emotion::Melancholic, "indie"),
    (Emotion::Sad, "sad songs"),
    (Emotion::Motivated, "workout"),
    (Emotion::Romantic, "romance"),
    (Emotion::Nostalgic, "throwback"),
    (Emotion::Energetic, "pop"),
    (Emotion::Focused, "instrumental"),
    (Emotion::Angry, "rock"),
    (Emotion::Peaceful, "nature sounds"),
    (Emotion::Festive, "holiday"),
    (Emotion::Love, "love songs"),
];

// Order matters: the first key contained in the genre wins.
const BUILTIN_PLAYLISTS: &[(&str, &str)] = &[
    ("happy", "https://open.spotify.com/genre/mood-happy"),
    ("sad", "https://open.spotify.com/genre/mood-sad"),
    ("calm", "https://open.spotify.com/genre/mood-calm"),
    ("energetic", "https://open.spotify.com/genre/mood-energetic"),
    ("workout", "https://open.spotify.com/genre/mood-workout"),
    ("party", "https://open.spotify.com/genre/party"),
    ("focus", "https://open.spotify.com/genre/focus"),
    ("romance", "https://open.spotify.com/genre/romance"),
];

/// A genre substring and the playlist page it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistEntry {
    pub key: String,
    pub url: String,
}

impl PlaylistEntry {
    pub fn new(key: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoodTables {
    genres: HashMap<Emotion, String>,
    playlists: Vec<PlaylistEntry>,
    default_genre: String,
    default_playlist_url: String,
}

impl Default for MoodTables {
    fn default() -> Self {
        Self::new(
            Self::builtin_genres(),
            Self::builtin_playlists(),
            DEFAULT_GENRE,
            DEFAULT_PLAYLIST_URL,
        )
    }
}

impl MoodTables {
    pub fn new(
        genres: HashMap<Emotion, String>,
        playlists: Vec<PlaylistEntry>,
        default_genre: impl Into<String>,
        default_playlist_url: impl Into<String>,
    ) -> Self {
        Self {
            genres,
            playlists,
            default_genre: default_genre.into(),
            default_playlist_url: default_playlist_url.into(),
        }
    }

    pub fn builtin_genres() -> HashMap<Emotion, String> {
        BUILTIN_GENRES
            .iter()
            .map(|(emotion, genre)| (*emotion, genre.to_string()))
            .collect()
    }

    pub fn builtin_playlists() -> Vec<PlaylistEntry> {
        BUILTIN_PLAYLISTS
            .iter()
            .map(|(key, url)| PlaylistEntry::new(*key, *url))
            .collect()
    }

    /// The explicit genre entry for an emotion, if the table has one.
    pub fn genre_entry(&self, emotion: Emotion) -> Option<&str> {
        self.genres.get(&emotion).map(String::as_str)
    }

    /// Genre for an emotion, falling back to the default genre.
    pub fn genre_for(&self, emotion: Emotion) -> &str {
        self.genre_entry(emotion).unwrap_or(&self.default_genre)
    }

    /// Same as [`genre_for`](Self::genre_for) but for a raw label; labels
    /// outside the emotion set resolve to the default genre.
    pub fn genre_for_label(&self, label: &str) -> &str {
        match Emotion::from_label(label) {
            Some(emotion) => self.genre_for(emotion),
            None => &self.default_genre,
        }
    }

    /// Playlist URL for an emotion.
    ///
    /// Scans the playlist keys in declaration order and returns the URL of the
    /// first key contained in the emotion's genre (case-insensitive).
    pub fn playlist_for(&self, emotion: Emotion) -> &str {
        let genre = self.genre_for(emotion).to_lowercase();
        self.playlists
            .iter()
            .find(|entry| genre.contains(&entry.key.to_lowercase()))
            .map(|entry| entry.url.as_str())
            .unwrap_or(&self.default_playlist_url)
    }

    pub fn default_genre(&self) -> &str {
        &self.default_genre
    }

    pub fn default_playlist_url(&self) -> &str {
        &self.default_playlist_url
    }

    pub fn playlists(&self) -> &[PlaylistEntry] {
        &self.playlists
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_lookup_uses_builtin_table() {
        let tables = MoodTables::default();
        assert_eq!(tables.genre_for(Emotion::Happy), "happy vibes");
        assert_eq!(tables.genre_for_label("happy"), "happy vibes");
        assert_eq!(tables.genre_for(Emotion::Sad), "sad songs");
    }

    #[test]
    fn genre_lookup_falls_back_to_default() {
        let tables = MoodTables::default();
        assert_eq!(tables.genre_for_label("unknown_emotion"), "chill");
        assert_eq!(tables.genre_entry(Emotion::Devastated), None);
        assert_eq!(tables.genre_for(Emotion::Devastated), "chill");
    }

    #[test]
    fn every_classifier_emotion_but_devastated_has_a_genre() {
        let tables = MoodTables::default();
        for score in [0.9, 0.5, 0.2, 0.0, -0.05, -0.2, -0.5, -0.9] {
            let emotion = crate::mood::classify(score);
            if emotion == Emotion::Devastated {
                continue;
            }
            assert!(
                tables.genre_entry(emotion).is_some(),
                "{} has no genre",
                emotion
            );
        }
    }

    #[test]
    fn playlist_lookup_matches_genre_substring() {
        let tables = MoodTables::default();
        assert_eq!(
            tables.playlist_for(Emotion::Sad),
            "https://open.spotify.com/genre/mood-sad"
        );
        assert_eq!(
            tables.playlist_for(Emotion::Happy),
            "https://open.spotify.com/genre/mood-happy"
        );
        assert_eq!(
            tables.playlist_for(Emotion::Ecstatic),
            "https://open.spotify.com/genre/party"
        );
        assert_eq!(
            tables.playlist_for(Emotion::Romantic),
            "https://open.spotify.com/genre/romance"
        );
        assert_eq!(
            tables.playlist_for(Emotion::Motivated),
            "https://open.spotify.com/genre/mood-workout"
        );
    }

    #[test]
    fn playlist_lookup_falls_back_to_default_url() {
        let tables = MoodTables::default();
        // "chill" via the default genre, no key matches it
        assert_eq!(tables.playlist_for(Emotion::Devastated), DEFAULT_PLAYLIST_URL);
        assert_eq!(tables.playlist_for(Emotion::Neutral), DEFAULT_PLAYLIST_URL);
        assert_eq!(tables.playlist_for(Emotion::Calm), DEFAULT_PLAYLIST_URL);
    }

    #[test]
    fn playlist_lookup_respects_declaration_order() {
        let mut genres = HashMap::new();
        genres.insert(Emotion::Happy, "Happy Sad Mix".to_string());
        let tables = MoodTables::new(
            genres,
            vec![
                PlaylistEntry::new("sad", "https://example.com/sad"),
                PlaylistEntry::new("happy", "https://example.com/happy"),
            ],
            DEFAULT_GENRE,
            DEFAULT_PLAYLIST_URL,
        );
        assert_eq!(tables.playlist_for(Emotion::Happy), "https://example.com/sad");
    }

    #[test]
    fn lookups_are_idempotent() {
        let tables = MoodTables::default();
        for emotion in Emotion::ALL {
            assert_eq!(tables.genre_for(emotion), tables.genre_for(emotion));
            assert_eq!(tables.playlist_for(emotion), tables.playlist_for(emotion));
        }
    }
}
