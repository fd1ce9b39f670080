//! Emotion classification and the mood lookup tables.

mod emotion;
mod tables;

pub use emotion::{classify, Emotion};
pub use tables::{MoodTables, PlaylistEntry, DEFAULT_GENRE, DEFAULT_PLAYLIST_URL};
