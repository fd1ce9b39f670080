use crate::chat::ReplyResolver;
use crate::mood::MoodTables;
use crate::sentiment::SentimentScorer;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedScorer = Arc<dyn SentimentScorer>;
pub type GuardedResolver = Arc<ReplyResolver>;
pub type GuardedMoodTables = Arc<MoodTables>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub scorer: GuardedScorer,
    pub resolver: GuardedResolver,
    pub tables: GuardedMoodTables,
    pub hash: String,
}

impl ServerState {
    pub fn new(
        config: ServerConfig,
        scorer: GuardedScorer,
        resolver: GuardedResolver,
        tables: GuardedMoodTables,
    ) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            scorer,
            resolver,
            tables,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}
