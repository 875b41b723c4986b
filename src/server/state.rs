use axum::extract::FromRef;

use crate::enrichment::TrackEnricher;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedTrackEnricher = Arc<TrackEnricher>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub enricher: GuardedTrackEnricher,
    pub hash: String,
}

impl ServerState {
    pub fn new(config: ServerConfig, enricher: GuardedTrackEnricher) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            enricher,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

impl FromRef<ServerState> for GuardedTrackEnricher {
    fn from_ref(input: &ServerState) -> Self {
        input.enricher.clone()
    }
}
