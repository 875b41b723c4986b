//! Track enrichment: turns a catalog track URL into an [`EnrichedTrack`].

mod enricher;
mod error;
mod models;
mod ranking;
mod track_id;

pub use enricher::{
    EnrichmentOptions, TrackEnricher, DEFAULT_REQUEST_DEADLINE, DEFAULT_TOP_TRACKS_MARKET,
    MAX_ALBUM_TRACKS_LIMIT,
};
pub use error::{EnrichError, EnrichStep};
pub use models::{Credits, EnrichedTrack, InfoField, RankedContext, INFO_NOT_AVAILABLE};
pub use ranking::{rank_by_popularity, RankResult};
pub use track_id::TrackId;
