//! Enrichment orchestrator.
//!
//! Drives the catalog lookups for one track and merges them into an
//! [`EnrichedTrack`]:
//!
//! 1. credential, then the track itself (needed for the album and artist ids)
//! 2. audio features, album tracks, artist top tracks and artist profile,
//!    all four concurrently
//!
//! Any failed lookup fails the whole enrichment. Missing genre or rank data
//! only degrades the corresponding field.

use super::error::{upstream, EnrichError, EnrichStep};
use super::models::{Credits, EnrichedTrack, InfoField, RankedContext};
use super::ranking::rank_by_popularity;
use super::track_id::TrackId;
use crate::catalog_client::{
    ArtistProfile, AudioFeatures, CatalogClient, SiblingTrack, TrackSummary,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Catalog page size limit for album tracks.
pub const MAX_ALBUM_TRACKS_LIMIT: u32 = 50;
pub const DEFAULT_TOP_TRACKS_MARKET: &str = "US";
pub const DEFAULT_REQUEST_DEADLINE: Duration = Duration::from_secs(20);

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichmentOptions {
    /// How many album tracks to rank against (1 to 50).
    pub album_tracks_limit: u32,
    /// Market the artist top tracks are computed for.
    pub market: String,
    /// Upper bound for a whole enrichment. `None` waits as long as the
    /// catalog client does.
    pub deadline: Option<Duration>,
}

impl Default for EnrichmentOptions {
    fn default() -> Self {
        Self {
            album_tracks_limit: MAX_ALBUM_TRACKS_LIMIT,
            market: DEFAULT_TOP_TRACKS_MARKET.to_string(),
            deadline: Some(DEFAULT_REQUEST_DEADLINE),
        }
    }
}

pub struct TrackEnricher {
    client: Arc<dyn CatalogClient>,
    options: EnrichmentOptions,
}

impl TrackEnricher {
    pub fn new(client: Arc<dyn CatalogClient>, options: EnrichmentOptions) -> Self {
        Self { client, options }
    }

    pub fn options(&self) -> &EnrichmentOptions {
        &self.options
    }

    /// Extracts the track id from `url` and enriches it.
    ///
    /// Malformed URLs fail with [`EnrichError::InvalidInput`] before any
    /// catalog call is made.
    pub async fn enrich_url(&self, url: &str) -> Result<EnrichedTrack, EnrichError> {
        let id = TrackId::from_url(url)?;
        self.enrich(&id).await
    }

    pub async fn enrich(&self, id: &TrackId) -> Result<EnrichedTrack, EnrichError> {
        match self.options.deadline {
            // Dropping the future on timeout cancels every in-flight lookup
            Some(deadline) => tokio::time::timeout(deadline, self.fetch_and_assemble(id))
                .await
                .map_err(|_| {
                    warn!("Enrichment of track {} exceeded {:?}", id, deadline);
                    EnrichError::DeadlineExceeded(deadline)
                })?,
            None => self.fetch_and_assemble(id).await,
        }
    }

    async fn fetch_and_assemble(&self, id: &TrackId) -> Result<EnrichedTrack, EnrichError> {
        let client = self.client.as_ref();

        let credential = client
            .credential()
            .await
            .map_err(upstream(EnrichStep::Credential))?;

        debug!("Fetching track {}", id);
        let track = client
            .get_track(id.as_str(), &credential)
            .await
            .map_err(upstream(EnrichStep::Track))?;

        debug!(
            "Fetching features, album {} and artist {} data for track {}",
            track.album_id, track.artist_id, id
        );
        let (features, album_tracks, top_tracks, artist) = tokio::try_join!(
            async {
                client
                    .get_audio_features(id.as_str(), &credential)
                    .await
                    .map_err(upstream(EnrichStep::AudioFeatures))
            },
            async {
                client
                    .get_album_tracks(
                        &track.album_id,
                        &credential,
                        self.options.album_tracks_limit,
                    )
                    .await
                    .map_err(upstream(EnrichStep::AlbumTracks))
            },
            async {
                client
                    .get_artist_top_tracks(&track.artist_id, &credential, &self.options.market)
                    .await
                    .map_err(upstream(EnrichStep::ArtistTopTracks))
            },
            async {
                client
                    .get_artist_profile(&track.artist_id, &credential)
                    .await
                    .map_err(upstream(EnrichStep::ArtistProfile))
            },
        )?;

        let enriched = assemble(id, track, features, &album_tracks, &top_tracks, artist);
        info!(
            "Enriched track {}: album rank {}/{}, artist rank {}/{}",
            id,
            enriched.album.rank,
            enriched.album.total,
            enriched.artist.rank,
            enriched.artist.total
        );
        Ok(enriched)
    }
}

/// Ranks are computed for the requested id, not for the id the catalog
/// answered with.
fn assemble(
    id: &TrackId,
    track: TrackSummary,
    features: AudioFeatures,
    album_tracks: &[SiblingTrack],
    top_tracks: &[SiblingTrack],
    artist: ArtistProfile,
) -> EnrichedTrack {
    let album_rank = rank_by_popularity(album_tracks, id.as_str());
    let artist_rank = rank_by_popularity(top_tracks, id.as_str());
    if !album_rank.is_ranked() {
        debug!(
            "Track {} not among the {} album tracks fetched",
            id, album_rank.total
        );
    }
    if !artist_rank.is_ranked() {
        debug!(
            "Track {} not among the {} artist top tracks",
            id, artist_rank.total
        );
    }

    let genre = InfoField::from(
        artist
            .genres
            .into_iter()
            .next()
            .filter(|genre| !genre.is_empty()),
    );

    EnrichedTrack {
        name: track.name,
        popularity: track.popularity,
        bpm: features.tempo,
        album: RankedContext::new(track.album_name, track.album_url, album_rank),
        artist: RankedContext::new(track.artist_name, track.artist_url, artist_rank),
        genre,
        credits: Credits::not_available(),
        external_url: track.external_url,
    }
}
