//! Catalog client trait definition.

use super::credentials::BearerToken;
use super::models::{ArtistProfile, AudioFeatures, SiblingTrack, TrackSummary};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Request timeout")]
    Timeout,
}

/// Read-only access to the third-party music catalog.
///
/// Every lookup takes the bearer credential explicitly, so a caller can
/// obtain it once and reuse it for all the lookups of a single request.
/// Network, authentication and rate limits are the implementation's concern.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Obtain a bearer credential for the following lookups.
    async fn credential(&self) -> Result<BearerToken, CatalogError>;

    async fn get_track(
        &self,
        id: &str,
        credential: &BearerToken,
    ) -> Result<TrackSummary, CatalogError>;

    async fn get_audio_features(
        &self,
        id: &str,
        credential: &BearerToken,
    ) -> Result<AudioFeatures, CatalogError>;

    /// First page of an album's tracks, at most `limit` entries.
    async fn get_album_tracks(
        &self,
        album_id: &str,
        credential: &BearerToken,
        limit: u32,
    ) -> Result<Vec<SiblingTrack>, CatalogError>;

    /// The artist's top tracks in the given market.
    async fn get_artist_top_tracks(
        &self,
        artist_id: &str,
        credential: &BearerToken,
        market: &str,
    ) -> Result<Vec<SiblingTrack>, CatalogError>;

    async fn get_artist_profile(
        &self,
        artist_id: &str,
        credential: &BearerToken,
    ) -> Result<ArtistProfile, CatalogError>;
}
