use crate::catalog_client::CatalogError;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Catalog lookup an upstream failure happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrichStep {
    Credential,
    Track,
    AudioFeatures,
    AlbumTracks,
    ArtistTopTracks,
    ArtistProfile,
}

impl EnrichStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrichStep::Credential => "credential",
            EnrichStep::Track => "track",
            EnrichStep::AudioFeatures => "audio_features",
            EnrichStep::AlbumTracks => "album_tracks",
            EnrichStep::ArtistTopTracks => "artist_top_tracks",
            EnrichStep::ArtistProfile => "artist_profile",
        }
    }
}

impl fmt::Display for EnrichStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
pub enum EnrichError {
    /// The input does not contain a track identifier. No catalog call is made.
    #[error("Invalid track URL: {0}")]
    InvalidInput(String),

    /// A catalog lookup failed; the whole enrichment is abandoned.
    #[error("Catalog {step} lookup failed: {source}")]
    Upstream {
        step: EnrichStep,
        #[source]
        source: CatalogError,
    },

    #[error("Enrichment did not complete within {0:?}")]
    DeadlineExceeded(Duration),
}

impl EnrichError {
    /// True when the caller sent bad input, false for server-side failures.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EnrichError::InvalidInput(_))
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            EnrichError::InvalidInput(_) => "invalid_input",
            EnrichError::Upstream { .. } => "upstream_error",
            EnrichError::DeadlineExceeded(_) => "deadline",
        }
    }
}

/// Wraps a catalog error into [`EnrichError::Upstream`] for `step`.
pub(super) fn upstream(step: EnrichStep) -> impl FnOnce(CatalogError) -> EnrichError {
    move |source| EnrichError::Upstream { step, source }
}
