//! Catalog entities as seen by the enrichment core.
//!
//! These are projections of the much larger upstream payloads: only the
//! fields the enrichment actually consumes are kept.

/// Snapshot of a single track, fetched fresh for every request.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackSummary {
    pub id: String,
    pub name: String,
    /// Catalog popularity score, 0 to 100.
    pub popularity: u32,
    pub album_id: String,
    pub album_name: String,
    pub album_url: String,
    /// First artist credited on the track.
    pub artist_id: String,
    pub artist_name: String,
    pub artist_url: String,
    pub external_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioFeatures {
    /// Estimated tempo in beats per minute.
    pub tempo: f64,
}

/// One entry of an album track list or of an artist top-tracks list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiblingTrack {
    pub id: String,
    pub popularity: u32,
}

impl SiblingTrack {
    pub fn new(id: impl Into<String>, popularity: u32) -> Self {
        Self {
            id: id.into(),
            popularity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistProfile {
    /// Genres in the order the catalog reports them.
    pub genres: Vec<String>,
}
