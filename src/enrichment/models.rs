use super::ranking::RankResult;
use serde::{Serialize, Serializer};

/// Text clients see in place of a value the catalog cannot provide.
pub const INFO_NOT_AVAILABLE: &str = "Info not available";

/// A text field that may be missing from the catalog data.
///
/// Serializes as the plain string, or as [`INFO_NOT_AVAILABLE`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfoField {
    Available(String),
    NotAvailable,
}

impl InfoField {
    pub fn as_option(&self) -> Option<&str> {
        match self {
            InfoField::Available(value) => Some(value.as_str()),
            InfoField::NotAvailable => None,
        }
    }
}

impl From<Option<String>> for InfoField {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(value) => InfoField::Available(value),
            None => InfoField::NotAvailable,
        }
    }
}

impl Serialize for InfoField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_option().unwrap_or(INFO_NOT_AVAILABLE))
    }
}

/// Album or artist the track belongs to, with the track's rank in it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedContext {
    pub name: String,
    pub url: String,
    pub rank: usize,
    pub total: usize,
}

impl RankedContext {
    pub fn new(name: String, url: String, rank: RankResult) -> Self {
        Self {
            name,
            url,
            rank: rank.rank,
            total: rank.total,
        }
    }
}

/// Authorship information. The catalog's public API exposes none of it, so
/// every field is currently [`InfoField::NotAvailable`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credits {
    pub writers: InfoField,
    pub producers: InfoField,
    pub composers: InfoField,
}

impl Credits {
    pub fn not_available() -> Self {
        Self {
            writers: InfoField::NotAvailable,
            producers: InfoField::NotAvailable,
            composers: InfoField::NotAvailable,
        }
    }
}

/// Everything known about a track, as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedTrack {
    pub name: String,
    pub popularity: u32,
    pub bpm: f64,
    pub album: RankedContext,
    pub artist: RankedContext,
    pub genre: InfoField,
    pub credits: Credits,
    pub external_url: String,
}
