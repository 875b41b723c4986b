use super::error::EnrichError;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref TRACK_URL_REGEX: Regex = Regex::new(r"track/([A-Za-z0-9]+)")
        .expect("Invalid Regex, this should be fixed at runtime.");
}

/// Catalog identifier of a track, e.g. `4uLU6hMCjMI75M1A2tKUQC`.
///
/// Always non-empty and made of ASCII letters and digits only.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrackId(String);

impl TrackId {
    /// Extracts the identifier following the first `track/` path marker.
    ///
    /// Anything after the identifier (query string, trailing path) is ignored,
    /// so `https://open.spotify.com/track/abc123?si=x` yields `abc123`.
    pub fn from_url(input: &str) -> Result<Self, EnrichError> {
        TRACK_URL_REGEX
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| TrackId(m.as_str().to_string()))
            .ok_or_else(|| EnrichError::InvalidInput(input.to_string()))
    }

    /// Validates an identifier given on its own, without the surrounding URL.
    pub fn from_raw(id: &str) -> Result<Self, EnrichError> {
        if !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric()) {
            Ok(TrackId(id.to_string()))
        } else {
            Err(EnrichError::InvalidInput(id.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TrackId {
    type Err = EnrichError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TrackId::from_url(s)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
