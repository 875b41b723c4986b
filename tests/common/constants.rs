//! Shared constants for end-to-end tests
//!
//! This module contains all constants used across the test suite.
//! When the fake catalog data changes, update only this file.

// ============================================================================
// Catalog Credentials
// ============================================================================

/// The only bearer token the fake catalog accepts
pub const TEST_TOKEN: &str = "test-token";

// ============================================================================
// Fake Catalog IDs
// ============================================================================

/// Artist with genres and a US top tracks list
pub const ARTIST_1_ID: &str = "artist1";
pub const ARTIST_1_NAME: &str = "Test Artist";
pub const ARTIST_1_GENRE: &str = "synthwave";

/// Artist with no genres and no top tracks
pub const ARTIST_2_ID: &str = "artist2";

/// Album of ARTIST_1 with five tracks
pub const ALBUM_1_ID: &str = "album1";
pub const ALBUM_1_NAME: &str = "Night Drive";

/// Album of ARTIST_2 with a single track
pub const ALBUM_2_ID: &str = "album2";

/// Second most popular track of ALBUM_1, third of ARTIST_1 top tracks
pub const TRACK_ID: &str = "track3";
pub const TRACK_NAME: &str = "Neon Lights";
pub const TRACK_POPULARITY: u32 = 60;
pub const TRACK_TEMPO: f64 = 121.5;

/// Track of ARTIST_1 that ties with TRACK_ID on popularity
pub const TIED_TRACK_ID: &str = "track4";

/// Track of ARTIST_2
pub const LONELY_TRACK_ID: &str = "track9";

/// Track whose audio features lookup fails upstream
pub const BROKEN_FEATURES_TRACK_ID: &str = "track7";

/// Track unknown to the catalog
pub const MISSING_TRACK_ID: &str = "nosuchtrack";

// ============================================================================
// Timeouts
// ============================================================================

/// Maximum time to wait for the test server to become ready
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Poll interval while waiting for the server
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 10;

/// Timeout of every request made by the test client
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Helpers
// ============================================================================

/// Public URL of a catalog track, as users paste it
pub fn track_url(id: &str) -> String {
    format!("https://open.spotify.com/track/{}?si=abcdef", id)
}
