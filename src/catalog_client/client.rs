//! HTTP client for the catalog service (Spotify Web API shaped).

use super::credentials::{BearerToken, CredentialSource};
use super::models::{ArtistProfile, AudioFeatures, SiblingTrack, TrackSummary};
use super::trait_def::{CatalogClient, CatalogError};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_CATALOG_API_URL: &str = "https://api.spotify.com/v1";

/// Upstream error bodies are cut to this many characters before being
/// carried in a [`CatalogError::Api`].
const MAX_ERROR_MESSAGE_LENGTH: usize = 256;

/// HTTP client for the catalog web API.
pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
    credentials: CredentialSource,
}

#[derive(Deserialize, Default)]
struct ExternalUrls {
    #[serde(default)]
    spotify: String,
}

#[derive(Deserialize)]
struct AlbumRef {
    id: String,
    name: String,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ArtistRef {
    id: String,
    name: String,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct TrackObject {
    id: String,
    name: String,
    #[serde(default)]
    popularity: u32,
    album: AlbumRef,
    #[serde(default)]
    artists: Vec<ArtistRef>,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct AudioFeaturesObject {
    tempo: f64,
}

/// Track entry inside a list. Album track pages carry simplified track
/// objects without a popularity field.
#[derive(Deserialize)]
struct ListedTrack {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    popularity: u32,
}

#[derive(Deserialize)]
struct AlbumTracksPage {
    #[serde(default)]
    items: Vec<ListedTrack>,
}

#[derive(Deserialize)]
struct TopTracksResponse {
    #[serde(default)]
    tracks: Vec<ListedTrack>,
}

#[derive(Deserialize)]
struct ArtistObject {
    #[serde(default)]
    genres: Vec<String>,
}

impl TryFrom<TrackObject> for TrackSummary {
    type Error = CatalogError;

    fn try_from(track: TrackObject) -> Result<Self, Self::Error> {
        let artist = track.artists.into_iter().next().ok_or_else(|| {
            CatalogError::InvalidResponse(format!("track {} has no artists", track.id))
        })?;

        Ok(TrackSummary {
            id: track.id,
            name: track.name,
            popularity: track.popularity,
            album_id: track.album.id,
            album_name: track.album.name,
            album_url: track.album.external_urls.spotify,
            artist_id: artist.id,
            artist_name: artist.name,
            artist_url: artist.external_urls.spotify,
            external_url: track.external_urls.spotify,
        })
    }
}

impl From<ListedTrack> for SiblingTrack {
    fn from(track: ListedTrack) -> Self {
        SiblingTrack {
            id: track.id.unwrap_or_default(),
            popularity: track.popularity,
        }
    }
}

fn map_transport_error(err: reqwest::Error) -> CatalogError {
    if err.is_timeout() {
        CatalogError::Timeout
    } else {
        CatalogError::Connection(err.to_string())
    }
}

impl HttpCatalogClient {
    /// Create a new catalog client.
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the catalog API (e.g., "https://api.spotify.com/v1")
    /// * `timeout_sec` - Timeout of every single catalog request, in seconds
    /// * `credentials` - Where the bearer token comes from
    pub fn new(base_url: String, timeout_sec: u64, credentials: CredentialSource) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_sec))
            .build()
            .context("Failed to create HTTP client")?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Get the base URL of the catalog API.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `path` (relative to the base URL) and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        credential: &BearerToken,
    ) -> Result<T, CatalogError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Sending catalog request");

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, credential.header_value())
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_MESSAGE_LENGTH).collect(),
            });
        }

        let bytes = response.bytes().await.map_err(map_transport_error)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| CatalogError::InvalidResponse(format!("{}: {}", path, e)))
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn credential(&self) -> Result<BearerToken, CatalogError> {
        self.credentials.resolve().await
    }

    async fn get_track(
        &self,
        id: &str,
        credential: &BearerToken,
    ) -> Result<TrackSummary, CatalogError> {
        let path = format!("/tracks/{}", urlencoding::encode(id));
        let track: TrackObject = self.get_json(&path, credential).await?;
        track.try_into()
    }

    async fn get_audio_features(
        &self,
        id: &str,
        credential: &BearerToken,
    ) -> Result<AudioFeatures, CatalogError> {
        let path = format!("/audio-features/{}", urlencoding::encode(id));
        let features: AudioFeaturesObject = self.get_json(&path, credential).await?;
        Ok(AudioFeatures {
            tempo: features.tempo,
        })
    }

    async fn get_album_tracks(
        &self,
        album_id: &str,
        credential: &BearerToken,
        limit: u32,
    ) -> Result<Vec<SiblingTrack>, CatalogError> {
        let path = format!(
            "/albums/{}/tracks?limit={}",
            urlencoding::encode(album_id),
            limit
        );
        let page: AlbumTracksPage = self.get_json(&path, credential).await?;
        Ok(page.items.into_iter().map(SiblingTrack::from).collect())
    }

    async fn get_artist_top_tracks(
        &self,
        artist_id: &str,
        credential: &BearerToken,
        market: &str,
    ) -> Result<Vec<SiblingTrack>, CatalogError> {
        let path = format!(
            "/artists/{}/top-tracks?market={}",
            urlencoding::encode(artist_id),
            urlencoding::encode(market)
        );
        let top: TopTracksResponse = self.get_json(&path, credential).await?;
        Ok(top.tracks.into_iter().map(SiblingTrack::from).collect())
    }

    async fn get_artist_profile(
        &self,
        artist_id: &str,
        credential: &BearerToken,
    ) -> Result<ArtistProfile, CatalogError> {
        let path = format!("/artists/{}", urlencoding::encode(artist_id));
        let artist: ArtistObject = self.get_json(&path, credential).await?;
        Ok(ArtistProfile {
            genres: artist.genres,
        })
    }
}
