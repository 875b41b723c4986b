//! In-process fake of the catalog web API
//!
//! Serves Spotify-shaped JSON for a tiny fixed catalog and records every
//! request it receives, so tests can check which lookups were made.

use super::constants::*;
use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct FakeCatalogState {
    requests: Arc<Mutex<Vec<String>>>,
}

/// Handle to a running fake catalog
pub struct FakeCatalog {
    /// Base URL to configure the catalog client with, e.g. "http://127.0.0.1:1234/v1"
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl FakeCatalog {
    pub async fn spawn() -> Self {
        let state = FakeCatalogState::default();
        let requests = state.requests.clone();

        let app = Router::new()
            .route("/v1/tracks/{id}", get(get_track))
            .route("/v1/audio-features/{id}", get(get_audio_features))
            .route("/v1/albums/{id}/tracks", get(get_album_tracks))
            .route("/v1/artists/{id}/top-tracks", get(get_top_tracks))
            .route("/v1/artists/{id}", get(get_artist))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind fake catalog");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Fake catalog failed");
        });

        Self {
            base_url: format!("http://127.0.0.1:{}/v1", port),
            requests,
            _shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Paths (with query) of all requests received so far
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeCatalog {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// Records the request and checks its bearer token.
fn admit(state: &FakeCatalogState, uri: &Uri, headers: &HeaderMap) -> Result<(), Response> {
    state.requests.lock().unwrap().push(uri.to_string());

    let expected = format!("Bearer {}", TEST_TOKEN);
    match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err(api_error(StatusCode::UNAUTHORIZED, "Invalid access token")),
    }
}

fn api_error(status: StatusCode, message: &str) -> Response {
    let body = json!({ "error": { "status": status.as_u16(), "message": message } });
    (status, Json(body)).into_response()
}

fn spotify_url(kind: &str, id: &str) -> Value {
    json!({ "spotify": format!("https://open.spotify.com/{}/{}", kind, id) })
}

/// (track id, name, popularity, album id, artist id)
type TrackRow = (&'static str, &'static str, u32, &'static str, &'static str);

const TRACKS: &[TrackRow] = &[
    ("track1", "Overture", 40, ALBUM_1_ID, ARTIST_1_ID),
    ("track2", "Highway", 80, ALBUM_1_ID, ARTIST_1_ID),
    (TRACK_ID, TRACK_NAME, TRACK_POPULARITY, ALBUM_1_ID, ARTIST_1_ID),
    (TIED_TRACK_ID, "Afterglow", TRACK_POPULARITY, ALBUM_1_ID, ARTIST_1_ID),
    ("track5", "Single Edit", 70, "album3", ARTIST_1_ID),
    (BROKEN_FEATURES_TRACK_ID, "Static", 15, ALBUM_1_ID, ARTIST_1_ID),
    (LONELY_TRACK_ID, "Alone", 10, ALBUM_2_ID, ARTIST_2_ID),
];

fn find_track(id: &str) -> Option<&'static TrackRow> {
    TRACKS.iter().find(|t| t.0 == id)
}

fn album_name(id: &str) -> &'static str {
    match id {
        ALBUM_1_ID => ALBUM_1_NAME,
        ALBUM_2_ID => "Solitude",
        _ => "Singles",
    }
}

fn artist_name(id: &str) -> &'static str {
    match id {
        ARTIST_1_ID => ARTIST_1_NAME,
        _ => "Quiet Artist",
    }
}

fn listed_track(id: &str, popularity: u32) -> Value {
    json!({ "id": id, "popularity": popularity, "external_urls": spotify_url("track", id) })
}

async fn get_track(
    State(state): State<FakeCatalogState>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = admit(&state, &uri, &headers) {
        return response;
    }
    let Some(&(id, name, popularity, album_id, artist_id)) = find_track(&id) else {
        return api_error(StatusCode::NOT_FOUND, "Non existing id");
    };

    Json(json!({
        "id": id,
        "name": name,
        "popularity": popularity,
        "duration_ms": 215000,
        "album": {
            "id": album_id,
            "name": album_name(album_id),
            "external_urls": spotify_url("album", album_id),
        },
        "artists": [
            {
                "id": artist_id,
                "name": artist_name(artist_id),
                "external_urls": spotify_url("artist", artist_id),
            },
            {
                "id": "guest",
                "name": "Guest Artist",
                "external_urls": spotify_url("artist", "guest"),
            }
        ],
        "external_urls": spotify_url("track", id),
    }))
    .into_response()
}

async fn get_audio_features(
    State(state): State<FakeCatalogState>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = admit(&state, &uri, &headers) {
        return response;
    }
    if id == BROKEN_FEATURES_TRACK_ID {
        return api_error(StatusCode::INTERNAL_SERVER_ERROR, "Server error");
    }
    if find_track(&id).is_none() {
        return api_error(StatusCode::NOT_FOUND, "Non existing id");
    }
    let tempo = if id == TRACK_ID { TRACK_TEMPO } else { 100.0 };
    Json(json!({ "id": id, "tempo": tempo, "energy": 0.8 })).into_response()
}

#[derive(Deserialize)]
struct AlbumTracksQuery {
    limit: Option<usize>,
}

async fn get_album_tracks(
    State(state): State<FakeCatalogState>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<AlbumTracksQuery>,
) -> Response {
    if let Err(response) = admit(&state, &uri, &headers) {
        return response;
    }
    let items: Vec<Value> = TRACKS
        .iter()
        .filter(|t| t.3 == id)
        .take(query.limit.unwrap_or(20))
        .map(|t| listed_track(t.0, t.2))
        .collect();
    let total = items.len();
    Json(json!({ "items": items, "total": total })).into_response()
}

#[derive(Deserialize)]
struct TopTracksQuery {
    market: Option<String>,
}

async fn get_top_tracks(
    State(state): State<FakeCatalogState>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
    Query(query): Query<TopTracksQuery>,
) -> Response {
    if let Err(response) = admit(&state, &uri, &headers) {
        return response;
    }
    if query.market.is_none() {
        return api_error(StatusCode::BAD_REQUEST, "Missing market");
    }
    let tracks = match id.as_str() {
        ARTIST_1_ID => vec![
            listed_track("track2", 80),
            listed_track("track5", 70),
            listed_track(TRACK_ID, TRACK_POPULARITY),
        ],
        _ => vec![],
    };
    Json(json!({ "tracks": tracks })).into_response()
}

async fn get_artist(
    State(state): State<FakeCatalogState>,
    uri: Uri,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Response {
    if let Err(response) = admit(&state, &uri, &headers) {
        return response;
    }
    let genres = match id.as_str() {
        ARTIST_1_ID => vec![ARTIST_1_GENRE, "retrowave"],
        ARTIST_2_ID => vec![],
        _ => return api_error(StatusCode::NOT_FOUND, "Non existing id"),
    };
    Json(json!({ "id": id, "name": artist_name(&id), "genres": genres })).into_response()
}
