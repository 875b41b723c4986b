//! Enrichment endpoints.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::metrics::{record_enrichment, record_upstream_error};
use super::state::{GuardedTrackEnricher, ServerState};
use crate::enrichment::{EnrichError, EnrichedTrack, TrackId};

const INVALID_URL_MESSAGE: &str = "Invalid URL";
const SERVER_ERROR_MESSAGE: &str = "Server error";

#[derive(Deserialize, Debug)]
struct EnrichTrackBody {
    #[serde(default)]
    pub url: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for EnrichError {
    fn into_response(self) -> Response {
        if self.is_client_error() {
            let body = ErrorBody {
                error: INVALID_URL_MESSAGE,
            };
            return (StatusCode::BAD_REQUEST, Json(body)).into_response();
        }

        match &self {
            EnrichError::Upstream { step, source } => {
                error!("Enrichment failed at {} lookup: {}", step, source)
            }
            other => error!("Enrichment failed: {}", other),
        }
        let body = ErrorBody {
            error: SERVER_ERROR_MESSAGE,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

/// Records the outcome metrics of one enrichment and turns it into a response.
fn respond(result: Result<EnrichedTrack, EnrichError>, start: Instant) -> Response {
    let duration = start.elapsed();
    match result {
        Ok(track) => {
            record_enrichment("ok", duration);
            Json(track).into_response()
        }
        Err(err) => {
            record_enrichment(err.kind(), duration);
            if let EnrichError::Upstream { step, .. } = &err {
                record_upstream_error(step.as_str());
            }
            err.into_response()
        }
    }
}

async fn enrich_track_url(
    State(enricher): State<GuardedTrackEnricher>,
    body: Result<Json<EnrichTrackBody>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    // An unreadable body carries no URL, which is the same as an invalid one
    let url = match body {
        Ok(Json(body)) => body.url,
        Err(rejection) => {
            debug!("Rejected enrichment body: {}", rejection);
            String::new()
        }
    };
    respond(enricher.enrich_url(&url).await, start)
}

async fn enrich_track_id(
    State(enricher): State<GuardedTrackEnricher>,
    Path(id): Path<String>,
) -> Response {
    let start = Instant::now();
    let result = match TrackId::from_raw(&id) {
        Ok(id) => enricher.enrich(&id).await,
        Err(err) => Err(err),
    };
    respond(result, start)
}

pub fn make_track_routes(state: ServerState) -> Router {
    Router::new()
        .route("/api/track", post(enrich_track_url))
        .route("/v1/track/{id}/enriched", get(enrich_track_id))
        .with_state(state)
}
