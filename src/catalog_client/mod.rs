//! Access to the third-party music catalog service.
//!
//! The enrichment core only sees the [`CatalogClient`] trait;
//! [`HttpCatalogClient`] is the production implementation talking to a
//! Spotify-shaped web API.

mod client;
mod credentials;
mod models;
mod trait_def;

pub use client::{HttpCatalogClient, DEFAULT_CATALOG_API_URL};
pub use credentials::{BearerToken, CredentialSource};
pub use models::{ArtistProfile, AudioFeatures, SiblingTrack, TrackSummary};
pub use trait_def::{CatalogClient, CatalogError};
