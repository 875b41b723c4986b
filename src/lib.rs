//! Track enrichment server library.
//!
//! Resolves a catalog track URL into a single record combining the track,
//! its audio features, its popularity rank within the album and within the
//! artist's top tracks, and the artist's primary genre.

pub mod catalog_client;
pub mod config;
pub mod enrichment;
pub mod server;

pub use catalog_client::{CatalogClient, CatalogError, CredentialSource, HttpCatalogClient};
pub use config::{AppConfig, CliConfig, FileConfig};
pub use enrichment::{EnrichError, EnrichedTrack, EnrichmentOptions, TrackEnricher, TrackId};
pub use server::{make_app, run_server, RequestsLoggingLevel, ServerConfig};
