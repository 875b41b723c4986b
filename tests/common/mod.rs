//! Common test infrastructure
//!
//! This module provides all the infrastructure needed for end-to-end tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{track_url, TestClient, TestServer, TRACK_ID};
//! use reqwest::StatusCode;
//!
//! #[tokio::test]
//! async fn test_enrich() {
//!     let server = TestServer::spawn().await;
//!     let client = TestClient::new(server.base_url.clone());
//!
//!     let response = client.enrich_url(&track_url(TRACK_ID)).await;
//!     assert_eq!(response.status(), StatusCode::OK);
//! }
//! ```

mod constants;
mod fake_catalog;
mod server;

// Public API - this is what tests import
pub use client::TestClient;
pub use constants::*;
pub use server::TestServer;
