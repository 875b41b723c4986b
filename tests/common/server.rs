//! Test server lifecycle management
//!
//! Each test gets its own fake catalog and its own enrichment server wired
//! to it through the real HTTP catalog client.

use super::constants::*;
use super::fake_catalog::FakeCatalog;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use trackinfo_server::catalog_client::{CredentialSource, HttpCatalogClient};
use trackinfo_server::enrichment::{EnrichmentOptions, TrackEnricher};
use trackinfo_server::server::{make_app, RequestsLoggingLevel, ServerConfig};

/// Test server instance with its own fake catalog
///
/// When dropped, both servers shut down.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The port the server is listening on
    pub port: u16,

    /// The catalog the server talks to, for inspecting upstream requests
    pub catalog: FakeCatalog,

    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a server with default enrichment options and a valid token
    pub async fn spawn() -> Self {
        Self::spawn_with(
            EnrichmentOptions::default(),
            CredentialSource::Static(TEST_TOKEN.to_string()),
        )
        .await
    }

    pub async fn spawn_with_options(options: EnrichmentOptions) -> Self {
        Self::spawn_with(options, CredentialSource::Static(TEST_TOKEN.to_string())).await
    }

    pub async fn spawn_with_credentials(credentials: CredentialSource) -> Self {
        Self::spawn_with(EnrichmentOptions::default(), credentials).await
    }

    /// # Panics
    ///
    /// Panics if either server fails to bind or doesn't become ready in time.
    pub async fn spawn_with(options: EnrichmentOptions, credentials: CredentialSource) -> Self {
        let catalog = FakeCatalog::spawn().await;

        let client = HttpCatalogClient::new(catalog.base_url.clone(), 5, credentials)
            .expect("Failed to create catalog client");
        let enricher = Arc::new(TrackEnricher::new(Arc::new(client), options));

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");

        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();

        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            ..Default::default()
        };
        let app = make_app(config, enricher);

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            port,
            catalog,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the home endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
