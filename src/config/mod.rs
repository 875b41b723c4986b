mod file_config;

pub use file_config::{CatalogConfig, EnrichmentConfig, FileConfig};

use crate::catalog_client::{CredentialSource, HttpCatalogClient, DEFAULT_CATALOG_API_URL};
use crate::enrichment::{
    EnrichmentOptions, TrackEnricher, DEFAULT_REQUEST_DEADLINE, DEFAULT_TOP_TRACKS_MARKET,
    MAX_ALBUM_TRACKS_LIMIT,
};
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_METRICS_PORT: u16 = 9091;
pub const DEFAULT_CATALOG_TIMEOUT_SEC: u64 = 30;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,
    pub catalog_api_url: String,
    pub catalog_token: Option<String>,
    pub catalog_token_command: Option<String>,
    pub catalog_timeout_sec: u64,
    pub album_tracks_limit: u32,
    pub market: String,
    pub request_deadline_sec: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            metrics_port: DEFAULT_METRICS_PORT,
            logging_level: RequestsLoggingLevel::default(),
            frontend_dir_path: None,
            catalog_api_url: DEFAULT_CATALOG_API_URL.to_string(),
            catalog_token: None,
            catalog_token_command: None,
            catalog_timeout_sec: DEFAULT_CATALOG_TIMEOUT_SEC,
            album_tracks_limit: MAX_ALBUM_TRACKS_LIMIT,
            market: DEFAULT_TOP_TRACKS_MARKET.to_string(),
            request_deadline_sec: DEFAULT_REQUEST_DEADLINE.as_secs(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    // Core settings
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub frontend_dir_path: Option<String>,

    // Feature configs
    pub catalog: CatalogSettings,
    pub enrichment: EnrichmentOptions,
}

#[derive(Debug, Clone)]
pub struct CatalogSettings {
    pub api_url: String,
    pub credentials: CredentialSource,
    pub timeout_sec: u64,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        // Catalog settings
        let catalog_file = file.catalog.unwrap_or_default();
        let api_url = catalog_file
            .api_url
            .clone()
            .unwrap_or_else(|| cli.catalog_api_url.clone());
        if api_url.trim().is_empty() {
            bail!("Catalog API URL must not be empty");
        }
        let credentials = resolve_credentials(cli, &catalog_file)?;
        let timeout_sec = catalog_file.timeout_sec.unwrap_or(cli.catalog_timeout_sec);
        if timeout_sec == 0 {
            bail!("Catalog timeout must be at least 1 second");
        }

        // Enrichment settings
        let enrichment_file = file.enrichment.unwrap_or_default();
        let album_tracks_limit = enrichment_file
            .album_tracks_limit
            .unwrap_or(cli.album_tracks_limit);
        if album_tracks_limit == 0 || album_tracks_limit > MAX_ALBUM_TRACKS_LIMIT {
            bail!(
                "album_tracks_limit must be between 1 and {}, got {}",
                MAX_ALBUM_TRACKS_LIMIT,
                album_tracks_limit
            );
        }
        let market = enrichment_file
            .market
            .unwrap_or_else(|| cli.market.clone())
            .trim()
            .to_string();
        if market.is_empty() {
            bail!("market must not be empty");
        }
        let request_deadline_sec = enrichment_file
            .request_deadline_sec
            .unwrap_or(cli.request_deadline_sec);
        let deadline = match request_deadline_sec {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        };

        Ok(Self {
            port,
            metrics_port,
            logging_level,
            frontend_dir_path,
            catalog: CatalogSettings {
                api_url,
                credentials,
                timeout_sec,
            },
            enrichment: EnrichmentOptions {
                album_tracks_limit,
                market,
                deadline,
            },
        })
    }

    /// Builds the HTTP catalog client and the enricher on top of it.
    pub fn make_enricher(&self) -> Result<TrackEnricher> {
        let client = HttpCatalogClient::new(
            self.catalog.api_url.clone(),
            self.catalog.timeout_sec,
            self.catalog.credentials.clone(),
        )?;
        Ok(TrackEnricher::new(
            Arc::new(client),
            self.enrichment.clone(),
        ))
    }
}

/// The TOML `[catalog]` credential, when present, replaces the CLI one.
fn resolve_credentials(cli: &CliConfig, file: &CatalogConfig) -> Result<CredentialSource> {
    if file.token.is_some() || file.token_command.is_some() {
        return credential_source(file.token.clone(), file.token_command.clone(), "config file");
    }
    credential_source(
        cli.catalog_token.clone(),
        cli.catalog_token_command.clone(),
        "command line",
    )
}

fn credential_source(
    token: Option<String>,
    command: Option<String>,
    origin: &str,
) -> Result<CredentialSource> {
    match (token, command) {
        (Some(_), Some(_)) => bail!(
            "Only one of catalog token and token command can be given ({})",
            origin
        ),
        (Some(token), None) => Ok(CredentialSource::Static(token)),
        (None, Some(command)) => Ok(CredentialSource::Command(command)),
        (None, None) => bail!(
            "A catalog credential must be specified via --catalog-token, \
             --catalog-token-command or in the [catalog] section of the config file"
        ),
    }
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
