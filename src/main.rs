use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trackinfo_server::config;
use trackinfo_server::server::{self, run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = config::DEFAULT_PORT)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = config::DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Path to the frontend directory to be statically served.
    #[clap(long)]
    pub frontend_dir_path: Option<String>,

    /// Base URL of the catalog web API.
    #[clap(long, default_value = trackinfo_server::catalog_client::DEFAULT_CATALOG_API_URL)]
    pub catalog_api_url: String,

    /// Static bearer token for the catalog API.
    #[clap(long, env = "CATALOG_TOKEN", hide_env_values = true)]
    pub catalog_token: Option<String>,

    /// Shell command printing a bearer token for the catalog API.
    #[clap(long)]
    pub catalog_token_command: Option<String>,

    /// Timeout in seconds for a single catalog request.
    #[clap(long, default_value_t = config::DEFAULT_CATALOG_TIMEOUT_SEC)]
    pub catalog_timeout_sec: u64,

    /// Number of album tracks a track is ranked against (1 to 50).
    #[clap(long, default_value_t = trackinfo_server::enrichment::MAX_ALBUM_TRACKS_LIMIT)]
    pub album_tracks_limit: u32,

    /// Market used for the artist top tracks.
    #[clap(long, default_value = trackinfo_server::enrichment::DEFAULT_TOP_TRACKS_MARKET)]
    pub market: String,

    /// Upper bound in seconds for a whole enrichment. Set to 0 to disable.
    #[clap(long, default_value_t = trackinfo_server::enrichment::DEFAULT_REQUEST_DEADLINE.as_secs())]
    pub request_deadline_sec: u64,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            frontend_dir_path: args.frontend_dir_path.clone(),
            catalog_api_url: args.catalog_api_url.clone(),
            catalog_token: args.catalog_token.clone(),
            catalog_token_command: args.catalog_token_command.clone(),
            catalog_timeout_sec: args.catalog_timeout_sec,
            album_tracks_limit: args.album_tracks_limit,
            market: args.market.clone(),
            request_deadline_sec: args.request_deadline_sec,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration:");
    info!("  port: {}", app_config.port);
    info!("  metrics_port: {}", app_config.metrics_port);
    info!("  catalog api: {}", app_config.catalog.api_url);
    info!("  catalog credentials: {:?}", app_config.catalog.credentials);

    info!("Initializing metrics...");
    server::metrics::init_metrics();

    let enricher = Arc::new(app_config.make_enricher()?);
    info!("  enrichment: {:?}", enricher.options());

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level.clone(),
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        frontend_dir_path: app_config.frontend_dir_path.clone(),
    };
    run_server(server_config, enricher).await
}
