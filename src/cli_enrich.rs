//! Enriches a single track URL from the command line and prints the result
//! as JSON. Uses the same catalog settings as the server.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use trackinfo_server::catalog_client::DEFAULT_CATALOG_API_URL;
use trackinfo_server::config::{self, AppConfig, CliConfig, FileConfig};
use trackinfo_server::enrichment::{DEFAULT_TOP_TRACKS_MARKET, MAX_ALBUM_TRACKS_LIMIT};

#[derive(Parser, Debug)]
#[command(name = "cli-enrich", about = "Print the enriched record of a catalog track")]
struct CliArgs {
    /// Track URL, e.g. https://open.spotify.com/track/<id>
    pub url: String,

    /// Path to the server TOML configuration file.
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Base URL of the catalog web API.
    #[clap(long, default_value = DEFAULT_CATALOG_API_URL)]
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

    /// Number of album tracks the track is ranked against (1 to 50).
    #[clap(long, default_value_t = MAX_ALBUM_TRACKS_LIMIT)]
    pub album_tracks_limit: u32,

    /// Market used for the artist top tracks.
    #[clap(long, default_value = DEFAULT_TOP_TRACKS_MARKET)]
    pub market: String,

    /// Print the record on a single line.
    #[clap(long)]
    pub compact: bool,
}

impl From<&CliArgs> for CliConfig {
    fn from(args: &CliArgs) -> Self {
        CliConfig {
            catalog_api_url: args.catalog_api_url.clone(),
            catalog_token: args.catalog_token.clone(),
            catalog_token_command: args.catalog_token_command.clone(),
            catalog_timeout_sec: args.catalog_timeout_sec,
            album_tracks_limit: args.album_tracks_limit,
            market: args.market.clone(),
            ..Default::default()
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    // Logs go to stderr so stdout only carries the JSON record
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config: CliConfig = (&cli_args).into();
    let app_config = AppConfig::resolve(&cli_config, file_config)?;
    let enricher = app_config.make_enricher()?;

    let track = enricher
        .enrich_url(&cli_args.url)
        .await
        .with_context(|| format!("Failed to enrich {}", cli_args.url))?;

    let output = if cli_args.compact {
        serde_json::to_string(&track)?
    } else {
        serde_json::to_string_pretty(&track)?
    };
    println!("{}", output);
    Ok(())
}
