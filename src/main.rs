use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use coastcast::{ForecastConfig, logging, web};

/// Weather aggregation service combining geocoding, atmospheric and marine forecasts
#[derive(Parser, Debug)]
#[command(name = "coastcast", version)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long, env = "FORECAST_CONFIG")]
    config: Option<PathBuf>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ForecastConfig::load_from_path(args.config)?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    logging::init(&config.logging)?;
    tracing::info!(
        version = coastcast::VERSION,
        timeout_seconds = config.upstream.timeout_seconds,
        "Starting forecast service"
    );

    web::run(&config).await
}
