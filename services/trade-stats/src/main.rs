//! Trade-stats service - Main Entry Point

use anyhow::Result;
use clap::{Arg, Command};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trade_stats_service::{StatsConfig, start_server};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trade_stats_service=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let matches = Command::new("trade-stats-service")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Daily trade counters with rolling 7/30-day public aggregates")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("trade-stats.toml"),
        )
        .arg(
            Arg::new("routes")
                .long("routes")
                .help("Print available routes and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    if matches.get_flag("routes") {
        trade_stats_service::server::print_routes();
        return Ok(());
    }

    // Load configuration
    let default_config = "trade-stats.toml".to_string();
    let config_path = matches
        .get_one::<String>("config")
        .unwrap_or(&default_config);
    let config = match StatsConfig::from_file(config_path) {
        Ok(config) => {
            info!("Loaded configuration from: {}", config_path);
            config
        }
        Err(e) => {
            error!("Failed to load config from {}: {}", config_path, e);
            info!("Using default configuration");
            StatsConfig::default()
        }
    };

    // Print startup information
    info!(
        "Starting trade-stats service v{}",
        env!("CARGO_PKG_VERSION")
    );
    info!("Server will bind to: {}", config.server_address());
    info!("Counter store: {}", config.redis.url);
    info!(
        "Rate limiting: {} ({} req/min per client)",
        config.rate_limiting.enabled, config.rate_limiting.requests_per_minute
    );

    // Start the server
    if let Err(e) = start_server(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}
