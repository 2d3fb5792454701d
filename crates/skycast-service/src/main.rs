//! Skycast Service - Weather lookup HTTP API.
//!
//! Run with: `cargo run -p skycast-service`

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use skycast_provider::OpenWeatherClient;
use skycast_service::{AppState, Config, api};
use skycast_store::Store;

/// Skycast Service - Weather lookup HTTP REST API.
#[derive(Parser, Debug)]
#[command(name = "skycast-service")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides config).
    #[arg(short, long)]
    bind: Option<String>,

    /// Database path (overrides config).
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// OpenWeatherMap API key (overrides config and environment).
    #[arg(long)]
    api_key: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skycast_service=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Load configuration
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default().unwrap_or_default(),
    };

    // Override config with environment, then CLI args
    if let Ok(key) = std::env::var("OPENWEATHER_API_KEY")
        && !key.is_empty()
    {
        config.weather.api_key = key;
    }
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if let Some(db_path) = args.database {
        config.storage.path = db_path;
    }
    if let Some(api_key) = args.api_key {
        config.weather.api_key = api_key;
    }

    config.validate()?;

    // Open the database
    let store = Store::open(&config.storage.path)?;

    // Build the weather provider client
    let weather = OpenWeatherClient::new(config.weather.provider())?;

    // Create application state
    let state = AppState::new(store, weather);

    // Build the router
    let app = api::router()
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse()?;

    info!("Starting server on {}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
