use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use htr_core::{
    load_config, validate_config, HttpFetcher, ImageFetcher, ImageMagickNormalizer,
    LaiaRecognizer, Normalizer, RecognitionPipeline, Recognizer,
};
use htr_server::api::create_router;
use htr_server::state::AppState;

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting htr-daemon v{}", VERSION);

    // Determine config path
    let config_path = std::env::var("HTR_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Data directory: {:?}", config.storage.data_dir);
    info!("Model: {:?}", config.recognizer.model_path);
    info!("Symbols table: {:?}", config.recognizer.symbols_path);

    // Create collaborators
    let fetcher = HttpFetcher::new(&config.fetcher).context("Failed to create HTTP client")?;
    info!("Using fetcher: {}", fetcher.name());

    let normalizer = ImageMagickNormalizer::new(config.normalizer.clone());
    normalizer
        .validate()
        .await
        .with_context(|| format!("Image resizer unavailable: {:?}", config.normalizer.convert_path))?;
    info!("Using normalizer: {}", normalizer.name());

    let recognizer = LaiaRecognizer::new(config.recognizer.clone());
    recognizer
        .validate()
        .await
        .with_context(|| format!("Recognizer unavailable: {:?}", config.recognizer.laia_path))?;
    info!("Using recognizer: {}", recognizer.name());

    let pipeline = Arc::new(RecognitionPipeline::new(
        config.pipeline_config(),
        Arc::new(fetcher),
        Arc::new(normalizer),
        Arc::new(recognizer),
    ));

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), pipeline));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
