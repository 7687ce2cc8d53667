//! content-service binary
//!
//! Startup order: load config, reseed the dataset (discarding the previous
//! run's data), then serve.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::http::HeaderValue;
use clap::Parser;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use content_service::config::Config;
use content_service::store::JsonFileStore;
use content_service::{cors_layer, router, seed, AppState};

#[derive(Parser, Debug)]
#[command(name = "content-service")]
#[command(about = "Users and posts API with a per-request XSS trust toggle")]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = 5000, env = "CONTENT_PORT")]
    port: u16,

    /// Address to bind to
    #[arg(long, default_value = "127.0.0.1", env = "CONTENT_BIND")]
    bind: String,

    /// Directory holding config.json and the dataset file
    #[arg(long, default_value = "./data", env = "CONTENT_CONFIG_PATH")]
    config_path: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "content_service=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config_path)?;
    let origin = HeaderValue::from_str(&config.allowed_origin)
        .with_context(|| format!("Invalid allowed_origin: {}", config.allowed_origin))?;

    // Reset the dataset to the baseline before accepting traffic
    let store = JsonFileStore::new(config.database_path(&cli.config_path));
    seed::run(&store).with_context(|| format!("Failed to seed {:?}", store.path()))?;

    let state = Arc::new(AppState::new(store));
    let app = router(state).layer(cors_layer(origin));

    // Parse bind address
    let addr: SocketAddr = format!("{}:{}", cli.bind, cli.port).parse()?;

    tracing::info!("Starting content-service on http://{}/", addr);
    tracing::info!("Allowed origin: {}", config.allowed_origin);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Content service shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
