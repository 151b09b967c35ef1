//! Portfolio Backend
//!
//! A REST API serving a personal portfolio site: a contact form persisted to
//! MongoDB and a chat relay to a hosted completion model.

use std::future::IntoFuture;
use std::net::SocketAddr;
use std::sync::Arc;

use portfolio_backend::api;
use portfolio_backend::chat::OpenAiClient;
use portfolio_backend::config::Config;
use portfolio_backend::state::AppState;
use portfolio_backend::store::connection::{self, StartupError};
use portfolio_backend::store::StoreHandle;
use tokio::task::JoinHandle;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!("Configuration loaded: {:?}", config);

    // Connect to the document store in the background; contact requests
    // get 503 until the handle is published
    let store = StoreHandle::new();
    let connection_task = tokio::spawn(connection::run(config.database.clone(), store.clone()));

    let chat = OpenAiClient::new(&config.chat)
        .map_err(|e| anyhow::anyhow!("Failed to build completion client: {}", e))?;
    let app_state = AppState::new(store, Arc::new(chat));

    let app = api::router(app_state, &config.cors);

    // Bind to address from config
    let addr: SocketAddr = config
        .server_addr()
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid server address: {}", e))?;

    info!("🚀 Server running on http://{}", addr);
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .into_future();

    tokio::select! {
        result = server => {
            result?;
            info!("Server shutdown complete");
            Ok(())
        }
        fatal = startup_failure(connection_task) => {
            error!(error = %fatal, "Fatal startup error, shutting down");
            Err(fatal)
        }
    }
}

/// Resolves only if the connection manager fails; never resolves on success
async fn startup_failure(task: JoinHandle<Result<(), StartupError>>) -> anyhow::Error {
    match task.await {
        Ok(Ok(())) => std::future::pending().await,
        Ok(Err(e)) => e.into(),
        Err(e) => anyhow::anyhow!("Connection manager task failed: {}", e),
    }
}

/// Handle graceful shutdown signals (Ctrl+C, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
