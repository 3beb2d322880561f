//! Main server module - Axum setup and router configuration

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use userauth_core::{CredentialStore, Seeder};

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health))
        .route("/ready", get(routes::ready))
        .route("/verify", post(routes::verify))
        .route("/seed", get(routes::seed))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server with the given configuration
pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    info!(
        path = %config.db_path.display(),
        read_only = config.read_only,
        "opening credential store"
    );
    let store = CredentialStore::open(&config.db_path, config.read_only)?;
    let seeder = Seeder::new(&config.db_path, config.read_only);
    let state = AppState::new(store, seeder, config.seed_count);

    let app = build_router(state.clone());

    let addr: SocketAddr = format!("{}:{}", config.bind, config.port).parse()?;
    info!("starting userauth-server on http://{}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // In-flight requests racing this may fail with a storage error; idle
    // handles are closed here, handles still out close when dropped.
    state.store().pool().drain();
    info!("server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
