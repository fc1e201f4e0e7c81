//! Throne Relay - HTTP matchmaking and state forwarding
//!
//! This crate provides the online-play backend:
//! - Room lifecycle with 4-character join codes
//! - Turn-gated snapshot forwarding between the two seats
//! - Long-poll change notification with presence tracking
//! - Static file serving for the web client

mod routes;
mod state;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, services::ServeDir};

pub use state::{RelayState, CODE_ALPHABET, CODE_LEN, DISCONNECT_GRACE};

/// How often the sweeper checks for abandoned seats
const SWEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Relay configuration
#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub port: u16,
    pub static_dir: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            static_dir: "public".to_string(),
        }
    }
}

/// Create the router with all routes
pub fn create_router(config: &RelayConfig, state: Arc<RelayState>) -> Router {
    let static_service = ServeDir::new(&config.static_dir);

    Router::new()
        // Status endpoint
        .route("/api/status", get(routes::status::status_handler))
        // Room lifecycle
        .route("/api/room", post(routes::room::create_room))
        .route("/api/room/join", post(routes::room::join_room))
        .route("/api/room/leave", post(routes::room::leave_room))
        .route("/api/room/rematch", post(routes::room::request_rematch))
        .route("/api/room/poll", get(routes::room::poll_room))
        // Snapshot forwarding
        .route("/api/sync/move", post(routes::sync::sync_move))
        .route("/api/sync/sacrifice", post(routes::sync::sync_sacrifice))
        // Shared state
        .with_state(state)
        .layer(CorsLayer::permissive())
        // Static file serving (must be last)
        .fallback_service(static_service)
}

/// Spawn the background task that frees abandoned seats
pub fn spawn_sweeper(state: Arc<RelayState>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            state.sweep_idle_seats();
        }
    })
}

/// Start the HTTP relay
pub async fn run_server(config: RelayConfig) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let state = Arc::new(RelayState::new());
    let router = create_router(&config, state.clone());

    spawn_sweeper(state);

    tracing::info!("Throne relay starting on http://0.0.0.0:{}", config.port);
    tracing::info!("Static files served from: {}", config.static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
