//! Relay health endpoint

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::state::RelayState;

#[derive(Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub engine: &'static str,
    pub rooms: usize,
}

/// Liveness probe. Reports the crate version and how many rooms are open,
/// which is all the operational state the relay carries.
pub async fn status_handler(State(state): State<Arc<RelayState>>) -> Json<StatusResponse> {
    let rooms = state.rooms.read().unwrap().len();

    Json(StatusResponse {
        status: "ok",
        service: "throne-relay",
        version: env!("CARGO_PKG_VERSION"),
        engine: "rust",
        rooms,
    })
}
