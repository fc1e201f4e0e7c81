//! Snapshot forwarding endpoints
//!
//! Clients run the rules locally and submit their whole match state after
//! acting. The relay checks exactly one thing: the stored snapshot must say
//! it is the sender's turn. It does not replay or validate moves, so peers
//! trust each other's clients.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::routes::{error, parse_code};
use crate::state::RelayState;
use throne_core::MatchState;

#[derive(Deserialize)]
pub struct SyncRequest {
    pub code: String,
    pub token: String,
    pub state: MatchState,
}

/// Submit the state after a move
pub async fn sync_move(
    State(state): State<Arc<RelayState>>,
    Json(req): Json<SyncRequest>,
) -> (StatusCode, Json<Value>) {
    forward_snapshot(&state, req, "move")
}

/// Submit the state after a sacrifice. Sacrificing keeps the turn, so the
/// sender may follow up with a move submission on the same turn.
pub async fn sync_sacrifice(
    State(state): State<Arc<RelayState>>,
    Json(req): Json<SyncRequest>,
) -> (StatusCode, Json<Value>) {
    forward_snapshot(&state, req, "sacrifice")
}

/// Turn-gated wholesale replacement of the stored snapshot
fn forward_snapshot(
    state: &RelayState,
    req: SyncRequest,
    event: &str,
) -> (StatusCode, Json<Value>) {
    let Some(code) = parse_code(&req.code) else {
        return error(StatusCode::BAD_REQUEST, "malformed room code");
    };
    let mut rooms = state.rooms.write().unwrap();

    let Some(room) = rooms.get_mut(&code) else {
        return error(StatusCode::NOT_FOUND, "room not found");
    };
    let Some(seat) = room.seat(&req.token) else {
        return error(StatusCode::FORBIDDEN, "not seated in this room");
    };
    if room.state.side_to_move != seat.side {
        return error(StatusCode::CONFLICT, "not your turn");
    }

    room.touch(&req.token);
    room.state = req.state;
    room.bump(event);

    tracing::debug!("room {}: {} accepted, version {}", code, event, room.version);

    (
        StatusCode::OK,
        Json(json!({ "success": true, "version": room.version })),
    )
}
