//! Room lifecycle endpoints
//!
//! Rooms are addressed by 4-character codes. The creator sits as White, the
//! joiner takes the open side, and a rematch swaps the colors. Seats are
//! identified by opaque tokens handed out here; presence is whoever keeps
//! polling within the grace window.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use crate::routes::{error, parse_code};
use crate::state::{generate_code, generate_token, RelayState, Room, Seat};

/// Poll rounds before giving up (50 x 100ms = 5 seconds)
const POLL_ROUNDS: u32 = 50;

/// Create a room and seat the caller as White
pub async fn create_room(State(state): State<Arc<RelayState>>) -> (StatusCode, Json<Value>) {
    let mut rng = rand::thread_rng();
    let mut rooms = state.rooms.write().unwrap();

    // Regenerate on collision; the lock makes the check-and-insert atomic
    let code = loop {
        let candidate = generate_code(&mut rng);
        if !rooms.contains_key(&candidate) {
            break candidate;
        }
    };
    let token = generate_token(&mut rng);
    let room = Room::new(code.clone(), token.clone());
    let version = room.version;
    rooms.insert(code.clone(), room);

    tracing::info!("room {} created", code);

    (
        StatusCode::OK,
        Json(json!({
            "code": code,
            "token": token,
            "side": "white",
            "version": version,
        })),
    )
}

#[derive(Deserialize)]
pub struct JoinRequest {
    pub code: String,
}

/// Join an existing room on its open side.
///
/// The response carries the stored snapshot, so joining a room mid-match
/// (after a drop within the grace window) resumes the game in progress.
pub async fn join_room(
    State(state): State<Arc<RelayState>>,
    Json(req): Json<JoinRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(code) = parse_code(&req.code) else {
        return error(StatusCode::BAD_REQUEST, "malformed room code");
    };
    let mut rooms = state.rooms.write().unwrap();

    let Some(room) = rooms.get_mut(&code) else {
        return error(StatusCode::NOT_FOUND, "room not found");
    };
    if room.is_full() {
        return error(StatusCode::CONFLICT, "room is full");
    }

    let token = generate_token(&mut rand::thread_rng());
    let side = room.open_side();
    room.seats.push(Seat::new(token.clone(), side));
    room.bump("join");

    tracing::info!("room {}: {} seat taken", code, side);

    (
        StatusCode::OK,
        Json(json!({
            "code": code,
            "token": token,
            "side": side,
            "version": room.version,
            "state": room.state,
        })),
    )
}

#[derive(Deserialize)]
pub struct SeatRequest {
    pub code: String,
    pub token: String,
}

/// Give up a seat. The room survives while the other seat remains, so the
/// opponent can keep the code and wait for a new challenger.
pub async fn leave_room(
    State(state): State<Arc<RelayState>>,
    Json(req): Json<SeatRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(code) = parse_code(&req.code) else {
        return error(StatusCode::BAD_REQUEST, "malformed room code");
    };
    let mut rooms = state.rooms.write().unwrap();

    let Some(room) = rooms.get_mut(&code) else {
        return error(StatusCode::NOT_FOUND, "room not found");
    };
    if room.seat(&req.token).is_none() {
        return error(StatusCode::FORBIDDEN, "not seated in this room");
    }

    room.seats.retain(|s| s.token != req.token);
    if room.seats.is_empty() {
        rooms.remove(&code);
        tracing::info!("room {} closed (both seats gone)", code);
    } else {
        room.bump("leave");
        tracing::info!("room {}: seat left", code);
    }

    (StatusCode::OK, Json(json!({ "success": true })))
}

/// Ask for a rematch. Once both seats have asked, the board resets and the
/// colors swap; until then the opponent just sees the request on their poll.
pub async fn request_rematch(
    State(state): State<Arc<RelayState>>,
    Json(req): Json<SeatRequest>,
) -> (StatusCode, Json<Value>) {
    let Some(code) = parse_code(&req.code) else {
        return error(StatusCode::BAD_REQUEST, "malformed room code");
    };
    let mut rooms = state.rooms.write().unwrap();

    let Some(room) = rooms.get_mut(&code) else {
        return error(StatusCode::NOT_FOUND, "room not found");
    };
    let Some(seat) = room.seat_mut(&req.token) else {
        return error(StatusCode::FORBIDDEN, "not seated in this room");
    };
    seat.rematch_requested = true;

    let started = room.rematch_agreed();
    if started {
        room.start_rematch();
        room.bump("rematch");
        tracing::info!("room {}: rematch started, colors swapped", code);
    } else {
        room.bump("rematch-requested");
    }

    let side = room
        .seat(&req.token)
        .map(|s| s.side)
        .expect("seat checked above");

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "started": started,
            "yourSide": side,
        })),
    )
}

#[derive(Deserialize)]
pub struct PollParams {
    pub code: String,
    pub token: String,
    pub version: Option<u64>,
}

/// Long-poll for room updates.
///
/// Returns as soon as the room version moves past the client's, or after
/// 5 seconds with `changed: false`. Polling is also the heartbeat: every
/// request refreshes the seat's presence clock.
pub async fn poll_room(
    State(state): State<Arc<RelayState>>,
    Query(params): Query<PollParams>,
) -> (StatusCode, Json<Value>) {
    let Some(code) = parse_code(&params.code) else {
        return error(StatusCode::BAD_REQUEST, "malformed room code");
    };
    let client_version = params.version.unwrap_or(0);

    for _ in 0..POLL_ROUNDS {
        {
            let mut rooms = state.rooms.write().unwrap();
            let Some(room) = rooms.get_mut(&code) else {
                return error(StatusCode::NOT_FOUND, "room not found");
            };
            if room.seat(&params.token).is_none() {
                return error(StatusCode::FORBIDDEN, "not seated in this room");
            }
            room.touch(&params.token);
            if room.version != client_version {
                return room_view(room, &params.token, state.grace);
            }
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let rooms = state.rooms.read().unwrap();
    match rooms.get(&code) {
        Some(room) => (
            StatusCode::OK,
            Json(json!({ "changed": false, "version": room.version })),
        ),
        None => error(StatusCode::NOT_FOUND, "room not found"),
    }
}

/// Full room payload from one seat's point of view
fn room_view(room: &Room, token: &str, grace: Duration) -> (StatusCode, Json<Value>) {
    let your_side = room.seat(token).map(|s| s.side);
    let opponent = room.opponent_of(token);

    (
        StatusCode::OK,
        Json(json!({
            "changed": true,
            "version": room.version,
            "state": room.state,
            "yourSide": your_side,
            "opponentConnected": opponent.map(|s| s.is_connected(grace)).unwrap_or(false),
            "rematchRequestedByOpponent": opponent.map(|s| s.rematch_requested).unwrap_or(false),
            "lastEvent": room.last_event,
        })),
    )
}
