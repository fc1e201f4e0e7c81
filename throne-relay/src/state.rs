//! Relay state management
//!
//! Rooms, seats, and the version-stamped snapshots peers exchange. The relay
//! never replays rules; it stores whatever the player on turn submits and
//! hands it to the other seat.

use rand::Rng;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use throne_core::{MatchState, Side};

/// Characters allowed in room codes (no 0/O/1/I lookalikes)
pub const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of a room code
pub const CODE_LEN: usize = 4;

/// How long a silent seat stays reserved before the sweeper frees it
pub const DISCONNECT_GRACE: Duration = Duration::from_secs(30);

/// Generate a room code. Uniqueness is the caller's problem: retry under the
/// rooms lock until the code is free.
pub fn generate_code<R: Rng>(rng: &mut R) -> String {
    (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}

/// Generate a seat token, the HTTP stand-in for a socket identity
pub fn generate_token<R: Rng>(rng: &mut R) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    (0..32).map(|_| HEX[rng.gen_range(0..HEX.len())] as char).collect()
}

/// One player's seat in a room
#[derive(Clone, Debug)]
pub struct Seat {
    pub token: String,
    pub side: Side,
    pub last_seen: Instant,
    pub rematch_requested: bool,
}

impl Seat {
    pub fn new(token: String, side: Side) -> Self {
        Self {
            token,
            side,
            last_seen: Instant::now(),
            rematch_requested: false,
        }
    }

    /// A seat counts as connected while it keeps polling within the grace window
    pub fn is_connected(&self, grace: Duration) -> bool {
        self.last_seen.elapsed() < grace
    }
}

/// A relay room: up to two seats and the latest submitted snapshot
#[derive(Debug)]
pub struct Room {
    pub code: String,
    pub seats: Vec<Seat>,
    pub state: MatchState,
    pub version: u64,
    pub last_event: Option<String>,
}

impl Room {
    /// Fresh room with the creator seated as White
    pub fn new(code: String, creator_token: String) -> Self {
        Self {
            code,
            seats: vec![Seat::new(creator_token, Side::White)],
            state: MatchState::new(),
            version: 1,
            last_event: Some("create".to_string()),
        }
    }

    pub fn is_full(&self) -> bool {
        self.seats.len() >= 2
    }

    /// The side a joiner would take
    pub fn open_side(&self) -> Side {
        match self.seats.first() {
            Some(seat) => seat.side.opponent(),
            None => Side::White,
        }
    }

    pub fn seat(&self, token: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.token == token)
    }

    pub fn seat_mut(&mut self, token: &str) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.token == token)
    }

    pub fn opponent_of(&self, token: &str) -> Option<&Seat> {
        self.seats.iter().find(|s| s.token != token)
    }

    /// Refresh a seat's presence clock
    pub fn touch(&mut self, token: &str) {
        if let Some(seat) = self.seat_mut(token) {
            seat.last_seen = Instant::now();
        }
    }

    /// Record a state change so pollers wake up
    pub fn bump(&mut self, event: &str) {
        self.version += 1;
        self.last_event = Some(event.to_string());
    }

    /// Start the next match: fresh board, seats swap colors
    pub fn start_rematch(&mut self) {
        for seat in &mut self.seats {
            seat.side = seat.side.opponent();
            seat.rematch_requested = false;
        }
        self.state = MatchState::new();
    }

    pub fn rematch_agreed(&self) -> bool {
        self.is_full() && self.seats.iter().all(|s| s.rematch_requested)
    }
}

/// Relay-wide shared state
pub struct RelayState {
    pub rooms: RwLock<HashMap<String, Room>>,
    pub grace: Duration,
}

impl RelayState {
    pub fn new() -> Self {
        Self::with_grace(DISCONNECT_GRACE)
    }

    /// Override the disconnect grace (tests use a tiny window)
    pub fn with_grace(grace: Duration) -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            grace,
        }
    }

    /// Drop seats whose grace ran out, and rooms that end up empty.
    /// Returns the number of seats freed.
    pub fn sweep_idle_seats(&self) -> usize {
        let mut rooms = self.rooms.write().unwrap();
        let mut freed = 0;

        for room in rooms.values_mut() {
            let before = room.seats.len();
            room.seats.retain(|seat| seat.is_connected(self.grace));
            let dropped = before - room.seats.len();
            if dropped > 0 {
                freed += dropped;
                room.bump("leave");
                tracing::info!("room {}: {} seat(s) timed out", room.code, dropped);
            }
        }
        rooms.retain(|code, room| {
            if room.seats.is_empty() {
                tracing::info!("room {} closed (empty)", code);
                false
            } else {
                true
            }
        });

        freed
    }
}

impl Default for RelayState {
    fn default() -> Self {
        Self::new()
    }
}
