//! Match state machine: selection, movement, sacrifices, win conditions

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, Square};
use crate::movegen::legal_moves;
use crate::pieces::{BySide, PieceKind, Side};

// ============================================================================
// ERRORS AND OUTCOMES
// ============================================================================

/// Why an action was rejected. A rejected action leaves the match untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("the match is already over")]
    MatchOver,
    #[error("no selectable piece at {0}")]
    IllegalSelection(Square),
    #[error("no piece is selected")]
    NoSelection,
    #[error("{0} is not a legal destination for the selected piece")]
    IllegalDestination(Square),
    #[error("sacrifice unavailable: {0}")]
    SacrificeUnavailable(&'static str),
    #[error("no instant kill is armed")]
    InstantKillNotArmed,
    #[error("{0} is not a valid kill target")]
    InstantKillTargetInvalid(Square),
}

/// The three one-shot sacrifices. Each side gets one per match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sacrifice {
    /// Give up a Soldier; the next Champion move grants a second move
    DoubleMove,
    /// Give up a Tower; the King cannot be captured until the owner's next turn
    KingShield,
    /// Give up a Champion; remove one enemy piece adjacent to an own piece
    InstantKill,
}

/// What a completed move did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The turn passed to the opponent
    TurnEnded,
    /// A Champion bonus move is pending; the same side moves again
    BonusMovePending,
    /// The move decided the match
    Won(Side),
}

/// What an instant kill did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KillOutcome {
    TurnEnded,
    Won(Side),
}

// ============================================================================
// MATCH STATE
// ============================================================================

/// The serializable projection of a match.
///
/// This is the unit peers exchange in networked play: a client submits its
/// whole state after acting, and the opponent adopts it wholesale. Field
/// names follow the established wire format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchState {
    pub board: Board,
    pub side_to_move: Side,
    pub sacrifice_used: BySide<bool>,
    pub king_immune: BySide<bool>,
    pub double_move_pending: BySide<bool>,
    pub instant_kill_armed: bool,
    pub game_over: bool,
    pub winner: Option<Side>,
}

impl MatchState {
    /// Standard opening position, White to move
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            side_to_move: Side::White,
            sacrifice_used: BySide::default(),
            king_immune: BySide::default(),
            double_move_pending: BySide::default(),
            instant_kill_armed: false,
            game_over: false,
            winner: None,
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

/// A cached selection: the chosen square and its legal destinations.
/// Transient presentation state, regenerated on every selection and never
/// serialized.
#[derive(Clone, Debug)]
pub struct Selection {
    pub from: Square,
    pub moves: Vec<Square>,
}

// ============================================================================
// RULE ENGINE
// ============================================================================

/// Owns a match and exposes its only mutating operations.
///
/// Every operation checks its preconditions up front and either completes
/// fully or returns an [`ActionError`] with the state unchanged.
#[derive(Clone, Debug)]
pub struct RuleEngine {
    state: MatchState,
    selection: Option<Selection>,
}

impl RuleEngine {
    /// Fresh match from the standard opening
    pub fn new() -> Self {
        Self {
            state: MatchState::new(),
            selection: None,
        }
    }

    /// Adopt an existing snapshot (a peer's submitted state, or a test position)
    pub fn from_state(state: MatchState) -> Self {
        Self {
            state,
            selection: None,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Owned copy of the current state, for serialization or submission
    pub fn snapshot(&self) -> MatchState {
        self.state.clone()
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    /// Select one of the mover's pieces and cache its legal destinations.
    ///
    /// Selecting anything else (an empty square, an enemy piece, or any
    /// square while an instant kill is armed) clears the selection and
    /// reports why.
    pub fn select_cell(&mut self, at: Square) -> Result<&[Square], ActionError> {
        self.ensure_live()?;
        if self.state.instant_kill_armed {
            return Err(ActionError::IllegalSelection(at));
        }
        if !at.in_bounds() {
            self.selection = None;
            return Err(ActionError::IllegalSelection(at));
        }
        match self.state.board.at(at) {
            Some(piece) if piece.owner == self.state.side_to_move => {
                let moves = legal_moves(&self.state.board, at, piece, &self.state.king_immune);
                let selection = self.selection.insert(Selection { from: at, moves });
                Ok(&selection.moves)
            }
            _ => {
                self.selection = None;
                Err(ActionError::IllegalSelection(at))
            }
        }
    }

    /// Move the selected piece to `to`, which must be in the cached legal set.
    ///
    /// Effects resolve in order: enemy King capture ends the match, then the
    /// piece relocates, then a King on its goal row ends the match, then a
    /// pending Champion double move keeps the turn, otherwise the turn passes.
    pub fn attempt_move(&mut self, to: Square) -> Result<MoveOutcome, ActionError> {
        self.ensure_live()?;
        let selection = self.selection.as_ref().ok_or(ActionError::NoSelection)?;
        if !selection.moves.contains(&to) {
            return Err(ActionError::IllegalDestination(to));
        }
        let from = selection.from;
        let mover = self
            .state
            .board
            .at(from)
            .expect("selected square must hold a piece");
        let side = mover.owner;

        if matches!(self.state.board.at(to), Some(target) if target.is_king()) {
            self.state.board.place(to, Some(mover));
            self.state.board.place(from, None);
            self.declare_winner(side);
            return Ok(MoveOutcome::Won(side));
        }

        self.state.board.place(to, Some(mover));
        self.state.board.place(from, None);

        if mover.is_king() && to.row == side.goal_row() {
            self.declare_winner(side);
            return Ok(MoveOutcome::Won(side));
        }

        if mover.kind == PieceKind::Champion && self.state.double_move_pending[side] {
            self.state.double_move_pending[side] = false;
            let moves = legal_moves(&self.state.board, to, mover, &self.state.king_immune);
            self.selection = Some(Selection { from: to, moves });
            return Ok(MoveOutcome::BonusMovePending);
        }

        self.end_turn();
        Ok(MoveOutcome::TurnEnded)
    }

    /// Spend the mover's one sacrifice for the match.
    ///
    /// The fuel piece is the first matching piece in row-major board order.
    /// Sacrificing does not end the turn, and it drops any cached selection
    /// since the board just changed underneath it.
    pub fn apply_sacrifice(&mut self, effect: Sacrifice) -> Result<(), ActionError> {
        self.ensure_live()?;
        if self.state.instant_kill_armed {
            return Err(ActionError::SacrificeUnavailable(
                "an instant kill is already armed",
            ));
        }
        let side = self.state.side_to_move;
        if self.state.sacrifice_used[side] {
            return Err(ActionError::SacrificeUnavailable("already used this match"));
        }
        match effect {
            Sacrifice::DoubleMove => {
                if !self.state.board.has(PieceKind::Champion, side) {
                    return Err(ActionError::SacrificeUnavailable(
                        "no champion left to take the double move",
                    ));
                }
                let fuel = self
                    .state
                    .board
                    .find(PieceKind::Soldier, side)
                    .ok_or(ActionError::SacrificeUnavailable("no soldier to give up"))?;
                self.state.board.place(fuel, None);
                self.state.double_move_pending[side] = true;
            }
            Sacrifice::KingShield => {
                let fuel = self
                    .state
                    .board
                    .find(PieceKind::Tower, side)
                    .ok_or(ActionError::SacrificeUnavailable("no tower to give up"))?;
                self.state.board.place(fuel, None);
                self.state.king_immune[side] = true;
            }
            Sacrifice::InstantKill => {
                let fuel = self
                    .state
                    .board
                    .find(PieceKind::Champion, side)
                    .ok_or(ActionError::SacrificeUnavailable("no champion to give up"))?;
                self.state.board.place(fuel, None);
                self.state.instant_kill_armed = true;
            }
        }
        self.state.sacrifice_used[side] = true;
        self.selection = None;
        Ok(())
    }

    /// While an instant kill is armed, remove an enemy piece adjacent to one
    /// of the mover's pieces. Killing the enemy King wins outright; any other
    /// kill disarms and ends the turn.
    pub fn resolve_instant_kill(&mut self, target: Square) -> Result<KillOutcome, ActionError> {
        self.ensure_live()?;
        if !self.state.instant_kill_armed {
            return Err(ActionError::InstantKillNotArmed);
        }
        let side = self.state.side_to_move;
        if !target.in_bounds() {
            return Err(ActionError::InstantKillTargetInvalid(target));
        }
        let victim = match self.state.board.at(target) {
            Some(piece) if piece.owner != side => piece,
            _ => return Err(ActionError::InstantKillTargetInvalid(target)),
        };
        let flanked = target
            .neighbors()
            .any(|sq| matches!(self.state.board.at(sq), Some(p) if p.owner == side));
        if !flanked {
            return Err(ActionError::InstantKillTargetInvalid(target));
        }

        self.state.board.place(target, None);
        if victim.is_king() {
            self.declare_winner(side);
            return Ok(KillOutcome::Won(side));
        }
        self.state.instant_kill_armed = false;
        self.end_turn();
        Ok(KillOutcome::TurnEnded)
    }

    /// Start over: standard opening, White to move, all modifiers cleared
    pub fn reset(&mut self) {
        self.state = MatchState::new();
        self.selection = None;
    }

    /// Replace the whole state with a peer's snapshot. The snapshot is
    /// adopted verbatim; only the transient selection drops.
    pub fn restore(&mut self, snapshot: MatchState) {
        self.state = snapshot;
        self.selection = None;
    }

    fn ensure_live(&self) -> Result<(), ActionError> {
        if self.state.game_over {
            Err(ActionError::MatchOver)
        } else {
            Ok(())
        }
    }

    fn declare_winner(&mut self, side: Side) {
        self.state.game_over = true;
        self.state.winner = Some(side);
        self.selection = None;
    }

    /// Pass the turn. The incoming side's King immunity expires now, so a
    /// shield always covers exactly one enemy turn.
    fn end_turn(&mut self) {
        self.selection = None;
        self.state.side_to_move = self.state.side_to_move.opponent();
        self.state.king_immune[self.state.side_to_move] = false;
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}
