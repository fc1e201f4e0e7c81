//! Integration tests for the Throne stack
//!
//! Drives complete matches through the engine the way the hot-seat loop
//! does: select, move, sacrifice, and win, from the standard opening.

use throne_core::{
    BySide, KillOutcome, MatchState, MoveOutcome, PieceKind, RuleEngine, Sacrifice, Side, Square,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn sq(row: i8, col: i8) -> Square {
    Square::new(row, col)
}

/// Select-then-move as one step, asserting both succeed
fn play(engine: &mut RuleEngine, from: Square, to: Square) -> MoveOutcome {
    engine
        .select_cell(from)
        .unwrap_or_else(|e| panic!("select {} failed: {}", from, e));
    engine
        .attempt_move(to)
        .unwrap_or_else(|e| panic!("move {} -> {} failed: {}", from, to, e))
}

// ============================================================================
// FULL MATCH: PLAIN MOVEMENT
// ============================================================================

#[test]
fn test_full_match_to_king_capture() {
    let mut engine = RuleEngine::new();

    // White marches the champion across and takes the king on move three
    assert_eq!(play(&mut engine, sq(4, 3), sq(2, 3)), MoveOutcome::TurnEnded);
    assert_eq!(play(&mut engine, sq(0, 0), sq(1, 0)), MoveOutcome::TurnEnded);
    assert_eq!(play(&mut engine, sq(2, 3), sq(1, 2)), MoveOutcome::TurnEnded);
    assert_eq!(play(&mut engine, sq(1, 0), sq(2, 0)), MoveOutcome::TurnEnded);
    assert_eq!(
        play(&mut engine, sq(1, 2), sq(0, 2)),
        MoveOutcome::Won(Side::White)
    );

    assert!(engine.state().game_over);
    assert_eq!(engine.state().winner, Some(Side::White));
    assert!(!engine.state().board.has(PieceKind::King, Side::Black));

    // Nothing moves after the end
    assert!(engine.select_cell(sq(2, 0)).is_err());
}

// ============================================================================
// FULL MATCH: SACRIFICES
// ============================================================================

#[test]
fn test_full_match_with_sacrifices() {
    let mut engine = RuleEngine::new();

    // White buys a double move with the a1 soldier
    engine.apply_sacrifice(Sacrifice::DoubleMove).unwrap();
    assert!(engine.state().board.at(sq(4, 0)).is_none());
    assert_eq!(play(&mut engine, sq(4, 3), sq(2, 3)), MoveOutcome::BonusMovePending);
    assert_eq!(engine.side_to_move(), Side::White);
    assert_eq!(engine.attempt_move(sq(2, 1)), Ok(MoveOutcome::TurnEnded));

    // Black shields its king with the tower
    engine.apply_sacrifice(Sacrifice::KingShield).unwrap();
    assert!(engine.state().board.at(sq(0, 3)).is_none());
    assert!(engine.state().king_immune[Side::Black]);
    assert_eq!(play(&mut engine, sq(0, 4), sq(1, 4)), MoveOutcome::TurnEnded);

    // White trades into the champion; the shield holds through this turn
    assert!(engine.state().king_immune[Side::Black]);
    assert_eq!(play(&mut engine, sq(2, 1), sq(0, 1)), MoveOutcome::TurnEnded);

    // Black's turn starts and the shield expires
    assert!(!engine.state().king_immune[Side::Black]);
    assert_eq!(play(&mut engine, sq(0, 2), sq(0, 3)), MoveOutcome::TurnEnded);

    // The unshielded king falls
    assert_eq!(
        play(&mut engine, sq(0, 1), sq(0, 3)),
        MoveOutcome::Won(Side::White)
    );
    assert!(engine.state().sacrifice_used[Side::White]);
    assert!(engine.state().sacrifice_used[Side::Black]);
}

#[test]
fn test_full_match_with_instant_kill() {
    let mut engine = RuleEngine::new();

    // Open lines until a white piece flanks a black one
    assert_eq!(play(&mut engine, sq(4, 0), sq(3, 0)), MoveOutcome::TurnEnded);
    assert_eq!(play(&mut engine, sq(0, 0), sq(1, 0)), MoveOutcome::TurnEnded);
    assert_eq!(play(&mut engine, sq(3, 0), sq(2, 0)), MoveOutcome::TurnEnded);
    assert_eq!(play(&mut engine, sq(0, 4), sq(1, 4)), MoveOutcome::TurnEnded);

    // White burns the champion to snipe the soldier flanked at (1,0)
    engine.apply_sacrifice(Sacrifice::InstantKill).unwrap();
    assert!(engine.state().instant_kill_armed);
    assert_eq!(
        engine.resolve_instant_kill(sq(1, 0)),
        Ok(KillOutcome::TurnEnded)
    );
    assert!(engine.state().board.at(sq(1, 0)).is_none());
    assert!(!engine.state().instant_kill_armed);
    assert_eq!(engine.side_to_move(), Side::Black);
}

// ============================================================================
// SNAPSHOT HANDOFF (what networked clients exchange)
// ============================================================================

#[test]
fn test_match_continues_across_snapshot_round_trip() {
    let mut engine = RuleEngine::new();
    assert_eq!(play(&mut engine, sq(4, 4), sq(3, 4)), MoveOutcome::TurnEnded);
    engine.apply_sacrifice(Sacrifice::KingShield).unwrap();
    assert_eq!(play(&mut engine, sq(0, 0), sq(1, 0)), MoveOutcome::TurnEnded);

    // Serialize at the turn boundary and resume on a fresh engine,
    // the way one client hands the match to the other
    let json = engine.state().to_json().unwrap();
    let mut resumed = RuleEngine::from_state(MatchState::from_json(&json).unwrap());
    assert_eq!(resumed.state(), engine.state());
    assert_eq!(resumed.side_to_move(), Side::White);
    assert_eq!(
        resumed.state().king_immune,
        BySide::new(false, true),
        "black's shield must survive the handoff"
    );

    assert_eq!(play(&mut resumed, sq(4, 3), sq(3, 3)), MoveOutcome::TurnEnded);
    // Black's next turn begins, so its shield just expired
    assert!(!resumed.state().king_immune[Side::Black]);
    assert_eq!(play(&mut resumed, sq(1, 0), sq(2, 0)), MoveOutcome::TurnEnded);
}
