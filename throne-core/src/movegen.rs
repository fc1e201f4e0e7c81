//! Legal destination generation for each piece kind

use crate::board::{Board, Square, DIRECTIONS, ORTHOGONALS};
use crate::pieces::{BySide, Piece, PieceKind, Side};

/// How far a Champion may travel along a line
pub const CHAMPION_RANGE: u8 = 2;

/// How far a Tower may travel along a line
pub const TOWER_RANGE: u8 = 3;

/// Legal destinations for a piece standing on `from`, in generation order.
///
/// `shields` carries each side's King immunity: an immune King is never a
/// capture target, but it still blocks lines like any other piece.
pub fn legal_moves(
    board: &Board,
    from: Square,
    piece: Piece,
    shields: &BySide<bool>,
) -> Vec<Square> {
    let mut moves = Vec::new();
    match piece.kind {
        PieceKind::King => {
            for &(dr, dc) in &DIRECTIONS {
                admit(board, from.offset(dr, dc), piece.owner, shields, &mut moves);
            }
        }
        PieceKind::Champion => {
            walk_lines(board, from, piece.owner, &DIRECTIONS, CHAMPION_RANGE, shields, &mut moves);
        }
        PieceKind::Tower => {
            walk_lines(board, from, piece.owner, &ORTHOGONALS, TOWER_RANGE, shields, &mut moves);
        }
        PieceKind::Soldier => {
            admit(board, from.offset(piece.owner.forward(), 0), piece.owner, shields, &mut moves);
            admit(board, from.offset(0, -1), piece.owner, shields, &mut moves);
            admit(board, from.offset(0, 1), piece.owner, shields, &mut moves);
        }
    }
    moves
}

/// Walk each direction up to `range` steps, stopping at the first occupied
/// square (which is admitted if capturable).
fn walk_lines(
    board: &Board,
    from: Square,
    mover: Side,
    directions: &[(i8, i8)],
    range: u8,
    shields: &BySide<bool>,
    out: &mut Vec<Square>,
) {
    for &(dr, dc) in directions {
        let mut current = from;
        for _ in 0..range {
            current = current.offset(dr, dc);
            if !admit(board, current, mover, shields, out) {
                break;
            }
        }
    }
}

/// Shared admission rule: push `to` if it is a legal destination for `mover`.
///
/// Returns whether a line may continue past `to`. Only an in-bounds empty
/// square keeps a line open; a captured enemy is admitted but ends the line,
/// and an immune enemy King ends the line without being admitted.
fn admit(
    board: &Board,
    to: Square,
    mover: Side,
    shields: &BySide<bool>,
    out: &mut Vec<Square>,
) -> bool {
    if !to.in_bounds() {
        return false;
    }
    match board.at(to) {
        None => {
            out.push(to);
            true
        }
        Some(target) if target.owner == mover => false,
        Some(target) => {
            if !(target.is_king() && shields[target.owner]) {
                out.push(to);
            }
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: i8, col: i8) -> Square {
        Square::new(row, col)
    }

    fn moves_on(board: &Board, from: Square) -> Vec<Square> {
        let piece = board.at(from).unwrap();
        legal_moves(board, from, piece, &BySide::default())
    }

    #[test]
    fn test_king_steps_one_in_all_directions() {
        let mut board = Board::empty();
        board.place(sq(2, 2), Some(Piece::new(PieceKind::King, Side::White)));
        let moves = moves_on(&board, sq(2, 2));
        assert_eq!(moves.len(), 8);
        assert!(moves.contains(&sq(1, 1)));
        assert!(moves.contains(&sq(3, 3)));
        assert!(!moves.contains(&sq(0, 2)));
    }

    #[test]
    fn test_king_clipped_at_corner() {
        let mut board = Board::empty();
        board.place(sq(0, 0), Some(Piece::new(PieceKind::King, Side::Black)));
        assert_eq!(moves_on(&board, sq(0, 0)).len(), 3);
    }

    #[test]
    fn test_champion_two_steps_all_directions() {
        let mut board = Board::empty();
        board.place(sq(2, 2), Some(Piece::new(PieceKind::Champion, Side::White)));
        let moves = moves_on(&board, sq(2, 2));
        // 8 directions, 2 steps each, all in bounds from the center
        assert_eq!(moves.len(), 16);
        assert!(moves.contains(&sq(0, 0)));
        assert!(moves.contains(&sq(4, 4)));
        assert!(moves.contains(&sq(2, 0)));
    }

    #[test]
    fn test_tower_three_steps_orthogonal_only() {
        let mut board = Board::empty();
        board.place(sq(4, 0), Some(Piece::new(PieceKind::Tower, Side::White)));
        let moves = moves_on(&board, sq(4, 0));
        assert_eq!(moves.len(), 6);
        assert!(moves.contains(&sq(1, 0)));
        assert!(moves.contains(&sq(4, 3)));
        assert!(!moves.contains(&sq(0, 0)), "tower range is three");
        assert!(!moves.contains(&sq(3, 1)), "tower never moves diagonally");
    }

    #[test]
    fn test_line_stops_at_first_occupied_square() {
        let mut board = Board::empty();
        board.place(sq(2, 0), Some(Piece::new(PieceKind::Tower, Side::White)));
        board.place(sq(2, 2), Some(Piece::new(PieceKind::Soldier, Side::Black)));
        board.place(sq(2, 3), Some(Piece::new(PieceKind::Soldier, Side::Black)));
        let moves = moves_on(&board, sq(2, 0));
        assert!(moves.contains(&sq(2, 1)));
        assert!(moves.contains(&sq(2, 2)), "first enemy on the line is capturable");
        assert!(!moves.contains(&sq(2, 3)), "line ends at the first occupied square");
    }

    #[test]
    fn test_own_piece_blocks_without_being_a_target() {
        let mut board = Board::empty();
        board.place(sq(2, 0), Some(Piece::new(PieceKind::Tower, Side::White)));
        board.place(sq(2, 1), Some(Piece::new(PieceKind::Soldier, Side::White)));
        let moves = moves_on(&board, sq(2, 0));
        assert!(!moves.contains(&sq(2, 1)));
        assert!(!moves.contains(&sq(2, 2)));
    }

    #[test]
    fn test_soldier_candidates_per_side() {
        let mut board = Board::empty();
        board.place(sq(2, 2), Some(Piece::new(PieceKind::Soldier, Side::White)));
        board.place(sq(1, 1), Some(Piece::new(PieceKind::Soldier, Side::Black)));

        let white = moves_on(&board, sq(2, 2));
        assert_eq!(white, vec![sq(1, 2), sq(2, 1), sq(2, 3)]);

        let black = moves_on(&board, sq(1, 1));
        assert_eq!(black, vec![sq(2, 1), sq(1, 0), sq(1, 2)]);
    }

    #[test]
    fn test_soldier_never_moves_backward() {
        let mut board = Board::empty();
        board.place(sq(2, 2), Some(Piece::new(PieceKind::Soldier, Side::White)));
        let moves = moves_on(&board, sq(2, 2));
        assert!(!moves.contains(&sq(3, 2)));
    }

    #[test]
    fn test_immune_king_blocks_but_cannot_be_taken() {
        let mut board = Board::empty();
        board.place(sq(2, 0), Some(Piece::new(PieceKind::Tower, Side::White)));
        board.place(sq(2, 2), Some(Piece::new(PieceKind::King, Side::Black)));
        let shields = BySide::new(false, true);

        let piece = board.at(sq(2, 0)).unwrap();
        let moves = legal_moves(&board, sq(2, 0), piece, &shields);
        assert!(moves.contains(&sq(2, 1)));
        assert!(!moves.contains(&sq(2, 2)), "immune king is not a target");
        assert!(!moves.contains(&sq(2, 3)), "immune king still blocks the line");

        // Without the shield the same capture is generated
        let moves = legal_moves(&board, sq(2, 0), piece, &BySide::default());
        assert!(moves.contains(&sq(2, 2)));
    }
}
