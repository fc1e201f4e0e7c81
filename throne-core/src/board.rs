//! Board geometry and the 5x5 grid

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pieces::{Piece, PieceKind, Side};

/// Number of rows and columns
pub const BOARD_SIZE: i8 = 5;

/// A board coordinate (row 0 is Black's home rank)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: i8,
    pub col: i8,
}

impl Square {
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Check if this square is on the board
    pub fn in_bounds(&self) -> bool {
        self.row >= 0 && self.row < BOARD_SIZE && self.col >= 0 && self.col < BOARD_SIZE
    }

    /// Step by a row/column delta (no bounds check)
    pub fn offset(&self, dr: i8, dc: i8) -> Square {
        Square::new(self.row + dr, self.col + dc)
    }

    /// In-bounds squares at Chebyshev distance 1
    pub fn neighbors(&self) -> impl Iterator<Item = Square> + '_ {
        DIRECTIONS
            .iter()
            .map(move |&(dr, dc)| self.offset(dr, dc))
            .filter(Square::in_bounds)
    }
}

impl fmt::Display for Square {
    /// Algebraic notation: files a-e left to right, ranks 1-5 from White's
    /// home row upward, so "a1" is White's left corner.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.in_bounds() {
            let file = (b'a' + self.col as u8) as char;
            write!(f, "{}{}", file, BOARD_SIZE - self.row)
        } else {
            write!(f, "({}, {})", self.row, self.col)
        }
    }
}

/// All eight direction vectors (dr, dc)
pub const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The four orthogonal direction vectors (dr, dc)
pub const ORTHOGONALS: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Back-rank layout, White's left to right
const WHITE_HOME_RANK: [PieceKind; 5] = [
    PieceKind::Soldier,
    PieceKind::Tower,
    PieceKind::King,
    PieceKind::Champion,
    PieceKind::Soldier,
];

/// Back-rank layout, Black's (mirrored so the kings face each other)
const BLACK_HOME_RANK: [PieceKind; 5] = [
    PieceKind::Soldier,
    PieceKind::Champion,
    PieceKind::King,
    PieceKind::Tower,
    PieceKind::Soldier,
];

/// The playing field: a fixed 5x5 grid of optional pieces.
///
/// Serializes as the bare nested array the clients exchange. Accessors do
/// not bounds-check; callers validate squares before touching cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board {
    cells: [[Option<Piece>; 5]; 5],
}

impl Board {
    /// A board with no pieces
    pub fn empty() -> Self {
        Self {
            cells: [[None; 5]; 5],
        }
    }

    /// The standard opening layout
    pub fn standard() -> Self {
        let mut board = Self::empty();
        for (col, &kind) in BLACK_HOME_RANK.iter().enumerate() {
            let sq = Square::new(Side::Black.home_row(), col as i8);
            board.place(sq, Some(Piece::new(kind, Side::Black)));
        }
        for (col, &kind) in WHITE_HOME_RANK.iter().enumerate() {
            let sq = Square::new(Side::White.home_row(), col as i8);
            board.place(sq, Some(Piece::new(kind, Side::White)));
        }
        board
    }

    /// Piece at a square
    pub fn at(&self, sq: Square) -> Option<Piece> {
        self.cells[sq.row as usize][sq.col as usize]
    }

    /// Put a piece on a square, or clear it with `None`
    pub fn place(&mut self, sq: Square, cell: Option<Piece>) {
        self.cells[sq.row as usize][sq.col as usize] = cell;
    }

    /// Row-major iterator over occupied squares
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        (0..BOARD_SIZE).flat_map(move |row| {
            (0..BOARD_SIZE).filter_map(move |col| {
                let sq = Square::new(row, col);
                self.at(sq).map(|piece| (sq, piece))
            })
        })
    }

    /// First square in row-major order holding the side's piece of a kind
    pub fn find(&self, kind: PieceKind, side: Side) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece.kind == kind && piece.owner == side)
            .map(|(sq, _)| sq)
    }

    /// Whether the side still has a piece of the given kind
    pub fn has(&self, kind: PieceKind, side: Side) -> bool {
        self.find(kind, side).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_bounds() {
        assert!(Square::new(0, 0).in_bounds());
        assert!(Square::new(4, 4).in_bounds());
        assert!(!Square::new(-1, 0).in_bounds());
        assert!(!Square::new(0, 5).in_bounds());
        assert!(!Square::new(5, 2).in_bounds());
    }

    #[test]
    fn test_square_notation() {
        assert_eq!(Square::new(4, 0).to_string(), "a1");
        assert_eq!(Square::new(0, 4).to_string(), "e5");
        assert_eq!(Square::new(2, 2).to_string(), "c3");
        assert_eq!(Square::new(5, 0).to_string(), "(5, 0)");
    }

    #[test]
    fn test_neighbors() {
        assert_eq!(Square::new(2, 2).neighbors().count(), 8);
        assert_eq!(Square::new(0, 0).neighbors().count(), 3);
        assert_eq!(Square::new(0, 2).neighbors().count(), 5);
    }

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        assert_eq!(
            board.at(Square::new(0, 2)),
            Some(Piece::new(PieceKind::King, Side::Black))
        );
        assert_eq!(
            board.at(Square::new(4, 2)),
            Some(Piece::new(PieceKind::King, Side::White))
        );
        // Champions and towers are mirrored across the board
        assert_eq!(
            board.at(Square::new(0, 1)).map(|p| p.kind),
            Some(PieceKind::Champion)
        );
        assert_eq!(
            board.at(Square::new(4, 3)).map(|p| p.kind),
            Some(PieceKind::Champion)
        );
        assert_eq!(board.pieces().count(), 10);
        assert!(board.at(Square::new(2, 2)).is_none());
    }

    #[test]
    fn test_find_scans_row_major() {
        let board = Board::standard();
        // Both sides have two soldiers; the lower-indexed square wins
        assert_eq!(
            board.find(PieceKind::Soldier, Side::Black),
            Some(Square::new(0, 0))
        );
        assert_eq!(
            board.find(PieceKind::Soldier, Side::White),
            Some(Square::new(4, 0))
        );
        assert_eq!(board.find(PieceKind::King, Side::White), Some(Square::new(4, 2)));

        let mut board = board;
        board.place(Square::new(4, 0), None);
        assert_eq!(
            board.find(PieceKind::Soldier, Side::White),
            Some(Square::new(4, 4))
        );
        board.place(Square::new(4, 4), None);
        assert!(!board.has(PieceKind::Soldier, Side::White));
    }

    #[test]
    fn test_board_serializes_as_nested_array() {
        let board = Board::standard();
        let json = serde_json::to_string(&board).unwrap();
        assert!(json.starts_with("[["));
        assert!(json.contains(r#"{"type":"K","player":"black"}"#));
        assert!(json.contains("null"));

        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
