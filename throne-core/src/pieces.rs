//! Piece and side definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Index, IndexMut};

use crate::board::BOARD_SIZE;

/// One of the two players
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta for this side's forward direction (White starts at the bottom)
    pub fn forward(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// The row this side's pieces start on
    pub fn home_row(self) -> i8 {
        match self {
            Side::White => BOARD_SIZE - 1,
            Side::Black => 0,
        }
    }

    /// The opponent's home row; a King standing here wins
    pub fn goal_row(self) -> i8 {
        self.opponent().home_row()
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// Piece kinds, serialized as the single letters the clients render
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    #[serde(rename = "K")]
    King,
    #[serde(rename = "C")]
    Champion,
    #[serde(rename = "T")]
    Tower,
    #[serde(rename = "S")]
    Soldier,
}

impl PieceKind {
    /// Single-letter glyph (matches the wire encoding)
    pub fn glyph(self) -> char {
        match self {
            PieceKind::King => 'K',
            PieceKind::Champion => 'C',
            PieceKind::Tower => 'T',
            PieceKind::Soldier => 'S',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::King => "King",
            PieceKind::Champion => "Champion",
            PieceKind::Tower => "Tower",
            PieceKind::Soldier => "Soldier",
        }
    }
}

/// A piece on the board
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    #[serde(rename = "type")]
    pub kind: PieceKind,
    #[serde(rename = "player")]
    pub owner: Side,
}

impl Piece {
    pub const fn new(kind: PieceKind, owner: Side) -> Self {
        Self { kind, owner }
    }

    pub fn is_king(&self) -> bool {
        self.kind == PieceKind::King
    }
}

/// A pair of values, one per side, indexable by [`Side`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BySide<T> {
    pub white: T,
    pub black: T,
}

impl<T> BySide<T> {
    pub fn new(white: T, black: T) -> Self {
        Self { white, black }
    }
}

impl<T> Index<Side> for BySide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }
}

impl<T> IndexMut<Side> for BySide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }
}
