use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The contents of a single cell.
///
/// [`Piece::Obstacle`] and [`Piece::Crater`] only ever appear on Gomoku boards.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Piece {
    #[default]
    Empty,
    /// The first-seated player's color.
    Black,
    /// The second-seated player's color.
    White,
    /// Fixed terrain, present from the start of a game.
    Obstacle,
    /// A cell destroyed by a bomb.
    Crater,
}

impl Piece {
    pub const ALL: [Piece; 5] = [
        Piece::Empty,
        Piece::Black,
        Piece::White,
        Piece::Obstacle,
        Piece::Crater,
    ];

    /// The other player's color, or `None` for non-player pieces.
    pub fn opponent(self) -> Option<Piece> {
        match self {
            Piece::Black => Some(Piece::White),
            Piece::White => Some(Piece::Black),
            _ => None,
        }
    }

    pub fn is_player_color(self) -> bool {
        matches!(self, Piece::Black | Piece::White)
    }

    /// Single-character symbol used when drawing a board.
    pub fn symbol(self) -> char {
        match self {
            Piece::Empty => '.',
            Piece::Black => '○',
            Piece::White => '●',
            Piece::Obstacle => '#',
            Piece::Crater => '@',
        }
    }

    /// The token written to save files.
    pub fn token(self) -> &'static str {
        match self {
            Piece::Empty => "EMPTY",
            Piece::Black => "BLACK",
            Piece::White => "WHITE",
            Piece::Obstacle => "OBSTACLE",
            Piece::Crater => "CRATER",
        }
    }
}

impl std::fmt::Display for Piece {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// The error type for the [`FromStr`] instance of [`Piece`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownPieceToken(pub String);

impl std::error::Error for UnknownPieceToken {}

impl std::fmt::Display for UnknownPieceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' is not a piece name", self.0)
    }
}

impl FromStr for Piece {
    type Err = UnknownPieceToken;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Piece::ALL
            .into_iter()
            .find(|piece| piece.token() == s)
            .ok_or_else(|| UnknownPieceToken(String::from(s)))
    }
}
