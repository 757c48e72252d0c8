use serde::{Deserialize, Serialize};

use crate::Piece;

/// One of the two seats at a game.
///
/// The first seat always plays [`Piece::Black`] and moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }

    /// Index into per-seat arrays.
    pub fn index(self) -> usize {
        match self {
            Seat::First => 0,
            Seat::Second => 1,
        }
    }

    pub fn piece(self) -> Piece {
        match self {
            Seat::First => Piece::Black,
            Seat::Second => Piece::White,
        }
    }

    /// The seat owning a player color.
    pub fn of_piece(piece: Piece) -> Option<Seat> {
        match piece {
            Piece::Black => Some(Seat::First),
            Piece::White => Some(Seat::Second),
            _ => None,
        }
    }
}

/// A named player and the color they play.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    piece: Piece,
}

impl Player {
    /// Control characters in `name` are replaced by spaces, so a name always
    /// fits on one line.
    pub fn new(name: &str, seat: Seat) -> Self {
        Self {
            name: name
                .chars()
                .map(|c| if c.is_control() { ' ' } else { c })
                .collect(),
            piece: seat.piece(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn piece(&self) -> Piece {
        self.piece
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_stay_on_one_line() {
        assert_eq!(Player::new("Bo\nb", Seat::First).name(), "Bo b");
        assert_eq!(Player::new("Ada\r\t", Seat::Second).name(), "Ada  ");
        assert_eq!(Player::new("Ada ", Seat::Second).name(), "Ada ");
        assert_eq!(Player::new("Ada", Seat::Second).piece(), Piece::White);
    }
}
