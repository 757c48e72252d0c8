use quickcheck::{Arbitrary, Gen};

use crate::gomoku::Axis;
use crate::{Board, Coord, Piece, GOMOKU_BOARD_SIZE, SMALL_BOARD_SIZE};

fn index_below(g: &mut Gen, bound: i8) -> i8 {
    (u8::arbitrary(g) % bound as u8) as i8
}

/// A placement on a 4x4 board, sometimes just outside of it.
#[derive(Clone, Debug)]
pub struct Placement {
    pub row: i8,
    pub col: i8,
    pub piece: Piece,
}

impl Arbitrary for Placement {
    fn arbitrary(g: &mut Gen) -> Self {
        Placement {
            row: index_below(g, 6) - 1,
            col: index_below(g, 6) - 1,
            piece: *g.choose(&Piece::ALL).unwrap(),
        }
    }
}

/// A valid cell on one of the board sizes used by the games.
#[derive(Clone, Debug)]
pub struct BoardCoord {
    pub size: i8,
    pub coord: Coord,
}

impl Arbitrary for BoardCoord {
    fn arbitrary(g: &mut Gen) -> Self {
        let size = *g.choose(&[SMALL_BOARD_SIZE, GOMOKU_BOARD_SIZE]).unwrap();
        BoardCoord {
            size,
            coord: Coord::new(index_below(g, size), index_below(g, size)),
        }
    }
}

/// A 4x4 board of player pieces with an empty cell to play on.
#[derive(Clone, Debug)]
pub struct SmallBoard {
    pub board: Board,
    pub origin: Coord,
}

impl Arbitrary for SmallBoard {
    fn arbitrary(g: &mut Gen) -> Self {
        let mut board = Board::new(4);
        let origin = Coord::new(index_below(g, 4), index_below(g, 4));
        for row in 0..4 {
            for col in 0..4 {
                if Coord::new(row, col) == origin {
                    continue;
                }
                let piece = *g
                    .choose(&[Piece::Empty, Piece::Black, Piece::White])
                    .unwrap();
                board.place(row, col, piece, false);
            }
        }
        SmallBoard { board, origin }
    }
}

/// A straight line of black pieces on an empty gomoku board, possibly
/// interrupted by one other piece.
#[derive(Clone, Debug)]
pub struct GomokuLine {
    pub start: Coord,
    pub axis: Axis,
    /// Between 1 and 7 cells, all on the board.
    pub length: i8,
    /// Offset into the line and the piece that replaces the black one there.
    pub breaker: Option<(i8, Piece)>,
}

impl Arbitrary for GomokuLine {
    fn arbitrary(g: &mut Gen) -> Self {
        let axis = *g.choose(&Axis::ALL).unwrap();
        let length = index_below(g, 7) + 1;
        let span = length - 1;
        let (dr, dc) = axis.step();
        let row = index_below(g, GOMOKU_BOARD_SIZE - dr * span);
        let col = match dc {
            1 => index_below(g, GOMOKU_BOARD_SIZE - span),
            -1 => span + index_below(g, GOMOKU_BOARD_SIZE - span),
            _ => index_below(g, GOMOKU_BOARD_SIZE),
        };
        let breaker = if bool::arbitrary(g) {
            let piece = *g
                .choose(&[Piece::Obstacle, Piece::Crater, Piece::White])
                .unwrap();
            Some((index_below(g, length), piece))
        } else {
            None
        };
        GomokuLine {
            start: Coord::new(row, col),
            axis,
            length,
            breaker,
        }
    }
}
