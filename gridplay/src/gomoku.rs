//! Gomoku rules: five in a row on a 15x15 board with obstacles and bombs.

use crate::{parse_coord, Board, Coord, GameResult, IllegalMove, Piece, Seat};

/// Cells that hold an obstacle from the start of every game.
pub const OBSTACLE_LABELS: [&str; 4] = ["4D", "4L", "CD", "CL"];

/// Bombs each seat starts with.
pub const STARTING_BOMBS: [u8; 2] = [2, 3];

/// Number of identical pieces in a line needed to win.
pub const RUN_LENGTH: i8 = 5;

/// The four axes a winning line can lie on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    Horizontal,
    Vertical,
    Diagonal,
    AntiDiagonal,
}

impl Axis {
    pub const ALL: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::Diagonal,
        Axis::AntiDiagonal,
    ];

    /// The (row, column) step along this axis.
    pub fn step(self) -> (i8, i8) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::Diagonal => (1, 1),
            Axis::AntiDiagonal => (1, -1),
        }
    }
}

/// A line of [`RUN_LENGTH`] identical pieces.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WinningLine {
    pub start: Coord,
    pub axis: Axis,
    pub piece: Piece,
}

/// Counters that only exist in gomoku.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GomokuState {
    /// Starts at 1 and goes up whenever the first seat places a piece.
    pub round: u32,
    /// Remaining bombs per seat.
    pub bombs: [u8; 2],
    /// Pieces placed per seat, not counting bombs.
    pub moves: [u32; 2],
}

impl Default for GomokuState {
    fn default() -> Self {
        Self {
            round: 1,
            bombs: STARTING_BOMBS,
            moves: [0, 0],
        }
    }
}

impl GomokuState {
    /// Places a piece for `seat` on an empty cell.
    pub fn place(&mut self, board: &mut Board, coord: Coord, seat: Seat) -> Result<(), IllegalMove> {
        match board.try_get(coord.row, coord.col) {
            None => return Err(IllegalMove::OutOfBounds { coord }),
            Some(Piece::Empty) => {}
            Some(existing) => {
                return Err(IllegalMove::Occupied {
                    coord,
                    piece: existing,
                })
            }
        }
        board.place(coord.row, coord.col, seat.piece(), false);
        self.moves[seat.index()] += 1;
        if seat == Seat::First {
            self.round += 1;
        }
        Ok(())
    }

    /// Turns one of the opponent's pieces into a crater.
    pub fn bomb(&mut self, board: &mut Board, coord: Coord, seat: Seat) -> Result<(), IllegalMove> {
        if self.bombs[seat.index()] == 0 {
            return Err(IllegalMove::NoBombsLeft);
        }
        let target = board
            .try_get(coord.row, coord.col)
            .ok_or(IllegalMove::OutOfBounds { coord })?;
        if target != seat.other().piece() {
            return Err(IllegalMove::BombTarget {
                coord,
                piece: target,
            });
        }
        board.place(coord.row, coord.col, Piece::Crater, true);
        self.bombs[seat.index()] -= 1;
        Ok(())
    }
}

pub fn obstacle_coords() -> impl Iterator<Item = Coord> {
    OBSTACLE_LABELS.into_iter().map(|label| {
        parse_coord(label, crate::GOMOKU_BOARD_SIZE).expect("Invalid obstacle label")
    })
}

/// Places the fixed obstacles.
pub fn seed(board: &mut Board) {
    for Coord { row, col } in obstacle_coords() {
        board.place(row, col, Piece::Obstacle, false);
    }
}

/// Every line of [`RUN_LENGTH`] identical player pieces on the board.
///
/// The whole board is scanned, so a run of six shows up twice.
pub fn winning_lines(board: &Board) -> Vec<WinningLine> {
    let mut lines = Vec::new();
    for (row, col, piece) in board.cells() {
        if !piece.is_player_color() {
            continue;
        }
        for axis in Axis::ALL {
            let (dr, dc) = axis.step();
            let complete =
                (1..RUN_LENGTH).all(|k| board.try_get(row + dr * k, col + dc * k) == Some(piece));
            if complete {
                lines.push(WinningLine {
                    start: Coord::new(row, col),
                    axis,
                    piece,
                });
            }
        }
    }
    lines
}

/// The owner of the first winning line found, if any.
pub fn winner(board: &Board) -> Option<Seat> {
    winning_lines(board)
        .first()
        .and_then(|line| Seat::of_piece(line.piece))
}

pub fn has_ended(board: &Board) -> bool {
    winner(board).is_some() || board.is_full()
}

pub fn result(board: &Board) -> GameResult {
    match winner(board) {
        Some(seat) => GameResult::Winner(seat),
        None => GameResult::Draw,
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::quickcheck;

    use super::*;
    use crate::arbitrary::GomokuLine;
    use crate::GOMOKU_BOARD_SIZE;

    fn seeded() -> Board {
        let mut board = Board::new(GOMOKU_BOARD_SIZE);
        seed(&mut board);
        board
    }

    fn axes(board: &Board) -> Vec<Axis> {
        let mut axes: Vec<Axis> = winning_lines(board).into_iter().map(|l| l.axis).collect();
        axes.sort();
        axes.dedup();
        axes
    }

    quickcheck! {
        fn lines_need_five_uninterrupted(line: GomokuLine) -> bool {
            let GomokuLine { start, axis, length, breaker } = line;
            let (dr, dc) = axis.step();
            let mut board = Board::new(GOMOKU_BOARD_SIZE);
            for k in 0..length {
                board.place(start.row + dr * k, start.col + dc * k, Piece::Black, false);
            }
            if let Some((offset, piece)) = breaker {
                board.place(start.row + dr * offset, start.col + dc * offset, piece, true);
            }
            let longest = match breaker {
                Some((offset, _)) => offset.max(length - offset - 1),
                None => length,
            };
            let expect_win = longest >= RUN_LENGTH;
            axes(&board) == if expect_win { vec![axis] } else { vec![] }
        }
    }

    #[test]
    fn obstacles_are_seeded() {
        let board = seeded();
        assert_eq!(board.count(Piece::Obstacle), 4);
        assert_eq!(board.occupied(), 4);
        assert_eq!(board.get(3, 3), Piece::Obstacle);
        assert_eq!(board.get(11, 11), Piece::Obstacle);
    }

    #[test]
    fn five_horizontal_wins() {
        let mut board = seeded();
        let mut state = GomokuState::default();
        for col in 0..4 {
            state.place(&mut board, Coord::new(0, col), Seat::First).unwrap();
            assert_eq!(winner(&board), None);
        }
        state.place(&mut board, Coord::new(0, 4), Seat::First).unwrap();
        assert_eq!(winner(&board), Some(Seat::First));
        assert_eq!(axes(&board), vec![Axis::Horizontal]);
        assert_eq!(result(&board), GameResult::Winner(Seat::First));
    }

    #[test]
    fn both_diagonals_are_detected() {
        let mut board = Board::new(GOMOKU_BOARD_SIZE);
        for k in 0..5 {
            board.place(k, k, Piece::White, false);
            board.place(k, 10 - k, Piece::White, false);
        }
        assert_eq!(axes(&board), vec![Axis::Diagonal, Axis::AntiDiagonal]);
        assert_eq!(winner(&board), Some(Seat::Second));
    }

    #[test]
    fn terrain_runs_never_win() {
        let mut board = Board::new(GOMOKU_BOARD_SIZE);
        for col in 0..5 {
            board.place(7, col, Piece::Obstacle, false);
        }
        for col in 0..5 {
            board.place(8, col, Piece::Black, false);
            board.place(8, col, Piece::Crater, true);
        }
        assert!(winning_lines(&board).is_empty());
    }

    #[test]
    fn placement_counts_rounds_and_moves() {
        let mut board = seeded();
        let mut state = GomokuState::default();
        state.place(&mut board, Coord::new(0, 0), Seat::First).unwrap();
        state.place(&mut board, Coord::new(1, 0), Seat::Second).unwrap();
        assert_eq!(state.round, 2);
        assert_eq!(state.moves, [1, 1]);
        assert_eq!(
            state.place(&mut board, Coord::new(3, 3), Seat::First),
            Err(IllegalMove::Occupied {
                coord: Coord::new(3, 3),
                piece: Piece::Obstacle
            })
        );
        assert_eq!(state.round, 2);
    }

    #[test]
    fn bomb_only_hits_opponent_pieces() {
        let mut board = seeded();
        let mut state = GomokuState::default();
        state.place(&mut board, Coord::new(0, 0), Seat::First).unwrap();
        state.place(&mut board, Coord::new(1, 0), Seat::Second).unwrap();
        let before = board.clone();
        for (coord, piece) in [
            (Coord::new(5, 5), Piece::Empty),
            (Coord::new(3, 3), Piece::Obstacle),
            (Coord::new(1, 0), Piece::White),
        ] {
            assert_eq!(
                state.bomb(&mut board, coord, Seat::Second),
                Err(IllegalMove::BombTarget { coord, piece })
            );
        }
        assert_eq!(board, before);
        assert_eq!(state.bombs, [2, 3]);

        state.bomb(&mut board, Coord::new(0, 0), Seat::Second).unwrap();
        assert_eq!(board.get(0, 0), Piece::Crater);
        assert_eq!(board.occupied(), before.occupied());
        assert_eq!(state.bombs, [2, 2]);
        assert_eq!(state.round, 2);

        assert_eq!(
            state.bomb(&mut board, Coord::new(0, 0), Seat::Second),
            Err(IllegalMove::BombTarget {
                coord: Coord::new(0, 0),
                piece: Piece::Crater
            })
        );
        assert_eq!(state.bombs, [2, 2]);
    }

    #[test]
    fn bombs_run_out() {
        let mut board = seeded();
        let mut state = GomokuState {
            bombs: [0, 3],
            ..GomokuState::default()
        };
        state.place(&mut board, Coord::new(1, 0), Seat::Second).unwrap();
        assert_eq!(
            state.bomb(&mut board, Coord::new(1, 0), Seat::First),
            Err(IllegalMove::NoBombsLeft)
        );
        assert_eq!(board.get(1, 0), Piece::White);
    }

    #[test]
    fn full_board_without_five_is_a_draw() {
        let mut board = seeded();
        let mut state = GomokuState::default();
        // Two-cell stripes, so no axis ever holds more than two in a row
        for (row, col, piece) in seeded().cells() {
            if piece != Piece::Empty {
                continue;
            }
            assert!(!has_ended(&board));
            let seat = if (col + 2 * row) % 4 < 2 { Seat::First } else { Seat::Second };
            state.place(&mut board, Coord::new(row, col), seat).unwrap();
        }
        assert!(board.is_full());
        assert_eq!(state.moves[0] + state.moves[1], 15 * 15 - 4);
        assert!(winning_lines(&board).is_empty());
        assert_eq!(winner(&board), None);
        assert!(has_ended(&board));
        assert_eq!(result(&board), GameResult::Draw);
    }
}
