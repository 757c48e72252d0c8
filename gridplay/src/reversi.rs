//! Reversi (Othello) rules.
//!
//! A piece may only be placed where it brackets at least one straight run of
//! opponent pieces between itself and another piece of its own color. Every
//! bracketed run is flipped; runs that end in an empty cell or at the edge
//! of the board are left alone.

use crate::{Board, Coord, GameResult, IllegalMove, Piece, Seat};

/// The eight compass directions as (row, column) steps.
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

/// Places the four starting pieces in the center of the board.
pub fn seed(board: &mut Board) {
    let hi = board.size() / 2;
    let lo = hi - 1;
    board.place(lo, lo, Piece::White, false);
    board.place(lo, hi, Piece::Black, false);
    board.place(hi, lo, Piece::Black, false);
    board.place(hi, hi, Piece::White, false);
}

/// The opponent pieces that placing `piece` at `coord` would flip in one direction.
///
/// Empty unless the run of opponent pieces starting next to `coord` is
/// immediately followed by a piece of `piece`'s color.
pub fn bracketed_run(board: &Board, coord: Coord, piece: Piece, (dr, dc): (i8, i8)) -> Vec<Coord> {
    let Some(opponent) = piece.opponent() else {
        return Vec::new();
    };
    let mut run = Vec::new();
    let (mut row, mut col) = (coord.row + dr, coord.col + dc);
    while board.try_get(row, col) == Some(opponent) {
        run.push(Coord::new(row, col));
        row += dr;
        col += dc;
    }
    if board.try_get(row, col) == Some(piece) {
        run
    } else {
        Vec::new()
    }
}

/// Can `piece` be placed at `coord`?
pub fn is_legal(board: &Board, coord: Coord, piece: Piece) -> bool {
    board.try_get(coord.row, coord.col) == Some(Piece::Empty)
        && DIRECTIONS
            .iter()
            .any(|&dir| !bracketed_run(board, coord, piece, dir).is_empty())
}

pub fn legal_moves(board: &Board, piece: Piece) -> Vec<Coord> {
    board
        .cells()
        .map(|(row, col, _)| Coord::new(row, col))
        .filter(|&coord| is_legal(board, coord, piece))
        .collect()
}

pub fn has_legal_move(board: &Board, piece: Piece) -> bool {
    board
        .cells()
        .any(|(row, col, _)| is_legal(board, Coord::new(row, col), piece))
}

/// Flips every run bracketed by the piece at `coord` and returns how many
/// pieces changed color.
pub fn flip(board: &mut Board, coord: Coord, piece: Piece) -> usize {
    let mut flipped = 0;
    for dir in DIRECTIONS {
        for Coord { row, col } in bracketed_run(board, coord, piece, dir) {
            board.place(row, col, piece, true);
            flipped += 1;
        }
    }
    flipped
}

/// Places `piece` at `coord` and flips the captured runs.
pub fn play(board: &mut Board, coord: Coord, piece: Piece) -> Result<usize, IllegalMove> {
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
    if !is_legal(board, coord, piece) {
        return Err(IllegalMove::NoCapture { coord });
    }
    board.place(coord.row, coord.col, piece, false);
    Ok(flip(board, coord, piece))
}

/// Pieces on the board per seat.
pub fn score(board: &Board) -> [usize; 2] {
    [
        board.count(Seat::First.piece()),
        board.count(Seat::Second.piece()),
    ]
}

/// The game is over when the board is full or nobody can move.
pub fn has_ended(board: &Board) -> bool {
    board.is_full()
        || (!has_legal_move(board, Piece::Black) && !has_legal_move(board, Piece::White))
}

pub fn result(board: &Board) -> GameResult {
    let [first, second] = score(board);
    match first.cmp(&second) {
        std::cmp::Ordering::Less => GameResult::Winner(Seat::Second),
        std::cmp::Ordering::Equal => GameResult::Draw,
        std::cmp::Ordering::Greater => GameResult::Winner(Seat::First),
    }
}
