//! The closed set of rule sets and the functions that dispatch on them.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{
    gomoku, reversi, Board, Coord, GomokuState, IllegalMove, InputFormatError, Piece, Seat,
    GOMOKU_BOARD_SIZE, SMALL_BOARD_SIZE,
};

/// Names the rule set of a game, without any state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Peace,
    Reversi,
    Gomoku,
}

impl VariantKind {
    pub const ALL: [VariantKind; 3] = [VariantKind::Peace, VariantKind::Reversi, VariantKind::Gomoku];

    pub fn name(self) -> &'static str {
        match self {
            VariantKind::Peace => "peace",
            VariantKind::Reversi => "reversi",
            VariantKind::Gomoku => "gomoku",
        }
    }

    pub fn board_size(self) -> i8 {
        match self {
            VariantKind::Peace | VariantKind::Reversi => SMALL_BOARD_SIZE,
            VariantKind::Gomoku => GOMOKU_BOARD_SIZE,
        }
    }
}

impl std::fmt::Display for VariantKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for VariantKind {
    type Err = InputFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariantKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| InputFormatError::UnknownCommand {
                token: String::from(s),
            })
    }
}

/// A rule set together with the state only that rule set needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rules {
    /// Any empty cell may be taken. Nobody wins.
    Peace,
    Reversi,
    Gomoku(GomokuState),
}

impl Rules {
    pub fn new(kind: VariantKind) -> Self {
        match kind {
            VariantKind::Peace => Rules::Peace,
            VariantKind::Reversi => Rules::Reversi,
            VariantKind::Gomoku => Rules::Gomoku(GomokuState::default()),
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            Rules::Peace => VariantKind::Peace,
            Rules::Reversi => VariantKind::Reversi,
            Rules::Gomoku(_) => VariantKind::Gomoku,
        }
    }
}

/// A parsed move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MoveInput {
    Place(Coord),
    Bomb(Coord),
    Pass,
}

/// How the game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    Winner(Seat),
    Draw,
}

/// What a successful move did to the board and the turn order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    /// Pieces that changed color as a side effect.
    pub flipped: usize,
    /// Whose turn it is now.
    pub next: Seat,
    /// Set when the opponent had no legal move and lost their turn.
    pub skipped: Option<Seat>,
}

/// Creates a board for the rule set with its starting pieces.
pub fn new_board(kind: VariantKind) -> Board {
    let mut board = Board::new(kind.board_size());
    match kind {
        VariantKind::Peace => {}
        VariantKind::Reversi => reversi::seed(&mut board),
        VariantKind::Gomoku => gomoku::seed(&mut board),
    }
    board
}

/// Cells where `seat` may place a piece.
pub fn legal_moves(rules: &Rules, board: &Board, seat: Seat) -> Vec<Coord> {
    match rules {
        Rules::Reversi => reversi::legal_moves(board, seat.piece()),
        Rules::Peace | Rules::Gomoku(_) => board
            .cells()
            .filter(|&(_, _, piece)| piece == Piece::Empty)
            .map(|(row, col, _)| Coord::new(row, col))
            .collect(),
    }
}

/// Applies a move by `seat`. The board and state are untouched on error.
pub fn apply_move(
    rules: &mut Rules,
    board: &mut Board,
    seat: Seat,
    input: MoveInput,
) -> Result<Applied, IllegalMove> {
    let simple = Applied {
        flipped: 0,
        next: seat.other(),
        skipped: None,
    };
    match (rules, input) {
        (Rules::Peace, MoveInput::Place(coord)) => {
            place_on_empty(board, coord, seat.piece())?;
            Ok(simple)
        }
        (Rules::Reversi, MoveInput::Place(coord)) => {
            let flipped = reversi::play(board, coord, seat.piece())?;
            let opponent = seat.other();
            // The opponent loses their turn when they cannot move but we can
            if !reversi::has_legal_move(board, opponent.piece())
                && reversi::has_legal_move(board, seat.piece())
            {
                Ok(Applied {
                    flipped,
                    next: seat,
                    skipped: Some(opponent),
                })
            } else {
                Ok(Applied { flipped, ..simple })
            }
        }
        (Rules::Reversi, MoveInput::Pass) => {
            if reversi::has_legal_move(board, seat.piece()) {
                Err(IllegalMove::PassWithLegalMoves)
            } else {
                Ok(simple)
            }
        }
        (Rules::Gomoku(state), MoveInput::Place(coord)) => {
            state.place(board, coord, seat)?;
            Ok(simple)
        }
        (Rules::Gomoku(state), MoveInput::Bomb(coord)) => {
            state.bomb(board, coord, seat)?;
            Ok(simple)
        }
        (Rules::Peace | Rules::Gomoku(_), MoveInput::Pass) => Err(IllegalMove::PassNotAllowed),
        (Rules::Peace | Rules::Reversi, MoveInput::Bomb(_)) => Err(IllegalMove::BombNotAllowed),
    }
}

/// Is the game on this board over?
pub fn has_ended(rules: &Rules, board: &Board) -> bool {
    match rules {
        Rules::Peace => board.is_full(),
        Rules::Reversi => reversi::has_ended(board),
        Rules::Gomoku(_) => gomoku::has_ended(board),
    }
}

/// The result of a finished game, or `None` while it is still running.
pub fn result(rules: &Rules, board: &Board) -> Option<GameResult> {
    if !has_ended(rules, board) {
        return None;
    }
    Some(match rules {
        Rules::Peace => GameResult::Draw,
        Rules::Reversi => reversi::result(board),
        Rules::Gomoku(_) => gomoku::result(board),
    })
}

fn place_on_empty(board: &mut Board, coord: Coord, piece: Piece) -> Result<(), IllegalMove> {
    match board.try_get(coord.row, coord.col) {
        None => Err(IllegalMove::OutOfBounds { coord }),
        Some(Piece::Empty) => {
            board.place(coord.row, coord.col, piece, false);
            Ok(())
        }
        Some(existing) => Err(IllegalMove::Occupied {
            coord,
            piece: existing,
        }),
    }
}
