use crate::{format_coord, Coord, Piece};

/// The error type for text that cannot be understood as a move or command.
///
/// The input is rejected without touching any game state, and the same
/// player may try again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputFormatError {
    Empty,
    TooShort { input: String },
    BadRank { label: String },
    BadFile { label: char },
    RankOutOfRange { label: String },
    FileOutOfRange { label: char },
    UnknownCommand { token: String },
}

impl std::error::Error for InputFormatError {}

impl std::fmt::Display for InputFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputFormatError::Empty => write!(f, "No input was given"),
            InputFormatError::TooShort { input } => write!(
                f,
                "'{}' is too short, expected a rank followed by a file (e.g. 4E)",
                input
            ),
            InputFormatError::BadRank { label } => write!(f, "'{}' is not a valid rank", label),
            InputFormatError::BadFile { label } => write!(f, "'{}' is not a valid file", label),
            InputFormatError::RankOutOfRange { label } => {
                write!(f, "Rank '{}' is outside of the board", label)
            }
            InputFormatError::FileOutOfRange { label } => {
                write!(f, "File '{}' is outside of the board", label)
            }
            InputFormatError::UnknownCommand { token } => {
                write!(f, "'{}' is not a known command", token)
            }
        }
    }
}

/// The error type for a well-formed move that the rules do not allow.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IllegalMove {
    OutOfBounds { coord: Coord },
    Occupied { coord: Coord, piece: Piece },
    NoCapture { coord: Coord },
    PassWithLegalMoves,
    PassNotAllowed,
    BombNotAllowed,
    NoBombsLeft,
    BombTarget { coord: Coord, piece: Piece },
    GameOver,
    NoSuchBoard { index: usize },
}

impl std::error::Error for IllegalMove {}

impl std::fmt::Display for IllegalMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IllegalMove::OutOfBounds { coord } => {
                write!(f, "({}, {}) is outside of the board", coord.row, coord.col)
            }
            IllegalMove::Occupied { coord, piece } => match piece {
                Piece::Obstacle | Piece::Crater => {
                    write!(f, "{} can never be played on ({})", format_coord(*coord), piece)
                }
                _ => write!(f, "{} is already taken by {}", format_coord(*coord), piece),
            },
            IllegalMove::NoCapture { coord } => write!(
                f,
                "A piece at {} would not capture anything",
                format_coord(*coord)
            ),
            IllegalMove::PassWithLegalMoves => {
                write!(f, "Passing is only allowed when there is no legal move")
            }
            IllegalMove::PassNotAllowed => write!(f, "This game does not allow passing"),
            IllegalMove::BombNotAllowed => write!(f, "Bombs only exist in gomoku"),
            IllegalMove::NoBombsLeft => write!(f, "No bombs left"),
            IllegalMove::BombTarget { coord, piece } => write!(
                f,
                "A bomb must target an opponent's piece, but {} holds {}",
                format_coord(*coord),
                piece
            ),
            IllegalMove::GameOver => write!(f, "This game has already ended"),
            IllegalMove::NoSuchBoard { index } => write!(f, "There is no board {}", index + 1),
        }
    }
}

/// The error type for [`GameSession::process_move()`](crate::GameSession::process_move).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveError {
    Format(InputFormatError),
    Illegal(IllegalMove),
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::Format(err) => Some(err),
            MoveError::Illegal(err) => Some(err),
        }
    }
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::Format(_) => write!(f, "Could not read the move"),
            MoveError::Illegal(_) => write!(f, "The move is not allowed"),
        }
    }
}

impl From<InputFormatError> for MoveError {
    fn from(err: InputFormatError) -> Self {
        MoveError::Format(err)
    }
}

impl From<IllegalMove> for MoveError {
    fn from(err: IllegalMove) -> Self {
        MoveError::Illegal(err)
    }
}
