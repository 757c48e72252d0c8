//! The line-oriented save file holding every open game.
//!
//! Each line is `KEY:value`. A file starts with the number of games and the
//! current index, followed by one block per game from `GAME_START:<k>` to
//! `GAME_END:<k>`. Board rows are written as `ROW:<r>:` followed by one
//! comma-separated piece token per cell.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use gridplay::{
    Board, GameSession, GomokuState, Piece, RestoreError, SavedSession, Seat, SessionConfig,
    SessionRegistry, UnknownPieceToken, VariantKind,
};
use tracing::{debug, info, warn};

/// The error type for reading a save file.
#[derive(Debug)]
pub enum SaveFileError {
    Io(std::io::Error),
    NoGames,
    UnexpectedEnd {
        expected: &'static str,
    },
    UnexpectedLine {
        line: usize,
        expected: &'static str,
        found: String,
    },
    BadValue {
        line: usize,
        key: &'static str,
        value: String,
    },
    BadPiece {
        line: usize,
        err: UnknownPieceToken,
    },
    Restore {
        game: usize,
        err: RestoreError,
    },
}

impl std::error::Error for SaveFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SaveFileError::Io(err) => Some(err),
            SaveFileError::BadPiece { err, .. } => Some(err),
            SaveFileError::Restore { err, .. } => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for SaveFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveFileError::Io(_) => write!(f, "Could not read the save file"),
            SaveFileError::NoGames => write!(f, "The save file contains no games"),
            SaveFileError::UnexpectedEnd { expected } => {
                write!(f, "The save file ended where {} was expected", expected)
            }
            SaveFileError::UnexpectedLine {
                line,
                expected,
                found,
            } => write!(f, "Line {}: expected {}, found '{}'", line, expected, found),
            SaveFileError::BadValue { line, key, value } => {
                write!(f, "Line {}: '{}' is not a valid {}", line, value, key)
            }
            SaveFileError::BadPiece { line, .. } => write!(f, "Line {}: bad board row", line),
            SaveFileError::Restore { game, .. } => {
                write!(f, "Game {} cannot be restored", game + 1)
            }
        }
    }
}

impl From<std::io::Error> for SaveFileError {
    fn from(err: std::io::Error) -> Self {
        SaveFileError::Io(err)
    }
}

pub fn write_registry<W: Write>(writer: &mut W, registry: &SessionRegistry) -> std::io::Result<()> {
    writeln!(writer, "GAME_COUNT:{}", registry.sessions().len())?;
    writeln!(writer, "CURRENT_INDEX:{}", registry.current_index())?;
    for (k, session) in registry.sessions().iter().enumerate() {
        write_session(writer, k, session)?;
    }
    Ok(())
}

fn write_session<W: Write>(writer: &mut W, k: usize, session: &GameSession) -> std::io::Result<()> {
    writeln!(writer, "GAME_START:{}", k)?;
    writeln!(writer, "TYPE:{}", session.kind())?;
    writeln!(writer, "ID:{}", session.id())?;
    writeln!(writer, "PLAYER1:{}", session.player(Seat::First).name())?;
    writeln!(writer, "PLAYER2:{}", session.player(Seat::Second).name())?;
    writeln!(writer, "CURRENT_PLAYER:{}", session.current_seat().index() + 1)?;
    writeln!(writer, "GAME_ENDED:{}", session.is_ended())?;
    writeln!(writer, "CURRENT_BOARD:{}", session.board_index())?;
    if let Some(state) = session.gomoku() {
        writeln!(writer, "CURRENT_ROUND:{}", state.round)?;
        writeln!(writer, "BOMBS1:{}", state.bombs[0])?;
        writeln!(writer, "BOMBS2:{}", state.bombs[1])?;
        writeln!(writer, "MOVES1:{}", state.moves[0])?;
        writeln!(writer, "MOVES2:{}", state.moves[1])?;
    }
    writeln!(writer, "BOARD_COUNT:{}", session.boards().len())?;
    writeln!(writer, "BOARD_SIZE:{}", session.board().size())?;
    for (b, board) in session.boards().iter().enumerate() {
        writeln!(writer, "BOARD_INDEX:{}", b)?;
        for row in 0..board.size() {
            let tokens: Vec<&str> = board.row(row).iter().map(|piece| piece.token()).collect();
            writeln!(writer, "ROW:{}:{}", row, tokens.join(","))?;
        }
    }
    writeln!(writer, "GAME_END:{}", k)
}

/// Writes the registry to `path`, replacing any previous save.
pub fn save(path: &Path, registry: &SessionRegistry) -> anyhow::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_registry(&mut writer, registry)?;
    writer.flush()?;
    debug!(path = %path.display(), games = registry.sessions().len(), "Saved");
    Ok(())
}

struct Reader<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
        }
    }

    /// The value of the next non-blank line, which must have this key.
    fn field(&mut self, key: &'static str) -> Result<(usize, &'a str), SaveFileError> {
        loop {
            let Some((idx, line)) = self.lines.next() else {
                return Err(SaveFileError::UnexpectedEnd { expected: key });
            };
            let line = line.strip_suffix('\r').unwrap_or(line);
            if line.trim().is_empty() {
                continue;
            }
            return match line.split_once(':') {
                Some((found, value)) if found == key => Ok((idx + 1, value)),
                _ => Err(SaveFileError::UnexpectedLine {
                    line: idx + 1,
                    expected: key,
                    found: String::from(line),
                }),
            };
        }
    }

    fn parse<T: FromStr>(&mut self, key: &'static str) -> Result<T, SaveFileError> {
        let (line, value) = self.field(key)?;
        value.parse().map_err(|_| SaveFileError::BadValue {
            line,
            key,
            value: String::from(value),
        })
    }

    /// Like `parse`, but the value must also equal `expected`.
    fn counter(&mut self, key: &'static str, expected: usize) -> Result<(), SaveFileError> {
        let (line, value) = self.field(key)?;
        if value.parse::<usize>().ok() == Some(expected) {
            Ok(())
        } else {
            Err(SaveFileError::BadValue {
                line,
                key,
                value: String::from(value),
            })
        }
    }
}

/// Reads a save file written by [`write_registry()`].
///
/// New sessions created later on use `config`.
pub fn read_registry(text: &str, config: &SessionConfig) -> Result<SessionRegistry, SaveFileError> {
    let mut reader = Reader::new(text);
    let count: usize = reader.parse("GAME_COUNT")?;
    if count == 0 {
        return Err(SaveFileError::NoGames);
    }
    let current: usize = reader.parse("CURRENT_INDEX")?;
    let sessions = (0..count)
        .map(|k| read_session(&mut reader, k))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SessionRegistry::from_parts(sessions, current, config.clone()))
}

fn read_session(reader: &mut Reader, k: usize) -> Result<GameSession, SaveFileError> {
    reader.counter("GAME_START", k)?;
    let kind: VariantKind = reader.parse("TYPE")?;
    let id: u32 = reader.parse("ID")?;
    let (_, player1) = reader.field("PLAYER1")?;
    let (_, player2) = reader.field("PLAYER2")?;
    let (line, value) = reader.field("CURRENT_PLAYER")?;
    let current = match value {
        "1" => Seat::First,
        "2" => Seat::Second,
        _ => {
            return Err(SaveFileError::BadValue {
                line,
                key: "CURRENT_PLAYER",
                value: String::from(value),
            })
        }
    };
    // Recomputed from the boards
    let _: bool = reader.parse("GAME_ENDED")?;
    let active_board: usize = reader.parse("CURRENT_BOARD")?;
    let gomoku = if kind == VariantKind::Gomoku {
        Some(GomokuState {
            round: reader.parse("CURRENT_ROUND")?,
            bombs: [reader.parse("BOMBS1")?, reader.parse("BOMBS2")?],
            moves: [reader.parse("MOVES1")?, reader.parse("MOVES2")?],
        })
    } else {
        None
    };
    let board_count: usize = reader.parse("BOARD_COUNT")?;
    let (line, value) = reader.field("BOARD_SIZE")?;
    if value.parse::<i8>().ok() != Some(kind.board_size()) {
        return Err(SaveFileError::BadValue {
            line,
            key: "BOARD_SIZE",
            value: String::from(value),
        });
    }
    let boards = (0..board_count)
        .map(|b| {
            reader.counter("BOARD_INDEX", b)?;
            read_board(reader, kind.board_size())
        })
        .collect::<Result<Vec<_>, _>>()?;
    reader.counter("GAME_END", k)?;

    let config = SessionConfig {
        boards: board_count.max(1),
        player_names: [String::from(player1), String::from(player2)],
    };
    let saved = SavedSession {
        current,
        active_board,
        gomoku,
        boards,
    };
    GameSession::restore(kind, id, &config, saved)
        .map_err(|err| SaveFileError::Restore { game: k, err })
}

// Cells are placed one by one so that the board's occupancy count is rebuilt
fn read_board(reader: &mut Reader, size: i8) -> Result<Board, SaveFileError> {
    let mut board = Board::new(size);
    for row in 0..size {
        let (line, value) = reader.field("ROW")?;
        let bad_row = || SaveFileError::BadValue {
            line,
            key: "ROW",
            value: String::from(value),
        };
        let (label, tokens) = value.split_once(':').ok_or_else(bad_row)?;
        if label.parse::<i8>().ok() != Some(row) {
            return Err(bad_row());
        }
        let pieces = tokens
            .split(',')
            .map(str::parse::<Piece>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| SaveFileError::BadPiece { line, err })?;
        if pieces.len() != size as usize {
            return Err(bad_row());
        }
        for (col, piece) in pieces.into_iter().enumerate() {
            if piece != Piece::Empty {
                board.place(row, col as i8, piece, false);
            }
        }
    }
    Ok(board)
}

/// Loads the saved games, or the default games if there is no usable save.
pub fn load_or_default(path: &Path, config: &SessionConfig) -> SessionRegistry {
    if !path.exists() {
        info!(path = %path.display(), "No save file, starting fresh");
        return SessionRegistry::with_defaults(config.clone());
    }
    let loaded = std::fs::read_to_string(path)
        .map_err(SaveFileError::from)
        .and_then(|text| read_registry(&text, config));
    match loaded {
        Ok(registry) => {
            info!(
                path = %path.display(),
                games = registry.sessions().len(),
                "Loaded saved games"
            );
            registry
        }
        Err(err) => {
            let mut err_dyn = &err as &dyn std::error::Error;
            while let Some(src_err) = err_dyn.source() {
                warn!("{}", err_dyn);
                err_dyn = src_err;
            }
            warn!(path = %path.display(), "{}, starting fresh", err_dyn);
            SessionRegistry::with_defaults(config.clone())
        }
    }
}
