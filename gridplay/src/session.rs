use crate::rules::{self, Applied};
use crate::{
    parse_coord, Board, Coord, GameResult, GomokuState, IllegalMove, InputFormatError, MoveError,
    MoveInput, Player, Rules, Seat, VariantKind,
};

/// Settings used when creating new sessions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// How many boards each new session holds.
    pub boards: usize,
    pub player_names: [String; 2],
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            boards: 1,
            player_names: [String::from("Player1"), String::from("Player2")],
        }
    }
}

/// Summarizes a successful move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Who made the move.
    pub seat: Seat,
    pub input: MoveInput,
    /// Pieces that changed color (Reversi only).
    pub flipped: usize,
    /// Set when a player lost their turn because they had no legal move.
    pub skipped: Option<Seat>,
    /// Did this move end the game?
    pub ended: bool,
}

/// One game: its boards, its players, and whose turn it is.
///
/// All boards of a session follow the same rules; moves are always made on
/// the active board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameSession {
    id: u32,
    rules: Rules,
    boards: Vec<Board>,
    players: [Player; 2],
    current: Seat,
    active_board: usize,
    ended: bool,
}

impl GameSession {
    pub fn new(kind: VariantKind, id: u32, config: &SessionConfig) -> Self {
        let [first, second] = &config.player_names;
        let mut session = Self {
            id,
            rules: Rules::new(kind),
            boards: (0..config.boards.max(1))
                .map(|_| rules::new_board(kind))
                .collect(),
            players: [Player::new(first, Seat::First), Player::new(second, Seat::Second)],
            current: Seat::First,
            active_board: 0,
            ended: false,
        };
        session.check_ended();
        session
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn kind(&self) -> VariantKind {
        self.rules.kind()
    }

    /// Gomoku counters, if this is a gomoku session.
    pub fn gomoku(&self) -> Option<&GomokuState> {
        match &self.rules {
            Rules::Gomoku(state) => Some(state),
            _ => None,
        }
    }

    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    /// The board moves are made on.
    pub fn board(&self) -> &Board {
        &self.boards[self.active_board]
    }

    pub fn board_index(&self) -> usize {
        self.active_board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    pub fn current_seat(&self) -> Seat {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        self.player(self.current)
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Makes another board active. The turn order is not affected.
    pub fn select_board(&mut self, index: usize) -> Result<(), IllegalMove> {
        if index >= self.boards.len() {
            return Err(IllegalMove::NoSuchBoard { index });
        }
        self.active_board = index;
        self.check_ended();
        Ok(())
    }

    /// Reads a move in the text form players type: `4E`, `@3A` or `pass`.
    pub fn parse_move(&self, text: &str) -> Result<MoveInput, InputFormatError> {
        let text = text.trim();
        let size = self.board().size();
        if text.eq_ignore_ascii_case("pass") {
            Ok(MoveInput::Pass)
        } else if let Some(target) = text.strip_prefix('@') {
            Ok(MoveInput::Bomb(parse_coord(target, size)?))
        } else {
            Ok(MoveInput::Place(parse_coord(text, size)?))
        }
    }

    /// Parses and plays one move for the current player.
    ///
    /// On error nothing changes and the same player is still to move.
    pub fn process_move(&mut self, text: &str) -> Result<MoveOutcome, MoveError> {
        let input = self.parse_move(text)?;
        self.apply_move(input)
    }

    /// Plays an already parsed move for the current player.
    pub fn apply_move(&mut self, input: MoveInput) -> Result<MoveOutcome, MoveError> {
        if self.ended {
            return Err(IllegalMove::GameOver.into());
        }
        let seat = self.current;
        let board = &mut self.boards[self.active_board];
        let Applied {
            flipped,
            next,
            skipped,
        } = rules::apply_move(&mut self.rules, board, seat, input)?;
        self.current = next;
        let ended = self.check_ended();
        Ok(MoveOutcome {
            seat,
            input,
            flipped,
            skipped,
            ended,
        })
    }

    /// Recomputes whether the game on the active board is over.
    pub fn check_ended(&mut self) -> bool {
        self.ended = rules::has_ended(&self.rules, self.board());
        self.ended
    }

    pub fn result(&self) -> Option<GameResult> {
        if self.ended {
            rules::result(&self.rules, self.board())
        } else {
            None
        }
    }

    /// Pieces per seat on the active board.
    pub fn score(&self) -> [usize; 2] {
        let board = self.board();
        [
            board.count(Seat::First.piece()),
            board.count(Seat::Second.piece()),
        ]
    }

    /// Cells where the current player may place a piece on the active board.
    pub fn legal_moves(&self) -> Vec<Coord> {
        rules::legal_moves(&self.rules, self.board(), self.current)
    }

    /// Rebuilds a session from saved parts.
    ///
    /// The session is created exactly like a new one, then the saved turn,
    /// counters and boards replace the fresh ones.
    pub fn restore(
        kind: VariantKind,
        id: u32,
        config: &SessionConfig,
        saved: SavedSession,
    ) -> Result<Self, RestoreError> {
        let mut session = Self::new(kind, id, config);
        let size = kind.board_size();
        if saved.boards.is_empty() {
            return Err(RestoreError::NoBoards);
        }
        if let Some(board) = saved.boards.iter().find(|board| board.size() != size) {
            return Err(RestoreError::BoardSize {
                expected: size,
                found: board.size(),
            });
        }
        if saved.active_board >= saved.boards.len() {
            return Err(RestoreError::ActiveBoard {
                index: saved.active_board,
                boards: saved.boards.len(),
            });
        }
        match (&mut session.rules, saved.gomoku) {
            (Rules::Gomoku(state), Some(saved_state)) => *state = saved_state,
            (_, None) => {}
            (_, Some(_)) => return Err(RestoreError::UnexpectedCounters { kind }),
        }
        session.boards = saved.boards;
        session.active_board = saved.active_board;
        session.current = saved.current;
        session.check_ended();
        Ok(session)
    }
}

/// The parts of a session that are written to a save file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SavedSession {
    pub current: Seat,
    pub active_board: usize,
    pub gomoku: Option<GomokuState>,
    pub boards: Vec<Board>,
}

/// The error type for [`GameSession::restore()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RestoreError {
    NoBoards,
    BoardSize { expected: i8, found: i8 },
    ActiveBoard { index: usize, boards: usize },
    UnexpectedCounters { kind: VariantKind },
}

impl std::error::Error for RestoreError {}

impl std::fmt::Display for RestoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RestoreError::NoBoards => write!(f, "A saved game must have at least one board"),
            RestoreError::BoardSize { expected, found } => write!(
                f,
                "Expected a {}x{} board, but found a {}x{} one",
                expected, expected, found, found
            ),
            RestoreError::ActiveBoard { index, boards } => write!(
                f,
                "Board {} is active, but there are only {} boards",
                index + 1,
                boards
            ),
            RestoreError::UnexpectedCounters { kind } => {
                write!(f, "A {} game cannot have gomoku counters", kind)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{reversi, Piece};

    fn session(kind: VariantKind) -> GameSession {
        GameSession::new(kind, 1, &SessionConfig::default())
    }

    #[test]
    fn peace_alternates_players() {
        let mut game = session(VariantKind::Peace);
        let outcome = game.process_move("1a").unwrap();
        assert_eq!(outcome.seat, Seat::First);
        assert_eq!(game.current_seat(), Seat::Second);
        assert_eq!(game.board().get(0, 0), Piece::Black);
        game.process_move("8H").unwrap();
        assert_eq!(game.board().get(7, 7), Piece::White);
        assert_eq!(game.current_seat(), Seat::First);
    }

    #[test]
    fn rejected_input_changes_nothing() {
        let mut game = session(VariantKind::Reversi);
        let before = game.clone();
        for input in ["", "zz", "9A", "1I", "4D", "1A", "@3D", "pass", "x"] {
            assert!(game.process_move(input).is_err(), "{} was accepted", input);
            assert_eq!(game, before);
        }
        assert!(matches!(
            game.process_move("9A"),
            Err(MoveError::Format(InputFormatError::RankOutOfRange { .. }))
        ));
        assert_eq!(
            game.process_move("4D"),
            Err(MoveError::Illegal(IllegalMove::Occupied {
                coord: Coord::new(3, 3),
                piece: Piece::White
            }))
        );
        assert_eq!(
            game.process_move("pass"),
            Err(MoveError::Illegal(IllegalMove::PassWithLegalMoves))
        );
    }

    #[test]
    fn reversi_opening_move() {
        let mut game = session(VariantKind::Reversi);
        let outcome = game.process_move("3d").unwrap();
        assert_eq!(outcome.flipped, 1);
        assert_eq!(outcome.skipped, None);
        assert_eq!(game.current_seat(), Seat::Second);
        assert_eq!(reversi::score(game.board()), [4, 1]);
        assert!(!game.is_ended());
    }

    #[test]
    fn gomoku_five_in_a_row_ends_immediately() {
        let mut game = session(VariantKind::Gomoku);
        for (black, white) in [("1A", "2A"), ("1B", "2B"), ("1C", "2C"), ("1D", "2D")] {
            assert!(!game.process_move(black).unwrap().ended);
            assert!(!game.process_move(white).unwrap().ended);
        }
        let outcome = game.process_move("1E").unwrap();
        assert!(outcome.ended);
        assert!(game.is_ended());
        assert_eq!(game.result(), Some(GameResult::Winner(Seat::First)));
        assert_eq!(
            game.process_move("5E"),
            Err(MoveError::Illegal(IllegalMove::GameOver))
        );
        assert_eq!(game.gomoku().map(|state| state.round), Some(6));
    }

    #[test]
    fn gomoku_bomb_uses_the_turn() {
        let mut game = session(VariantKind::Gomoku);
        game.process_move("1A").unwrap();
        assert_eq!(
            game.process_move("@1B"),
            Err(MoveError::Illegal(IllegalMove::BombTarget {
                coord: Coord::new(0, 1),
                piece: Piece::Empty
            }))
        );
        assert_eq!(game.gomoku().unwrap().bombs, [2, 3]);
        let outcome = game.process_move("@1a").unwrap();
        assert_eq!(outcome.input, MoveInput::Bomb(Coord::new(0, 0)));
        assert_eq!(game.board().get(0, 0), Piece::Crater);
        assert_eq!(game.gomoku().unwrap().bombs, [2, 2]);
        assert_eq!(game.gomoku().unwrap().round, 2);
        assert_eq!(game.current_seat(), Seat::First);
        assert_eq!(
            game.process_move("1A"),
            Err(MoveError::Illegal(IllegalMove::Occupied {
                coord: Coord::new(0, 0),
                piece: Piece::Crater
            }))
        );
    }

    #[test]
    fn boards_are_independent() {
        let config = SessionConfig {
            boards: 2,
            ..SessionConfig::default()
        };
        let mut game = GameSession::new(VariantKind::Peace, 7, &config);
        game.process_move("1A").unwrap();
        game.select_board(1).unwrap();
        assert_eq!(game.board().get(0, 0), Piece::Empty);
        assert_eq!(game.current_seat(), Seat::Second);
        assert_eq!(
            game.select_board(2),
            Err(IllegalMove::NoSuchBoard { index: 2 })
        );
        assert_eq!(game.board_index(), 1);
        assert_eq!(game.boards()[0].get(0, 0), Piece::Black);
    }

    #[test]
    fn restore_replaces_turn_and_counters() {
        let mut played = session(VariantKind::Gomoku);
        played.process_move("1A").unwrap();
        played.process_move("@1A").unwrap();
        let saved = SavedSession {
            current: played.current_seat(),
            active_board: played.board_index(),
            gomoku: played.gomoku().cloned(),
            boards: played.boards().to_vec(),
        };
        let restored =
            GameSession::restore(VariantKind::Gomoku, 1, &SessionConfig::default(), saved.clone())
                .unwrap();
        assert_eq!(restored, played);

        assert_eq!(
            GameSession::restore(VariantKind::Reversi, 1, &SessionConfig::default(), saved),
            Err(RestoreError::BoardSize {
                expected: 8,
                found: 15
            })
        );
    }
}
