use crate::{GameSession, MoveError, MoveOutcome};

/// A gomoku game that shows off bombs and ends with a white five in file B.
pub const GOMOKU_DEMO_SCRIPT: [&str; 12] = [
    "1A", "1B", "2A", "2B", "3A", "@3A", "4A", "3B", "5A", "4B", "6A", "5B",
];

/// What one call to [`DemoPlayer::tick()`] did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Tick {
    Played {
        input: String,
        result: Result<MoveOutcome, MoveError>,
    },
    /// The script ran out or the game is over.
    Finished,
    Cancelled,
}

/// Plays a fixed list of inputs into a session, one per tick.
///
/// Moves go through [`GameSession::process_move()`] like typed input does.
#[derive(Clone, Debug)]
pub struct DemoPlayer {
    script: Vec<String>,
    next: usize,
    cancelled: bool,
}

impl DemoPlayer {
    pub fn new<I, S>(script: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: script.into_iter().map(Into::into).collect(),
            next: 0,
            cancelled: false,
        }
    }

    pub fn gomoku() -> Self {
        Self::new(GOMOKU_DEMO_SCRIPT)
    }

    /// Stops the player before its next move.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    /// Inputs not yet played.
    pub fn remaining(&self) -> &[String] {
        &self.script[self.next..]
    }

    pub fn tick(&mut self, session: &mut GameSession) -> Tick {
        if self.cancelled {
            return Tick::Cancelled;
        }
        if session.is_ended() {
            return Tick::Finished;
        }
        let Some(input) = self.script.get(self.next).cloned() else {
            return Tick::Finished;
        };
        self.next += 1;
        let result = session.process_move(&input);
        Tick::Played { input, result }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GameResult, Piece, Seat, SessionConfig, VariantKind};

    fn gomoku_session() -> GameSession {
        GameSession::new(VariantKind::Gomoku, 1, &SessionConfig::default())
    }

    #[test]
    fn demo_ends_with_white_five() {
        let mut session = gomoku_session();
        let mut demo = DemoPlayer::gomoku();
        let mut played = 0;
        loop {
            match demo.tick(&mut session) {
                Tick::Played { input, result } => {
                    assert!(result.is_ok(), "{} was rejected: {:?}", input, result);
                    played += 1;
                }
                Tick::Finished => break,
                Tick::Cancelled => unreachable!(),
            }
        }
        assert_eq!(played, GOMOKU_DEMO_SCRIPT.len());
        assert_eq!(session.result(), Some(GameResult::Winner(Seat::Second)));
        assert_eq!(session.board().get(2, 0), Piece::Crater);
        let state = session.gomoku().unwrap();
        assert_eq!(state.bombs, [2, 2]);
        assert_eq!(state.round, 7);
        assert!(demo.remaining().is_empty());
    }

    #[test]
    fn cancel_is_checked_first() {
        let mut session = gomoku_session();
        let mut demo = DemoPlayer::gomoku();
        assert!(matches!(demo.tick(&mut session), Tick::Played { .. }));
        demo.cancel();
        let before = session.clone();
        assert_eq!(demo.tick(&mut session), Tick::Cancelled);
        assert_eq!(session, before);
        assert_eq!(demo.remaining().len(), GOMOKU_DEMO_SCRIPT.len() - 1);
    }

    #[test]
    fn stops_on_a_finished_game() {
        let mut session = gomoku_session();
        for input in ["1A", "2A", "1B", "2B", "1C", "2C", "1D", "2D", "1E"] {
            session.process_move(input).unwrap();
        }
        let mut demo = DemoPlayer::gomoku();
        assert_eq!(demo.tick(&mut session), Tick::Finished);
        assert_eq!(demo.remaining().len(), GOMOKU_DEMO_SCRIPT.len());
    }
}
