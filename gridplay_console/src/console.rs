use std::error::Error;
use std::path::Path;

use gridplay::{
    describe_result, render_listing, render_session, GameSession, MoveError, MoveInput,
    MoveOutcome, SessionRegistry,
};
use tracing::{debug, info, warn};

use crate::command::Command;
use crate::recording::{RecordedCommand, Recorder};
use crate::save::save;

/// Whether the console keeps reading input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What the console answers to one line of input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reply {
    pub flow: Flow,
    pub accepted: bool,
    pub message: String,
}

impl Reply {
    fn accepted(message: String) -> Self {
        Self {
            flow: Flow::Continue,
            accepted: true,
            message,
        }
    }

    fn rejected(message: String) -> Self {
        Self {
            flow: Flow::Continue,
            accepted: false,
            message,
        }
    }
}

/// Owns the open games and turns input lines into operations on them.
pub struct Console {
    registry: SessionRegistry,
    recorder: Option<Recorder>,
}

impl Console {
    pub fn new(registry: SessionRegistry, recorder: Option<Recorder>) -> Self {
        Self { registry, recorder }
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    /// The current game drawn as text.
    pub fn render(&self) -> String {
        match self.registry.current() {
            Some(session) => render_session(session),
            None => String::from("No game is open."),
        }
    }

    /// Handles one line of input. Errors in the input are reported in the
    /// reply and never end the console.
    pub fn dispatch(&mut self, line: &str) -> Reply {
        let session_id = self.registry.current().map(GameSession::id);
        let player = self
            .registry
            .current()
            .map(|session| String::from(session.current_player().name()));
        let reply = match Command::parse(line) {
            Ok(command) => self.execute(command),
            Err(err) => {
                debug!(input = line.trim(), "{}", err);
                Reply::rejected(err.to_string())
            }
        };
        if let Some(recorder) = &mut self.recorder {
            recorder.store_command(RecordedCommand {
                session_id,
                player,
                input: String::from(line.trim()),
                accepted: reply.accepted,
                message: reply.message.clone(),
            });
        }
        reply
    }

    fn execute(&mut self, command: Command) -> Reply {
        match command {
            Command::Quit => Reply {
                flow: Flow::Quit,
                accepted: true,
                message: String::from("Goodbye."),
            },
            Command::List => Reply::accepted(render_listing(&self.registry)),
            Command::New(kind) => {
                let id = self.registry.create(kind).id();
                let position = self.registry.sessions().len();
                info!(session = id, variant = %kind, "Created game");
                Reply::accepted(format!(
                    "Created {} game #{}, enter {} to switch to it.",
                    kind, id, position
                ))
            }
            Command::Switch { index } => {
                if self.registry.switch_to(index) {
                    debug!(index, "Switched game");
                    Reply::accepted(format!("Switched to game {}.", index + 1))
                } else {
                    Reply::rejected(format!("There is no game {}.", index + 1))
                }
            }
            Command::Board { index } => {
                let Some(session) = self.registry.current_mut() else {
                    return Reply::rejected(String::from("No game is open."));
                };
                match session.select_board(index) {
                    Ok(()) => {
                        debug!(session = session.id(), board = index, "Switched board");
                        Reply::accepted(format!("Switched to board {}.", index + 1))
                    }
                    Err(err) => Reply::rejected(err.to_string()),
                }
            }
            Command::Move(text) => {
                let Some(session) = self.registry.current_mut() else {
                    return Reply::rejected(String::from("No game is open."));
                };
                match session.process_move(&text) {
                    Ok(outcome) => {
                        info!(session = session.id(), input = %text, "Move played");
                        Reply::accepted(describe_outcome(session, &outcome))
                    }
                    Err(err) => {
                        debug!(session = session.id(), input = %text, "{:?}", err);
                        Reply::rejected(describe_error(&err))
                    }
                }
            }
        }
    }

    /// Saves all games (unless `save_file` is `None`) and flushes the
    /// recording.
    ///
    /// Failures are logged and never turn into an error, so quitting always
    /// succeeds.
    pub fn finish(&mut self, save_file: Option<&Path>) {
        if let Some(path) = save_file {
            match save(path, &self.registry) {
                Ok(()) => info!(path = %path.display(), "Saved games"),
                Err(err) => log_failure("Could not save the games", err.as_ref()),
            }
        }
        if let Some(recorder) = &mut self.recorder {
            match recorder.write_recording() {
                Ok(Some(path)) => info!(path = %path.display(), "Wrote recording"),
                Ok(None) => {}
                Err(err) => log_failure("Could not write the recording", err.as_ref()),
            }
        }
    }
}

fn log_failure(context: &str, err: &(dyn Error + 'static)) {
    warn!("{}", context);
    let mut err_dyn = err;
    while let Some(src_err) = err_dyn.source() {
        warn!("{}", err_dyn);
        err_dyn = src_err;
    }
    warn!("{}", err_dyn);
}

fn describe_outcome(session: &GameSession, outcome: &MoveOutcome) -> String {
    let name = session.player(outcome.seat).name();
    let mut message = match outcome.input {
        MoveInput::Place(coord) => format!("{} played {}.", name, coord),
        MoveInput::Bomb(coord) => format!("{} bombed {}.", name, coord),
        MoveInput::Pass => format!("{} passed.", name),
    };
    if outcome.flipped > 0 {
        message += &format!(" {} flipped.", outcome.flipped);
    }
    if let Some(seat) = outcome.skipped {
        message += &format!(" {} has no move and is skipped.", session.player(seat).name());
    }
    if let Some(result) = describe_result(session) {
        message += " ";
        message += &result;
    }
    message
}

// The move error itself only says which kind of error happened
fn describe_error(err: &MoveError) -> String {
    match err.source() {
        Some(inner) => format!("{}: {}", err, inner),
        None => err.to_string(),
    }
}
