use gridplay::{InputFormatError, VariantKind};

/// One line of console input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Quit,
    /// Print the session listing.
    List,
    /// Append a new session of this variant.
    New(VariantKind),
    /// Make the session at this 0-based position current.
    Switch { index: usize },
    /// Make the board at this 0-based position active in the current session.
    Board { index: usize },
    /// Anything else is handed to the current session as a move.
    Move(String),
}

impl Command {
    /// Reads a command. Positions are typed 1-based.
    pub fn parse(line: &str) -> Result<Command, InputFormatError> {
        let token = line.trim();
        if token.is_empty() {
            return Err(InputFormatError::Empty);
        }
        let lower = token.to_ascii_lowercase();
        if lower == "quit" {
            return Ok(Command::Quit);
        }
        if lower == "list" {
            return Ok(Command::List);
        }
        if let Ok(kind) = lower.parse::<VariantKind>() {
            return Ok(Command::New(kind));
        }
        if let Some(position) = parse_position(token)? {
            return Ok(Command::Switch { index: position });
        }
        if let Some(rest) = lower.strip_prefix('b') {
            if let Some(position) = parse_position(rest)? {
                return Ok(Command::Board { index: position });
            }
        }
        Ok(Command::Move(String::from(token)))
    }
}

// Some(index) for a 1-based decimal position, None if it is not a number at all
fn parse_position(text: &str) -> Result<Option<usize>, InputFormatError> {
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Ok(None);
    }
    match text.parse::<usize>() {
        Ok(position) if position >= 1 => Ok(Some(position - 1)),
        _ => Err(InputFormatError::UnknownCommand {
            token: String::from(text),
        }),
    }
}
