use crate::{
    format_file, format_rank, Coord, GameResult, GameSession, Piece, SessionRegistry, VariantKind,
};

/// Marks a cell where the player to move may play a reversi piece.
pub const HINT_SYMBOL: char = '+';

/// Draws the active board with labels, and a panel describing the game to
/// the right of it.
pub fn render_session(session: &GameSession) -> String {
    let board = session.board();
    let size = board.size();
    let hints: Vec<Coord> = if session.kind() == VariantKind::Reversi && !session.is_ended() {
        session.legal_moves()
    } else {
        Vec::new()
    };
    let panel = side_panel(session);

    let mut result = String::from("    ");
    for col in 0..size {
        result.push(format_file(col));
        result.push(' ');
    }
    result += "\n   ╭";
    for _ in 0..size {
        result += "──";
    }
    result += "╮\n";
    for row in 0..size {
        result += &format!("{:>2} │", format_rank(row));
        for (col, &piece) in board.row(row).iter().enumerate() {
            let col = col as i8;
            let symbol = if piece == Piece::Empty && hints.contains(&Coord::new(row, col)) {
                HINT_SYMBOL
            } else {
                piece.symbol()
            };
            result.push(symbol);
            result.push(' ');
        }
        result += "│";
        if let Some(line) = panel.get(row as usize) {
            result += "   ";
            result += line;
        }
        result += "\n";
    }
    result += "   ╰";
    for _ in 0..size {
        result += "──";
    }
    result += "╯";
    // Anything that did not fit next to the board
    for line in panel.iter().skip(size as usize) {
        result += "\n";
        result += line;
    }
    result
}

fn side_panel(session: &GameSession) -> Vec<String> {
    let mut lines = vec![format!("{} #{}", session.kind(), session.id())];
    if session.boards().len() > 1 {
        lines.push(format!(
            "Board {} of {}",
            session.board_index() + 1,
            session.boards().len()
        ));
    }
    lines.push(String::new());
    for player in session.players() {
        let marker = if !session.is_ended() && player == session.current_player() {
            '▶'
        } else {
            ' '
        };
        lines.push(format!("{} {} {}", marker, player.piece().symbol(), player.name()));
    }
    match session.kind() {
        VariantKind::Reversi => {
            let [first, second] = session.score();
            lines.push(format!("Score: {} - {}", first, second));
        }
        VariantKind::Gomoku => {
            if let Some(state) = session.gomoku() {
                lines.push(format!("Round {}", state.round));
                lines.push(format!("Bombs: {} - {}", state.bombs[0], state.bombs[1]));
            }
        }
        VariantKind::Peace => {}
    }
    if let Some(result) = describe_result(session) {
        lines.push(String::new());
        lines.push(result);
    }
    lines
}

/// A sentence announcing the result, if the game is over.
pub fn describe_result(session: &GameSession) -> Option<String> {
    session.result().map(|result| match result {
        GameResult::Winner(seat) => format!("{} wins!", session.player(seat).name()),
        GameResult::Draw => String::from("It's a draw."),
    })
}

/// One line per session, e.g. `2. reversi (current)`.
pub fn render_listing(registry: &SessionRegistry) -> String {
    registry
        .listing()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
