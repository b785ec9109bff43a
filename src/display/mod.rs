use crate::core::{Grid, PlayerId, PlayerSlot, COLS, ROWS};
use crossterm::{cursor, execute, style::Stylize, terminal};
use std::io::stdout;

/// Transient render inputs the session owns between frames.
pub struct DisplayState {
    /// Column the human cursor hovers over, if a human may move.
    pub cursor_col: Option<usize>,
    pub active: Option<PlayerId>,
    pub highlights: Vec<(usize, usize)>,
    pub status_msg: Option<String>,
    pub hint_msg: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            cursor_col: None,
            active: None,
            highlights: Vec::new(),
            status_msg: None,
            hint_msg: None,
        }
    }
}

pub fn render_board(grid: &Grid, slots: &[PlayerSlot; 2], state: &DisplayState) {
    let mut out = stdout();

    // Full clear, otherwise leftover status lines scroll the board
    execute!(
        out,
        terminal::Clear(terminal::ClearType::All),
        cursor::MoveTo(0, 0)
    )
    .ok();

    print!("=== Connect X ===\r\n");
    if let Some(msg) = &state.status_msg {
        print!("{}\r\n", msg.clone().bold().yellow());
    } else {
        print!("\r\n");
    }
    print!("\r\n");

    render_players(slots, state);

    // Column labels
    print!("   ");
    for col in 0..COLS {
        print!(" {}  ", col + 1);
    }
    print!("\r\n");

    // Human column cursor
    print!("   ");
    for col in 0..COLS {
        if state.cursor_col == Some(col) {
            print!(" {}  ", "v".bold().yellow());
        } else {
            print!("    ");
        }
    }
    print!("\r\n");

    print!("  +{}+\r\n", "----".repeat(COLS));
    for row in 0..ROWS {
        print!("  |");
        for col in 0..COLS {
            let is_highlight = state.highlights.contains(&(row, col));
            let (prefix, suffix) = if is_highlight { ("{", "}") } else { (" ", " ") };
            let disc = match grid.get(row, col) {
                Some(PlayerId::Player1) => "o".red(),
                Some(PlayerId::Player2) => "o".blue(),
                None => ".".dim(),
            };
            if is_highlight {
                print!("{}{}{} ", prefix.yellow(), disc.bold(), suffix.yellow());
            } else {
                print!("{}{}{} ", prefix, disc, suffix);
            }
        }
        print!("|\r\n");
    }
    print!("  +{}+\r\n", "----".repeat(COLS));

    if let Some(hint) = &state.hint_msg {
        print!("\r\n{}\r\n", hint.clone().dim());
    }
}

fn render_players(slots: &[PlayerSlot; 2], state: &DisplayState) {
    for slot in slots {
        let disc = match slot.id {
            PlayerId::Player1 => "o".red(),
            PlayerId::Player2 => "o".blue(),
        };
        let marker = if state.active == Some(slot.id) {
            "> ".bold().yellow()
        } else {
            "  ".stylize()
        };
        print!("{}{} {}  ({})\r\n", marker, disc, slot.id.label(), slot.kind);
    }
    print!("\r\n");
}
