//! Plain-text rendering of a session.
//!
//! Cells are three characters wide:
//!
//! - `###` blocked
//! - ` . ` empty, ` A ` filled
//! - `[A]` focused
//! - `(A)` flagged by the last check
//! - `<A>` part of the active word

use micromatrix_core::{Orientation, Position};
use micromatrix_game::Session;

#[must_use]
pub fn render(session: &Session, streak: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("streak: {streak}   status: {}\n", session.status()));
    out.push_str(&session.active_clue_label());
    out.push_str("\n\n");
    render_grid(&mut out, session);
    out.push('\n');
    render_clues(&mut out, session);
    out
}

fn render_grid(out: &mut String, session: &Session) {
    let model = session.model();
    if model.is_empty() {
        out.push_str("(no words could be placed)\n");
        return;
    }

    out.push_str("   ");
    for x in 0..model.cols() {
        out.push_str(&format!("{x:^3}"));
    }
    out.push('\n');

    let active_word = session.active_word();
    for y in 0..model.rows() {
        out.push_str(&format!("{y:>2} "));
        for x in 0..model.cols() {
            let pos = Position::new(x, y);
            if !model.is_slot(pos) {
                out.push_str("###");
                continue;
            }
            let letter = session.letters().get(pos).unwrap_or('.');
            let (open, close) = if session.active_cell() == Some(pos) {
                ('[', ']')
            } else if session.incorrect_cells().contains(&pos) {
                ('(', ')')
            } else if active_word.is_some_and(|word| word.contains(pos)) {
                ('<', '>')
            } else {
                (' ', ' ')
            };
            out.push(open);
            out.push(letter);
            out.push(close);
        }
        out.push('\n');
    }
}

fn render_clues(out: &mut String, session: &Session) {
    let selection = session.selection();
    for orientation in Orientation::ALL {
        let mut words = session
            .model()
            .words()
            .iter()
            .filter(|word| word.orientation() == orientation)
            .peekable();
        if words.peek().is_none() {
            continue;
        }
        out.push_str(&format!("{orientation}\n"));
        for word in words {
            let marker = if selection.clue_number == Some(word.clue_number())
                && selection.orientation == orientation
            {
                '>'
            } else {
                ' '
            };
            let done = if session.is_word_verified(word.id()) {
                "  done"
            } else {
                ""
            };
            out.push_str(&format!(
                "{marker} {:>2}. {} ({}){done}\n",
                word.clue_number(),
                word.clue(),
                word.len()
            ));
        }
    }
}
