use micromatrix_core::Position;
use micromatrix_game::{CursorEvent, Key, Outcome, PuzzleStatus};

use crate::{action::Action, command::HELP, state::AppState};

/// Shown when an explicit check finds a full grid with wrong letters.
pub const FAILED_ATTEMPT_MESSAGE: &str = "Almost there! Some of the words are incorrect.";

/// What the host loop should do after an action.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ActionEffect {
    pub messages: Vec<String>,
    pub redraw: bool,
    pub quit: bool,
}

#[derive(Debug)]
struct ActionContext<'a> {
    state: &'a mut AppState,
    effect: &'a mut ActionEffect,
}

pub fn handle(state: &mut AppState, action: Action) -> ActionEffect {
    let mut effect = ActionEffect::default();
    let mut ctx = ActionContext {
        state,
        effect: &mut effect,
    };
    log::debug!("handling {action:?}");

    match action {
        Action::Focus(pos) => {
            ctx.dispatch(CursorEvent::Focus(pos));
        }
        Action::Click(pos) => {
            ctx.dispatch(CursorEvent::Click(pos));
        }
        Action::Type { at, text } => ctx.type_text(at, &text),
        Action::Key { at, key } => ctx.press_key(at, key),
        Action::Check => ctx.check(),
        Action::NewPuzzle => {
            ctx.state.new_puzzle();
            ctx.effect.redraw = true;
        }
        Action::Show => ctx.effect.redraw = true,
        Action::Help => ctx.effect.messages.push(HELP.to_owned()),
        Action::Quit => ctx.effect.quit = true,
    }

    effect
}

impl ActionContext<'_> {
    fn dispatch(&mut self, event: CursorEvent) -> Outcome {
        let outcome = self.state.session.dispatch(event);
        self.effect.redraw = true;
        if outcome.solved_now {
            self.celebrate();
        }
        outcome
    }

    fn celebrate(&mut self) {
        match self.state.streak.record_win() {
            Ok(streak) => self
                .effect
                .messages
                .push(format!("Solved! Win streak: {streak}")),
            Err(err) => {
                log::error!("failed to save win streak: {err}");
                self.effect
                    .messages
                    .push(format!("Solved! (streak not saved: {err})"));
            }
        }
    }

    /// Focuses `at` unless it already has focus, then returns the focused cell.
    ///
    /// Refocusing the focused cell would count as a second tap.
    fn focus_target(&mut self, at: Option<Position>) -> Option<Position> {
        if let Some(pos) = at
            && self.state.session.active_cell() != Some(pos)
        {
            self.dispatch(CursorEvent::Focus(pos));
        }
        let target = self.state.session.active_cell();
        if target.is_none() {
            self.effect
                .messages
                .push("No cell has focus. Use `focus X Y` first.".to_owned());
        }
        target
    }

    fn type_text(&mut self, at: Option<Position>, text: &str) {
        let Some(mut pos) = self.focus_target(at) else {
            return;
        };
        for ch in text.chars() {
            let outcome = self.dispatch(CursorEvent::Input(pos, ch));
            pos = outcome.focus.unwrap_or(pos);
        }
    }

    fn press_key(&mut self, at: Option<Position>, key: Key) {
        if let Some(pos) = self.focus_target(at) {
            self.dispatch(CursorEvent::Key(pos, key));
        }
    }

    fn check(&mut self) {
        let evaluation = self.state.session.check();
        self.effect.redraw = true;
        let message = match evaluation.status() {
            PuzzleStatus::Solved => "Solved!".to_owned(),
            PuzzleStatus::FailedAttempt => FAILED_ATTEMPT_MESSAGE.to_owned(),
            PuzzleStatus::InProgress => match evaluation.incorrect_cells.len() {
                0 => "No mistakes so far.".to_owned(),
                1 => "1 letter is wrong.".to_owned(),
                n => format!("{n} letters are wrong."),
            },
        };
        self.effect.messages.push(message);
    }
}
