//! Test utilities for driving a [`Session`].
//!
//! This module provides [`SessionTester`], a harness that builds a session
//! from a grid picture and checks the result of each event.
//!
//! # Example
//!
//! ```
//! use micromatrix_core::{Orientation, Position};
//! use micromatrix_game::{PuzzleStatus, testing::SessionTester};
//!
//! SessionTester::new(["CAT", "O--", "W--"], [("Feline", "cat"), ("Bovine", "cow")])
//!     .click(Position::new(0, 0))
//!     .input(Position::new(0, 0), 'c')
//!     .assert_focus(Some(Position::new(1, 0)))
//!     .click(Position::new(0, 0))
//!     .assert_selection(Some(1), Orientation::Down)
//!     .assert_status(PuzzleStatus::InProgress);
//! ```

use micromatrix_codec::Catalog;
use micromatrix_core::{
    GridModel, LayoutGenerator as _, Orientation, PictureLayout, Position, WordEntry,
};

use crate::{
    CursorEvent, Key, Outcome, PlatformMode, PuzzleStatus, Session, SessionOptions,
};

/// Builds the grid model for a grid picture whose words are `answers`.
///
/// Each answer gets the clue `"Clue for <answer>"`.
#[must_use]
pub fn model_from_picture(rows: &[&str], answers: &[&str]) -> GridModel {
    let words = answers
        .iter()
        .map(|answer| WordEntry::new(format!("Clue for {answer}"), *answer))
        .collect::<Vec<_>>();
    GridModel::from_layout(&PictureLayout::new(rows).generate(&words))
}

/// The smallest grid with an intersection: `CAT` across and `COW` down
/// sharing the top-left `C`.
#[must_use]
pub fn cat_cow_model() -> GridModel {
    model_from_picture(&["CAT", "O--", "W--"], &["cat", "cow"])
}

/// A test harness for sessions.
///
/// All methods return `self`, enabling fluent method chaining. Assertion
/// methods panic with detailed messages on failure, using `#[track_caller]`
/// to report the correct source location.
#[derive(Debug)]
pub struct SessionTester {
    session: Session,
    generator: PictureLayout,
    last: Option<Outcome>,
}

impl SessionTester {
    /// Creates a pointer-mode session from a grid picture and `(clue, answer)` pairs.
    ///
    /// # Panics
    ///
    /// Panics if an answer cannot be encoded.
    #[track_caller]
    pub fn new<R, S, W>(rows: R, words: W) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: IntoIterator<Item = (&'static str, &'static str)>,
    {
        Self::with_mode(rows, words, PlatformMode::Pointer)
    }

    /// Creates a session with an explicit platform mode.
    ///
    /// # Panics
    ///
    /// Panics if an answer cannot be encoded.
    #[track_caller]
    pub fn with_mode<R, S, W>(rows: R, words: W, platform_mode: PlatformMode) -> Self
    where
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
        W: IntoIterator<Item = (&'static str, &'static str)>,
    {
        let words = words
            .into_iter()
            .map(|(clue, answer)| WordEntry::new(clue, answer))
            .collect();
        let catalog = Catalog::build(words).unwrap();
        let mut generator = PictureLayout::new(rows);
        let session = Session::new(catalog, &mut generator, SessionOptions { platform_mode });
        Self {
            session,
            generator,
            last: None,
        }
    }

    /// Returns the session under test.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Dispatches an event and records its outcome.
    #[must_use]
    pub fn dispatch(mut self, event: CursorEvent) -> Self {
        self.last = Some(self.session.dispatch(event));
        self
    }

    /// Dispatches [`CursorEvent::Focus`].
    #[must_use]
    pub fn focus(self, pos: Position) -> Self {
        self.dispatch(CursorEvent::Focus(pos))
    }

    /// Dispatches [`CursorEvent::Click`].
    #[must_use]
    pub fn click(self, pos: Position) -> Self {
        self.dispatch(CursorEvent::Click(pos))
    }

    /// Dispatches [`CursorEvent::Input`].
    #[must_use]
    pub fn input(self, pos: Position, ch: char) -> Self {
        self.dispatch(CursorEvent::Input(pos, ch))
    }

    /// Dispatches [`CursorEvent::Key`].
    #[must_use]
    pub fn key(self, pos: Position, key: Key) -> Self {
        self.dispatch(CursorEvent::Key(pos, key))
    }

    /// Types `text` starting at the focused cell, following focus moves.
    ///
    /// # Panics
    ///
    /// Panics if no cell has focus.
    #[track_caller]
    #[must_use]
    pub fn type_text(mut self, text: &str) -> Self {
        for ch in text.chars() {
            let pos = self
                .session
                .active_cell()
                .unwrap_or_else(|| panic!("Expected a focused cell before typing {ch:?}"));
            self = self.input(pos, ch);
        }
        self
    }

    /// Runs an explicit check.
    #[must_use]
    pub fn check(mut self) -> Self {
        self.session.check();
        self
    }

    /// Generates a new puzzle from the same picture.
    #[must_use]
    pub fn new_puzzle(mut self) -> Self {
        self.session.new_puzzle(&mut self.generator);
        self.last = None;
        self
    }

    /// Asserts the focus move reported by the last event.
    ///
    /// # Panics
    ///
    /// Panics if no event was dispatched or the focus move differs.
    #[track_caller]
    pub fn assert_focus(self, expected: Option<Position>) -> Self {
        let outcome = self.last.expect("Expected an event to have been dispatched");
        assert_eq!(
            outcome.focus, expected,
            "Expected focus move to {expected:?}, but got {:?}",
            outcome.focus
        );
        self
    }

    /// Asserts the focused cell.
    ///
    /// # Panics
    ///
    /// Panics if the focused cell differs.
    #[track_caller]
    pub fn assert_active_cell(self, expected: Option<Position>) -> Self {
        let actual = self.session.active_cell();
        assert_eq!(
            actual, expected,
            "Expected active cell {expected:?}, but got {actual:?}"
        );
        self
    }

    /// Asserts the active selection.
    ///
    /// # Panics
    ///
    /// Panics if the selection differs.
    #[track_caller]
    pub fn assert_selection(self, clue_number: Option<u32>, orientation: Orientation) -> Self {
        let actual = self.session.selection();
        assert_eq!(
            (actual.clue_number, actual.orientation),
            (clue_number, orientation),
            "Expected selection {clue_number:?} {orientation}, but got {actual:?}"
        );
        self
    }

    /// Asserts the letter stored at `pos`.
    ///
    /// # Panics
    ///
    /// Panics if the letter differs.
    #[track_caller]
    pub fn assert_letter(self, pos: Position, expected: Option<char>) -> Self {
        let actual = self.session.letters().get(pos);
        assert_eq!(
            actual, expected,
            "Expected letter {expected:?} at {pos}, but got {actual:?}"
        );
        self
    }

    /// Asserts the puzzle status.
    ///
    /// # Panics
    ///
    /// Panics if the status differs.
    #[track_caller]
    pub fn assert_status(self, expected: PuzzleStatus) -> Self {
        let actual = self.session.status();
        assert_eq!(
            actual, expected,
            "Expected status {expected}, but got {actual}"
        );
        self
    }

    /// Asserts the cells currently flagged as incorrect.
    ///
    /// # Panics
    ///
    /// Panics if the flagged cells differ.
    #[track_caller]
    pub fn assert_incorrect<C>(self, expected: C) -> Self
    where
        C: IntoIterator<Item = Position>,
    {
        let mut expected = expected.into_iter().collect::<Vec<_>>();
        expected.sort();
        let actual = self
            .session
            .incorrect_cells()
            .iter()
            .copied()
            .collect::<Vec<_>>();
        assert_eq!(
            actual, expected,
            "Expected incorrect cells {expected:?}, but got {actual:?}"
        );
        self
    }

    /// Asserts that no cell is flagged as incorrect.
    ///
    /// # Panics
    ///
    /// Panics if any cell is flagged.
    #[track_caller]
    pub fn assert_no_incorrect(self) -> Self {
        let actual = self.session.incorrect_cells();
        assert!(
            actual.is_empty(),
            "Expected no incorrect cells, but got {actual:?}"
        );
        self
    }

    /// Asserts whether the last event solved the puzzle.
    ///
    /// # Panics
    ///
    /// Panics if no event was dispatched or `solved_now` differs.
    #[track_caller]
    pub fn assert_solved_now(self, expected: bool) -> Self {
        let outcome = self.last.expect("Expected an event to have been dispatched");
        assert_eq!(
            outcome.solved_now, expected,
            "Expected solved_now to be {expected}, but got {}",
            outcome.solved_now
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    const CAT_COW: [&str; 3] = ["CAT", "O--", "W--"];
    const CAT_COW_WORDS: [(&str, &str); 2] = [("Feline", "cat"), ("Bovine", "cow")];

    #[test]
    fn test_toggle_and_advance() {
        SessionTester::new(CAT_COW, CAT_COW_WORDS)
            .click(pos(0, 0))
            .assert_selection(Some(1), Orientation::Across)
            .input(pos(0, 0), 'C')
            .assert_focus(Some(pos(1, 0)))
            .click(pos(0, 0))
            .assert_selection(Some(1), Orientation::Down)
            .click(pos(0, 0))
            .assert_selection(Some(1), Orientation::Across);
    }

    #[test]
    fn test_type_text_fills_word_and_stops() {
        SessionTester::new(CAT_COW, CAT_COW_WORDS)
            .focus(pos(0, 0))
            .type_text("cat")
            .assert_focus(None)
            .assert_active_cell(Some(pos(2, 0)))
            .assert_letter(pos(1, 0), Some('A'))
            .assert_status(PuzzleStatus::InProgress);
    }

    #[test]
    fn test_full_solve() {
        SessionTester::new(CAT_COW, CAT_COW_WORDS)
            .focus(pos(0, 0))
            .type_text("cat")
            .focus(pos(0, 1))
            .type_text("o")
            .assert_solved_now(false)
            .type_text("w")
            .assert_solved_now(true)
            .assert_status(PuzzleStatus::Solved);
    }

    #[test]
    fn test_check_flags_and_unflags() {
        SessionTester::new(CAT_COW, CAT_COW_WORDS)
            .focus(pos(0, 0))
            .type_text("cax")
            .check()
            .assert_incorrect([pos(2, 0)])
            .assert_status(PuzzleStatus::InProgress)
            .input(pos(2, 0), 't')
            .assert_no_incorrect();
    }

    #[test]
    fn test_backspace_walks_back_on_pointer() {
        SessionTester::new(CAT_COW, CAT_COW_WORDS)
            .focus(pos(2, 0))
            .key(pos(2, 0), Key::Backspace)
            .assert_focus(Some(pos(1, 0)))
            .key(pos(1, 0), Key::Backspace)
            .assert_focus(Some(pos(0, 0)))
            .key(pos(0, 0), Key::Backspace)
            .assert_focus(None)
            .assert_active_cell(Some(pos(0, 0)));
    }

    #[test]
    fn test_backspace_stays_on_touch() {
        SessionTester::with_mode(CAT_COW, CAT_COW_WORDS, PlatformMode::Touch)
            .focus(pos(0, 0))
            .type_text("ca")
            .key(pos(2, 0), Key::Backspace)
            .assert_focus(None)
            .key(pos(1, 0), Key::Backspace)
            .assert_letter(pos(1, 0), None)
            .assert_active_cell(Some(pos(1, 0)));
    }

    #[test]
    fn test_new_puzzle_clears_state() {
        SessionTester::new(CAT_COW, CAT_COW_WORDS)
            .focus(pos(0, 2))
            .type_text("q")
            .check()
            .new_puzzle()
            .assert_no_incorrect()
            .assert_letter(pos(0, 2), None)
            .assert_active_cell(None)
            .assert_selection(Some(1), Orientation::Across);
    }
}
