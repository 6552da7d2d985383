use std::collections::BTreeSet;

use micromatrix_core::{GridModel, LetterGrid, Position, normalize_letter};

/// The overall state of a puzzle attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display, derive_more::IsVariant)]
pub enum PuzzleStatus {
    /// At least one letter slot is still empty.
    #[default]
    #[display("in progress")]
    InProgress,
    /// Every slot is filled but some letters are wrong.
    #[display("failed attempt")]
    FailedAttempt,
    /// Every slot is filled with the expected letter.
    #[display("solved")]
    Solved,
}

/// Who asked for an evaluation.
///
/// A silent check runs after every letter change and only reports the status.
/// An explicit check is requested by the player and also publishes the set of
/// incorrect cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum CheckMode {
    /// Automatic check after a letter change.
    Silent,
    /// Check requested by the player.
    Explicit,
}

/// The result of comparing a letter grid against the placed words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    /// Filled cells whose letter differs from the expected one.
    pub incorrect_cells: BTreeSet<Position>,
    /// `true` if every letter slot is filled.
    pub all_filled: bool,
    /// `true` if no filled cell is incorrect.
    pub all_correct: bool,
}

impl Evaluation {
    /// Classifies the evaluation.
    #[must_use]
    pub fn status(&self) -> PuzzleStatus {
        match (self.all_filled, self.all_correct) {
            (false, _) => PuzzleStatus::InProgress,
            (true, false) => PuzzleStatus::FailedAttempt,
            (true, true) => PuzzleStatus::Solved,
        }
    }
}

/// Compares `letters` against every placed word in `model`.
///
/// Comparison is case-insensitive. A cell shared by two words is checked once
/// per word; a valid layout always agrees on shared letters. A model without
/// placed words is never complete.
#[must_use]
pub fn evaluate(model: &GridModel, letters: &LetterGrid) -> Evaluation {
    let mut incorrect_cells = BTreeSet::new();
    let mut all_filled = !model.words().is_empty();

    for word in model.words() {
        for (pos, expected) in word.cells_with_letters() {
            match letters.get(pos) {
                None => all_filled = false,
                Some(actual) if normalize_letter(actual) != normalize_letter(expected) => {
                    incorrect_cells.insert(pos);
                }
                Some(_) => {}
            }
        }
    }

    let all_correct = incorrect_cells.is_empty();
    Evaluation {
        incorrect_cells,
        all_filled,
        all_correct,
    }
}
