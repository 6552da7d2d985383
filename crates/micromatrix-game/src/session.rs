use std::collections::BTreeSet;

use micromatrix_codec::{Catalog, RecordId};
use micromatrix_core::{GridModel, LayoutGenerator, LetterGrid, PlacedWord, Position, WordId};

use crate::{
    CheckMode, Cursor, CursorEvent, Effect, Evaluation, PlatformMode, PuzzleStatus, Selection,
    evaluate,
};

/// Label shown when no clue is active.
pub const PLACEHOLDER_CLUE: &str = "1. Insert clue here";

/// Host-supplied configuration for a [`Session`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
    /// Input contract of the host device.
    pub platform_mode: PlatformMode,
}

/// What changed while handling one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// Cell the host should move focus to after repainting.
    pub focus: Option<Position>,
    /// Active selection after the event.
    pub selection: Selection,
    /// Puzzle status after the event.
    pub status: PuzzleStatus,
    /// `true` on the single event that first solved this puzzle.
    pub solved_now: bool,
    /// `true` if any letter was written or cleared.
    pub letters_changed: bool,
}

/// Everything that belongs to one puzzle generation.
#[derive(Debug, Clone)]
struct Puzzle {
    model: GridModel,
    letters: LetterGrid,
    cursor: Cursor,
    incorrect: BTreeSet<Position>,
    status: PuzzleStatus,
    solved: bool,
}

impl Puzzle {
    fn generate<G>(catalog: &Catalog, generator: &mut G, options: SessionOptions) -> Self
    where
        G: LayoutGenerator + ?Sized,
    {
        let layout = {
            let words = catalog.decoded_answers();
            generator.generate(&words)
        };
        let model = GridModel::from_layout(&layout);
        log::info!(
            "new puzzle: {}x{} grid, {} words placed, {} unplaced",
            model.cols(),
            model.rows(),
            model.words().len(),
            model.unplaced().len()
        );

        let letters = LetterGrid::for_model(&model);
        let cursor = Cursor::new(&model, options.platform_mode);
        Self {
            model,
            letters,
            cursor,
            incorrect: BTreeSet::new(),
            status: PuzzleStatus::InProgress,
            solved: false,
        }
    }

    /// Runs a check and returns `true` if it solved the puzzle for the first time.
    fn run_check(&mut self, mode: CheckMode) -> (Evaluation, bool) {
        let evaluation = evaluate(&self.model, &self.letters);
        if mode.is_explicit() {
            self.incorrect.clone_from(&evaluation.incorrect_cells);
        }
        self.status = evaluation.status();
        log::debug!("{mode:?} check: {}", self.status);

        let solved_now = self.status.is_solved() && !self.solved;
        if solved_now {
            self.solved = true;
            log::info!("puzzle solved");
        }
        (evaluation, solved_now)
    }
}

/// A player's session with one catalog.
///
/// Owns the catalog and the state of the current puzzle generation: the grid
/// model, the letters entered so far, the cursor, and the cells flagged by
/// the last explicit check. Generating a new puzzle replaces all of that at
/// once.
#[derive(Debug, Clone)]
pub struct Session {
    options: SessionOptions,
    catalog: Catalog,
    puzzle: Puzzle,
}

impl Session {
    /// Creates a session and generates its first puzzle.
    #[must_use]
    pub fn new<G>(catalog: Catalog, generator: &mut G, options: SessionOptions) -> Self
    where
        G: LayoutGenerator + ?Sized,
    {
        let puzzle = Puzzle::generate(&catalog, generator, options);
        Self {
            options,
            catalog,
            puzzle,
        }
    }

    /// Discards the current puzzle and generates a new one.
    pub fn new_puzzle<G>(&mut self, generator: &mut G)
    where
        G: LayoutGenerator + ?Sized,
    {
        self.puzzle = Puzzle::generate(&self.catalog, generator, self.options);
    }

    /// Handles one input event.
    ///
    /// Effects produced by the cursor are applied in order before returning,
    /// so a deferred focus move always lands before the next event. A silent
    /// check runs whenever a letter changed.
    pub fn dispatch(&mut self, event: CursorEvent) -> Outcome {
        let puzzle = &mut self.puzzle;
        let effects = puzzle.cursor.handle(&puzzle.model, &puzzle.letters, event);

        let mut focus = None;
        let mut letters_changed = false;
        for effect in effects {
            match effect {
                Effect::SetLetter { pos, letter } => {
                    if !puzzle.model.is_slot(pos) {
                        continue;
                    }
                    letters_changed |= puzzle.letters.set(pos, letter);
                    puzzle.incorrect.remove(&pos);
                }
                Effect::MoveFocus(pos) => {
                    puzzle.cursor.settle_focus(&puzzle.model, pos);
                    focus = Some(pos);
                }
            }
        }

        let solved_now = letters_changed && puzzle.run_check(CheckMode::Silent).1;
        Outcome {
            focus,
            selection: puzzle.cursor.selection(),
            status: puzzle.status,
            solved_now,
            letters_changed,
        }
    }

    /// Runs an explicit check and flags every filled cell holding a wrong letter.
    pub fn check(&mut self) -> Evaluation {
        self.puzzle.run_check(CheckMode::Explicit).0
    }

    /// Returns the catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the host's platform mode.
    #[must_use]
    pub const fn platform_mode(&self) -> PlatformMode {
        self.options.platform_mode
    }

    /// Returns the grid model of the current puzzle.
    #[must_use]
    pub const fn model(&self) -> &GridModel {
        &self.puzzle.model
    }

    /// Returns the letters entered so far.
    #[must_use]
    pub const fn letters(&self) -> &LetterGrid {
        &self.puzzle.letters
    }

    /// Returns the active selection.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.puzzle.cursor.selection()
    }

    /// Returns the focused cell.
    #[must_use]
    pub const fn active_cell(&self) -> Option<Position> {
        self.puzzle.cursor.active_cell()
    }

    /// Returns the active word.
    #[must_use]
    pub fn active_word(&self) -> Option<&PlacedWord> {
        self.puzzle.cursor.active_word(&self.puzzle.model)
    }

    /// Returns the active clue as `"N. clue"`, or [`PLACEHOLDER_CLUE`].
    #[must_use]
    pub fn active_clue_label(&self) -> String {
        self.active_word().map_or_else(
            || PLACEHOLDER_CLUE.to_owned(),
            |word| format!("{}. {}", word.clue_number(), word.clue()),
        )
    }

    /// Returns the cells flagged by the last explicit check that have not
    /// been edited since.
    #[must_use]
    pub const fn incorrect_cells(&self) -> &BTreeSet<Position> {
        &self.puzzle.incorrect
    }

    /// Returns the status computed by the last check.
    #[must_use]
    pub const fn status(&self) -> PuzzleStatus {
        self.puzzle.status
    }

    /// Returns `true` once the current puzzle has been solved.
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        self.puzzle.solved
    }

    /// Returns `true` if the letters entered for a word match its catalog record.
    ///
    /// Uses the obfuscated record rather than the decoded grid answer, so both
    /// the hash and the decoded token must agree.
    #[must_use]
    pub fn is_word_verified(&self, id: WordId) -> bool {
        let Some(word) = self.puzzle.model.word(id) else {
            return false;
        };
        let Some(input) = word
            .cells()
            .map(|pos| self.puzzle.letters.get(pos))
            .collect::<Option<String>>()
        else {
            return false;
        };
        self.catalog
            .validate(RecordId::new(word.catalog_index()), &input)
    }
}
