use micromatrix_core::{
    GridModel, LetterGrid, MoveDirection, PlacedWord, Position, WordsAt, normalize_letter,
};

use crate::{PlatformMode, Selection};

/// A navigation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Key {
    /// Clears the focused cell, or steps back within the active word.
    Backspace,
    /// Moves focus to the next letter cell in a direction.
    Arrow(MoveDirection),
    /// Jumps to the next word that still has empty cells.
    Enter,
}

/// An input event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorEvent {
    /// A cell received focus.
    Focus(Position),
    /// A cell was clicked or tapped. Handled exactly like [`CursorEvent::Focus`].
    Click(Position),
    /// A character was typed into a cell.
    Input(Position, char),
    /// A key was pressed while a cell had focus.
    Key(Position, Key),
}

/// A side effect requested by a transition.
///
/// Effects are applied by the owner of the letter grid in the order they
/// were returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum Effect {
    /// Write (or clear, with `None`) the letter at a cell.
    SetLetter {
        /// Target cell.
        pos: Position,
        /// Uppercased letter, or `None` to clear.
        letter: Option<char>,
    },
    /// Move focus to a cell once the current update has been painted.
    ///
    /// Apply it with [`Cursor::settle_focus`] before handling the next event.
    MoveFocus(Position),
}

/// The cursor navigation state machine.
///
/// Tracks the active [`Selection`], the focused cell, and the pointer anchor:
/// the cell targeted by the most recent focus or click event. Focusing the
/// anchor again on an intersection toggles between the across and down
/// words. Focus moves requested through [`Effect::MoveFocus`] leave the
/// anchor alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cursor {
    mode: PlatformMode,
    selection: Selection,
    active_cell: Option<Position>,
    anchor: Option<Position>,
}

impl Cursor {
    /// Creates a cursor for a freshly generated puzzle.
    ///
    /// The first word (lowest clue number, across first) is selected and no
    /// cell has focus yet.
    #[must_use]
    pub fn new(model: &GridModel, mode: PlatformMode) -> Self {
        Self {
            mode,
            selection: model.first_word().map_or(Selection::NONE, Selection::of),
            active_cell: None,
            anchor: None,
        }
    }

    /// Returns the active selection.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns the focused cell.
    #[must_use]
    pub const fn active_cell(&self) -> Option<Position> {
        self.active_cell
    }

    /// Returns the platform mode.
    #[must_use]
    pub const fn platform_mode(&self) -> PlatformMode {
        self.mode
    }

    /// Returns the active word, if the selection resolves in `model`.
    #[must_use]
    pub fn active_word<'a>(&self, model: &'a GridModel) -> Option<&'a PlacedWord> {
        self.selection.resolve(model)
    }

    /// Handles one event and returns the effects to apply.
    ///
    /// Events addressing cells outside the grid are ignored, as are typing
    /// and key events on blocked cells.
    pub fn handle(
        &mut self,
        model: &GridModel,
        letters: &LetterGrid,
        event: CursorEvent,
    ) -> Vec<Effect> {
        log::debug!("cursor event {event:?}");
        match event {
            CursorEvent::Focus(pos) | CursorEvent::Click(pos) => {
                self.point_at(model, pos);
                Vec::new()
            }
            CursorEvent::Input(pos, ch) => self.input(model, letters, pos, ch),
            CursorEvent::Key(pos, _) if !model.is_slot(pos) => Vec::new(),
            CursorEvent::Key(pos, key) => {
                self.active_cell = Some(pos);
                match key {
                    Key::Backspace => self.backspace(model, letters, pos),
                    Key::Arrow(direction) => arrow_target(model, pos, direction)
                        .map(Effect::MoveFocus)
                        .into_iter()
                        .collect(),
                    Key::Enter => self.next_incomplete(model, letters),
                }
            }
        }
    }

    /// Applies a deferred focus move.
    ///
    /// The selection is kept if the active word covers `pos`; otherwise the
    /// word at `pos` matching the current orientation is selected, falling
    /// back to across.
    pub fn settle_focus(&mut self, model: &GridModel, pos: Position) {
        if !model.is_slot(pos) {
            return;
        }
        self.active_cell = Some(pos);
        if self
            .active_word(model)
            .is_some_and(|word| word.contains(pos))
        {
            return;
        }
        self.select_preferring(model.words_at(pos));
    }

    fn select_preferring(&mut self, words: WordsAt<'_>) {
        if let Some(word) = words.preferring(self.selection.orientation) {
            self.selection = Selection::of(word);
        }
    }

    fn point_at(&mut self, model: &GridModel, pos: Position) {
        if !model.contains(pos) {
            return;
        }

        let words = model.words_at(pos);
        if words.is_empty() {
            self.selection = Selection::NONE;
            self.active_cell = None;
            self.anchor = None;
            return;
        }

        let same_cell = self.anchor == Some(pos);
        self.anchor = Some(pos);
        self.active_cell = Some(pos);

        if same_cell && words.is_intersection() {
            if let Some(word) = words.get(self.selection.orientation.toggled()) {
                self.selection = Selection::of(word);
            }
            return;
        }

        if self
            .active_word(model)
            .is_some_and(|word| word.contains(pos))
        {
            return;
        }
        self.select_preferring(words);
    }

    fn input(
        &mut self,
        model: &GridModel,
        letters: &LetterGrid,
        pos: Position,
        ch: char,
    ) -> Vec<Effect> {
        if !model.is_slot(pos) {
            return Vec::new();
        }
        self.active_cell = Some(pos);

        if ch.is_whitespace() {
            return vec![Effect::SetLetter { pos, letter: None }];
        }

        let mut effects = vec![Effect::SetLetter {
            pos,
            letter: Some(normalize_letter(ch)),
        }];
        if let Some(next) = self
            .active_word(model)
            .and_then(|word| next_empty_cell(word, letters, pos))
        {
            effects.push(Effect::MoveFocus(next));
        }
        effects
    }

    fn backspace(&self, model: &GridModel, letters: &LetterGrid, pos: Position) -> Vec<Effect> {
        if letters.is_filled(pos) {
            return vec![Effect::SetLetter { pos, letter: None }];
        }
        if self.mode.is_touch() {
            return Vec::new();
        }

        let Some(word) = self.active_word(model) else {
            return Vec::new();
        };
        word.orientation()
            .previous(pos)
            .filter(|prev| word.contains(*prev))
            .map(Effect::MoveFocus)
            .into_iter()
            .collect()
    }

    fn next_incomplete(&mut self, model: &GridModel, letters: &LetterGrid) -> Vec<Effect> {
        let incomplete = model
            .words()
            .iter()
            .filter(|word| first_empty_cell(word, letters).is_some())
            .collect::<Vec<_>>();
        if incomplete.is_empty() {
            return Vec::new();
        }

        let current = self
            .active_word(model)
            .and_then(|active| incomplete.iter().position(|word| word.id() == active.id()));
        let next = match current {
            Some(index) => incomplete[(index + 1) % incomplete.len()],
            None => incomplete[0],
        };

        self.selection = Selection::of(next);
        first_empty_cell(next, letters)
            .map(Effect::MoveFocus)
            .into_iter()
            .collect()
    }
}

fn first_empty_cell(word: &PlacedWord, letters: &LetterGrid) -> Option<Position> {
    word.cells().find(|pos| !letters.is_filled(*pos))
}

fn next_empty_cell(word: &PlacedWord, letters: &LetterGrid, pos: Position) -> Option<Position> {
    let offset = word.offset_of(pos)?;
    word.cells()
        .skip(offset + 1)
        .find(|next| !letters.is_filled(*next))
}

fn arrow_target(model: &GridModel, pos: Position, direction: MoveDirection) -> Option<Position> {
    let mut current = pos;
    loop {
        current = current.step(direction)?;
        match model.cell(current) {
            None => return None,
            Some(cell) if cell.is_slot() => return Some(current),
            Some(_) => {}
        }
    }
}
