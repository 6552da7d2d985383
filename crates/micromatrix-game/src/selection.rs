use micromatrix_core::{GridModel, Orientation, PlacedWord};

/// The currently active clue.
///
/// A selection names a word by clue number and orientation rather than by
/// reference, so it stays meaningful while the host re-renders. A selection
/// whose clue number is not present in the current [`GridModel`] is treated
/// as no selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// Clue number of the active word, `None` when nothing is selected.
    pub clue_number: Option<u32>,
    /// Orientation of the active word, or the preferred orientation when
    /// nothing is selected.
    pub orientation: Orientation,
}

impl Selection {
    /// No active word, preferring across.
    pub const NONE: Self = Self {
        clue_number: None,
        orientation: Orientation::Across,
    };

    /// Returns the selection naming `word`.
    #[must_use]
    pub const fn of(word: &PlacedWord) -> Self {
        Self {
            clue_number: Some(word.clue_number()),
            orientation: word.orientation(),
        }
    }

    /// Returns `true` if no clue number is set.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.clue_number.is_none()
    }

    /// Looks up the selected word in `model`.
    #[must_use]
    pub fn resolve<'a>(&self, model: &'a GridModel) -> Option<&'a PlacedWord> {
        self.clue_number
            .and_then(|number| model.find(number, self.orientation))
    }
}

/// The input contract of the host device.
///
/// The host decides the mode; the engine never inspects its environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display, derive_more::IsVariant)]
pub enum PlatformMode {
    /// Keyboard and mouse. Backspace on an empty cell moves back one cell.
    #[default]
    #[display("pointer")]
    Pointer,
    /// On-screen keyboard. Backspace only clears the focused cell.
    #[display("touch")]
    Touch,
}
