//! Layout generator input and output formats.

use crate::{Orientation, Position, normalize_letter};

/// The table marker a layout generator uses for cells without a letter.
pub const BLOCKED_MARKER: &str = "-";

/// Largest number of cells a grid may have.
///
/// Layouts claiming more cells are treated as malformed.
pub const MAX_GRID_CELLS: usize = 1 << 16;

/// Returns the cell count of a `rows` x `cols` grid, or `None` if it exceeds
/// [`MAX_GRID_CELLS`].
#[must_use]
pub fn grid_cell_count(rows: usize, cols: usize) -> Option<usize> {
    rows.checked_mul(cols)
        .filter(|cells| *cells <= MAX_GRID_CELLS)
}

/// A clue paired with its plaintext answer.
///
/// This is both the shape of a raw word list entry and the input handed to a
/// [`LayoutGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WordEntry {
    /// Clue text shown to the player.
    pub clue: String,
    /// Plaintext answer.
    pub answer: String,
}

impl WordEntry {
    /// Creates a word entry.
    #[must_use]
    pub fn new(clue: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            clue: clue.into(),
            answer: answer.into(),
        }
    }
}

/// Orientation reported by a layout generator for a single word.
///
/// Generators report `none` for words they could not fit onto the grid.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum PlacementOrientation {
    /// Placed left to right.
    Across,
    /// Placed top to bottom.
    Down,
    /// Not placed.
    #[default]
    None,
}

impl PlacementOrientation {
    /// Returns the orientation of a placed word, or `None` for unplaced words.
    #[must_use]
    pub const fn placed(self) -> Option<Orientation> {
        match self {
            Self::Across => Some(Orientation::Across),
            Self::Down => Some(Orientation::Down),
            Self::None => None,
        }
    }
}

impl From<Orientation> for PlacementOrientation {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Across => Self::Across,
            Orientation::Down => Self::Down,
        }
    }
}

/// One word as reported by a layout generator.
///
/// Start coordinates are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Placement {
    /// Clue text.
    #[serde(default)]
    pub clue: String,
    /// Plaintext answer.
    #[serde(default)]
    pub answer: String,
    /// 1-based start column.
    #[serde(default)]
    pub startx: usize,
    /// 1-based start row.
    #[serde(default)]
    pub starty: usize,
    /// Clue number.
    #[serde(default)]
    pub position: u32,
    /// Placement orientation, `none` when unplaced.
    #[serde(default)]
    pub orientation: PlacementOrientation,
}

/// The full output of a layout generator.
///
/// `table` holds one string per cell: a letter, or [`BLOCKED_MARKER`].
/// `result` lists the words in the order they were handed to the generator.
/// A generator that fails leaves either field out.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    /// Number of rows.
    #[serde(default)]
    pub rows: usize,
    /// Number of columns.
    #[serde(default)]
    pub cols: usize,
    /// Row-major cell markers.
    #[serde(default)]
    pub table: Option<Vec<Vec<String>>>,
    /// Word placements.
    #[serde(default)]
    pub result: Option<Vec<Placement>>,
}

/// Produces a [`Layout`] from a word list.
///
/// The placement algorithm lives outside this workspace; implementations
/// adapt an external generator or replay pre-generated layouts.
pub trait LayoutGenerator {
    /// Places `words` onto a grid.
    ///
    /// Implementations report failure through an empty or partial [`Layout`]
    /// rather than an error; the grid model tolerates both.
    fn generate(&mut self, words: &[WordEntry]) -> Layout;
}

/// A generator that always returns the same pre-computed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedLayout {
    layout: Layout,
}

impl FixedLayout {
    /// Wraps a pre-computed layout.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self { layout }
    }
}

impl LayoutGenerator for FixedLayout {
    fn generate(&mut self, words: &[WordEntry]) -> Layout {
        let placements = self.layout.result.as_ref().map_or(0, Vec::len);
        if placements != words.len() {
            log::warn!(
                "fixed layout has {placements} placements for {} words",
                words.len()
            );
        }
        self.layout.clone()
    }
}

/// A generator that reads placements off a solved grid picture.
///
/// Each row string is one grid row; `-`, `.` and spaces are blocked cells and
/// any other character is a letter. Every maximal horizontal or vertical run
/// of two or more letters is a word slot, numbered in reading order. Words
/// are matched to slots by answer text; words without a matching slot are
/// reported as unplaced.
///
/// ```
/// use micromatrix_core::{LayoutGenerator, PictureLayout, PlacementOrientation, WordEntry};
///
/// let mut generator = PictureLayout::new(["CAT", "O--", "W--"]);
/// let layout = generator.generate(&[
///     WordEntry::new("Bovine", "cow"),
///     WordEntry::new("Feline", "cat"),
///     WordEntry::new("Canine", "dog"),
/// ]);
/// let result = layout.result.unwrap();
/// assert_eq!(result[0].orientation, PlacementOrientation::Down);
/// assert_eq!(result[1].orientation, PlacementOrientation::Across);
/// assert_eq!(result[2].orientation, PlacementOrientation::None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureLayout {
    rows: usize,
    cols: usize,
    cells: Vec<Option<char>>,
}

#[derive(Debug, Clone)]
struct Slot {
    number: u32,
    orientation: Orientation,
    start: Position,
    text: String,
}

impl PictureLayout {
    /// Creates a generator from grid rows. Short rows are padded with blocked cells.
    #[must_use]
    pub fn new<I, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                row.as_ref()
                    .chars()
                    .map(|ch| (!matches!(ch, '-' | '.' | ' ')).then(|| normalize_letter(ch)))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>();
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let cells = rows
            .iter()
            .flat_map(|row| (0..cols).map(|x| row.get(x).copied().flatten()))
            .collect();
        Self {
            rows: rows.len(),
            cols,
            cells,
        }
    }

    fn letter(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.cells[y * self.cols + x]
    }

    fn run_from(&self, start: Position, orientation: Orientation) -> String {
        (0..)
            .map_while(|offset| {
                let pos = orientation.advance(start, offset)?;
                self.letter(pos.x, pos.y)
            })
            .collect()
    }

    fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        let mut number = 0;
        for y in 0..self.rows {
            for x in 0..self.cols {
                if self.letter(x, y).is_none() {
                    continue;
                }
                let start = Position::new(x, y);
                let mut numbered = false;
                for orientation in Orientation::ALL {
                    let starts_here = orientation
                        .previous(start)
                        .is_none_or(|prev| self.letter(prev.x, prev.y).is_none());
                    if !starts_here {
                        continue;
                    }
                    let text = self.run_from(start, orientation);
                    if text.chars().count() < 2 {
                        continue;
                    }
                    if !numbered {
                        number += 1;
                        numbered = true;
                    }
                    slots.push(Slot {
                        number,
                        orientation,
                        start,
                        text,
                    });
                }
            }
        }
        slots
    }

    fn table(&self) -> Vec<Vec<String>> {
        (0..self.rows)
            .map(|y| {
                (0..self.cols)
                    .map(|x| {
                        self.letter(x, y)
                            .map_or_else(|| BLOCKED_MARKER.to_owned(), String::from)
                    })
                    .collect()
            })
            .collect()
    }
}

impl LayoutGenerator for PictureLayout {
    fn generate(&mut self, words: &[WordEntry]) -> Layout {
        let slots = self.slots();
        let mut used = vec![false; slots.len()];
        let result = words
            .iter()
            .map(|word| {
                let answer = word.answer.chars().map(normalize_letter).collect::<String>();
                let found = slots
                    .iter()
                    .enumerate()
                    .find(|(index, slot)| !used[*index] && slot.text == answer);
                match found {
                    Some((index, slot)) => {
                        used[index] = true;
                        Placement {
                            clue: word.clue.clone(),
                            answer: word.answer.clone(),
                            startx: slot.start.x + 1,
                            starty: slot.start.y + 1,
                            position: slot.number,
                            orientation: slot.orientation.into(),
                        }
                    }
                    None => Placement {
                        clue: word.clue.clone(),
                        answer: word.answer.clone(),
                        startx: 0,
                        starty: 0,
                        position: 0,
                        orientation: PlacementOrientation::None,
                    },
                }
            })
            .collect();

        let unused = used.iter().filter(|used| !**used).count();
        if unused > 0 {
            log::warn!("picture layout has {unused} slots without a matching word");
        }

        Layout {
            rows: self.rows,
            cols: self.cols,
            table: Some(self.table()),
            result: Some(result),
        }
    }
}
