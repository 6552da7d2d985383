//! Grid model derived from a generated layout.

use crate::{
    BLOCKED_MARKER, Layout, Orientation, Placement, Position, grid_cell_count, normalize_letter,
};

/// A cell marker on the crossword grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    /// A cell that never holds a letter.
    #[default]
    Blocked,
    /// A cell belonging to at least one placed word.
    Slot,
}

/// Identifies a [`PlacedWord`] within one [`GridModel`].
///
/// Ids are indices into [`GridModel::words`] and are meaningless across
/// puzzle generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
#[display("#{_0}")]
pub struct WordId(usize);

impl WordId {
    /// Returns the index of the word in [`GridModel::words`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A word realized on the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    id: WordId,
    catalog_index: usize,
    clue_number: u32,
    orientation: Orientation,
    start: Position,
    clue: String,
    letters: Vec<char>,
}

impl PlacedWord {
    /// Returns the id of this word within its grid model.
    #[must_use]
    pub const fn id(&self) -> WordId {
        self.id
    }

    /// Returns the index of this word in the word list the layout was generated from.
    #[must_use]
    pub const fn catalog_index(&self) -> usize {
        self.catalog_index
    }

    /// Returns the clue number printed in the start cell.
    #[must_use]
    pub const fn clue_number(&self) -> u32 {
        self.clue_number
    }

    /// Returns the direction this word runs.
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the 0-based start cell.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Returns the clue text.
    #[must_use]
    pub fn clue(&self) -> &str {
        &self.clue
    }

    /// Returns the expected answer, uppercased.
    #[must_use]
    pub fn answer(&self) -> String {
        self.letters.iter().collect()
    }

    /// Returns the number of cells this word spans.
    #[must_use]
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` if the word spans no cells.
    ///
    /// Grid models never hold such words; this exists for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns the offset of `pos` within this word, if the word covers it.
    #[must_use]
    pub fn offset_of(&self, pos: Position) -> Option<usize> {
        let (along, across, start_along, start_across) = match self.orientation {
            Orientation::Across => (pos.x, pos.y, self.start.x, self.start.y),
            Orientation::Down => (pos.y, pos.x, self.start.y, self.start.x),
        };
        if across != start_across || along < start_along {
            return None;
        }
        let offset = along - start_along;
        (offset < self.letters.len()).then_some(offset)
    }

    /// Returns `true` if this word covers `pos`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.offset_of(pos).is_some()
    }

    /// Returns the cell at `offset` within this word.
    #[must_use]
    pub fn cell_at(&self, offset: usize) -> Option<Position> {
        if offset >= self.letters.len() {
            return None;
        }
        self.orientation.advance(self.start, offset)
    }

    /// Returns the expected letter at `pos`, if the word covers it.
    #[must_use]
    pub fn expected_at(&self, pos: Position) -> Option<char> {
        self.offset_of(pos).map(|offset| self.letters[offset])
    }

    /// Iterates over the cells of this word from start to end.
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = Position> + '_ {
        (0..self.letters.len()).filter_map(|offset| self.cell_at(offset))
    }

    /// Iterates over `(cell, expected letter)` pairs from start to end.
    pub fn cells_with_letters(&self) -> impl Iterator<Item = (Position, char)> + '_ {
        self.cells().zip(self.letters.iter().copied())
    }
}

/// Why a generated word did not make it into the grid model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum UnplacedReason {
    /// The generator reported orientation `none`.
    #[display("not placed by the layout generator")]
    NotPlaced,
    /// The answer was empty.
    #[display("empty answer")]
    EmptyAnswer,
    /// Some cell of the word lies outside the grid.
    #[display("extends outside the grid")]
    OutOfBounds,
    /// The word overlaps another word of the same orientation.
    #[display("overlaps another word")]
    Overlap,
}

/// A word from the generator input that is not part of the grid model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnplacedWord {
    /// Index of the word in the word list the layout was generated from.
    pub catalog_index: usize,
    /// Clue text.
    pub clue: String,
    /// Why the word was excluded.
    pub reason: UnplacedReason,
}

/// The placed words covering a single cell.
///
/// A cell is covered by at most one across word and one down word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordsAt<'a> {
    across: Option<&'a PlacedWord>,
    down: Option<&'a PlacedWord>,
}

impl<'a> WordsAt<'a> {
    /// Returns the word of the given orientation covering the cell.
    #[must_use]
    pub const fn get(&self, orientation: Orientation) -> Option<&'a PlacedWord> {
        match orientation {
            Orientation::Across => self.across,
            Orientation::Down => self.down,
        }
    }

    /// Returns the number of words covering the cell (0, 1, or 2).
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.across.is_some()) + usize::from(self.down.is_some())
    }

    /// Returns `true` if no word covers the cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if both an across and a down word cover the cell.
    #[must_use]
    pub fn is_intersection(&self) -> bool {
        self.len() == 2
    }

    /// Picks a word, preferring `orientation` and falling back to across.
    #[must_use]
    pub fn preferring(&self, orientation: Orientation) -> Option<&'a PlacedWord> {
        self.get(orientation).or(self.across).or(self.down)
    }

    /// Iterates over the covering words, across first.
    pub fn iter(&self) -> impl Iterator<Item = &'a PlacedWord> + use<'a> {
        self.across.into_iter().chain(self.down)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct CellWords {
    across: Option<WordId>,
    down: Option<WordId>,
}

impl CellWords {
    fn get(self, orientation: Orientation) -> Option<WordId> {
        match orientation {
            Orientation::Across => self.across,
            Orientation::Down => self.down,
        }
    }

    fn slot_mut(&mut self, orientation: Orientation) -> &mut Option<WordId> {
        match orientation {
            Orientation::Across => &mut self.across,
            Orientation::Down => &mut self.down,
        }
    }
}

/// Immutable view of one generated puzzle.
///
/// Built once per puzzle generation with [`GridModel::from_layout`] and
/// discarded when a new puzzle is generated. Words are stored sorted by clue
/// number, across before down.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridModel {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    cell_words: Vec<CellWords>,
    words: Vec<PlacedWord>,
    unplaced: Vec<UnplacedWord>,
}

impl GridModel {
    /// Creates a model with no cells and no words.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a grid model from a layout generator's output.
    ///
    /// Start coordinates are converted from 1-based to 0-based. Words the
    /// generator did not place, words with an empty answer, words extending
    /// outside the grid, and words overlapping an earlier word of the same
    /// orientation are excluded and reported by [`GridModel::unplaced`].
    /// A layout without a table or result, or one claiming more than
    /// [`MAX_GRID_CELLS`](crate::MAX_GRID_CELLS) cells, yields an empty model.
    #[must_use]
    pub fn from_layout(layout: &Layout) -> Self {
        let (Some(table), Some(result)) = (&layout.table, &layout.result) else {
            log::warn!("layout has no table or result, using an empty grid");
            return Self::empty();
        };

        let rows = if layout.rows > 0 {
            layout.rows
        } else {
            table.len()
        };
        let cols = if layout.cols > 0 {
            layout.cols
        } else {
            table.first().map_or(0, Vec::len)
        };
        let Some(cell_count) = grid_cell_count(rows, cols) else {
            log::warn!("layout claims a {rows}x{cols} grid, using an empty grid");
            return Self::empty();
        };

        let mut model = Self {
            rows,
            cols,
            cells: vec![Cell::Blocked; cell_count],
            cell_words: vec![CellWords::default(); cell_count],
            words: Vec::new(),
            unplaced: Vec::new(),
        };

        let mut candidates = Vec::new();
        for (catalog_index, placement) in result.iter().enumerate() {
            match model.candidate(catalog_index, placement) {
                Ok(word) => candidates.push(word),
                Err(reason) => model.push_unplaced(catalog_index, placement, reason),
            }
        }
        candidates.sort_by_key(|word| (word.clue_number, word.orientation, word.catalog_index));

        for mut word in candidates {
            let overlaps = word.cells().any(|pos| {
                model.cell_words[model.index_of(pos)]
                    .get(word.orientation)
                    .is_some()
            });
            if overlaps {
                let placement = &result[word.catalog_index];
                model.push_unplaced(word.catalog_index, placement, UnplacedReason::Overlap);
                continue;
            }

            word.id = WordId(model.words.len());
            for pos in word.cells() {
                let index = model.index_of(pos);
                model.cells[index] = Cell::Slot;
                *model.cell_words[index].slot_mut(word.orientation) = Some(word.id);
            }
            model.words.push(word);
        }

        model.verify_table(table);
        log::debug!(
            "grid model built: {rows}x{cols}, {} placed, {} unplaced",
            model.words.len(),
            model.unplaced.len()
        );
        model
    }

    fn candidate(
        &self,
        catalog_index: usize,
        placement: &Placement,
    ) -> Result<PlacedWord, UnplacedReason> {
        let orientation = placement
            .orientation
            .placed()
            .ok_or(UnplacedReason::NotPlaced)?;
        let letters = placement
            .answer
            .chars()
            .map(normalize_letter)
            .collect::<Vec<_>>();
        if letters.is_empty() {
            return Err(UnplacedReason::EmptyAnswer);
        }
        let (Some(x), Some(y)) = (
            placement.startx.checked_sub(1),
            placement.starty.checked_sub(1),
        ) else {
            return Err(UnplacedReason::OutOfBounds);
        };
        let start = Position::new(x, y);
        let end = orientation
            .advance(start, letters.len() - 1)
            .ok_or(UnplacedReason::OutOfBounds)?;
        if !self.contains(start) || !self.contains(end) {
            return Err(UnplacedReason::OutOfBounds);
        }

        Ok(PlacedWord {
            id: WordId(usize::MAX),
            catalog_index,
            clue_number: placement.position,
            orientation,
            start,
            clue: placement.clue.clone(),
            letters,
        })
    }

    fn push_unplaced(&mut self, catalog_index: usize, placement: &Placement, reason: UnplacedReason) {
        log::warn!(
            "word {catalog_index} ({:?}) excluded from the grid: {reason}",
            placement.clue
        );
        self.unplaced.push(UnplacedWord {
            catalog_index,
            clue: placement.clue.clone(),
            reason,
        });
    }

    fn verify_table(&self, table: &[Vec<String>]) {
        let mut mismatches = 0_usize;
        for pos in self.positions() {
            let marker = table
                .get(pos.y)
                .and_then(|row| row.get(pos.x))
                .map(|marker| marker.trim())
                .filter(|marker| !marker.is_empty() && *marker != BLOCKED_MARKER);
            let expected = self.words_at(pos).iter().next().and_then(|word| word.expected_at(pos));
            let table_letter = marker
                .and_then(|marker| marker.chars().next())
                .map(normalize_letter);
            if table_letter != expected {
                mismatches += 1;
            }
        }
        if mismatches > 0 {
            log::warn!("layout table disagrees with placements in {mismatches} cells");
        }
    }

    fn index_of(&self, pos: Position) -> usize {
        pos.y * self.cols + pos.x
    }

    /// Returns the number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `true` if the model has no placed words.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    /// Returns the marker of the cell at `pos`, or `None` outside the grid.
    #[must_use]
    pub fn cell(&self, pos: Position) -> Option<Cell> {
        self.contains(pos).then(|| self.cells[self.index_of(pos)])
    }

    /// Returns `true` if `pos` is a letter slot.
    #[must_use]
    pub fn is_slot(&self, pos: Position) -> bool {
        self.cell(pos).is_some_and(|cell| cell.is_slot())
    }

    /// Iterates over every grid position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let cols = self.cols;
        (0..self.rows).flat_map(move |y| (0..cols).map(move |x| Position::new(x, y)))
    }

    /// Returns all placed words, sorted by clue number then orientation.
    #[must_use]
    pub fn words(&self) -> &[PlacedWord] {
        &self.words
    }

    /// Returns the words from the generator input that are not on the grid.
    #[must_use]
    pub fn unplaced(&self) -> &[UnplacedWord] {
        &self.unplaced
    }

    /// Returns the word with the given id.
    #[must_use]
    pub fn word(&self, id: WordId) -> Option<&PlacedWord> {
        self.words.get(id.index())
    }

    /// Finds the word with the given clue number and orientation.
    #[must_use]
    pub fn find(&self, clue_number: u32, orientation: Orientation) -> Option<&PlacedWord> {
        self.words
            .iter()
            .find(|word| word.clue_number == clue_number && word.orientation == orientation)
    }

    /// Returns the words covering `pos`.
    #[must_use]
    pub fn words_at(&self, pos: Position) -> WordsAt<'_> {
        let Some(cell_words) = self
            .contains(pos)
            .then(|| self.cell_words[self.index_of(pos)])
        else {
            return WordsAt {
                across: None,
                down: None,
            };
        };
        WordsAt {
            across: cell_words.across.and_then(|id| self.word(id)),
            down: cell_words.down.and_then(|id| self.word(id)),
        }
    }

    /// Returns `true` if `pos` lies within `word`'s span.
    #[must_use]
    pub fn is_in_word(&self, word: &PlacedWord, pos: Position) -> bool {
        self.contains(pos) && word.contains(pos)
    }

    /// Returns the clue number printed at `pos`, if a word starts there.
    #[must_use]
    pub fn clue_number_at(&self, pos: Position) -> Option<u32> {
        self.words_at(pos)
            .iter()
            .find(|word| word.start == pos)
            .map(PlacedWord::clue_number)
    }

    /// Returns the word with the lowest clue number, across before down.
    #[must_use]
    pub fn first_word(&self) -> Option<&PlacedWord> {
        self.words.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PlacementOrientation;

    fn placement(
        clue: &str,
        answer: &str,
        start: (usize, usize),
        position: u32,
        orientation: PlacementOrientation,
    ) -> Placement {
        Placement {
            clue: clue.to_owned(),
            answer: answer.to_owned(),
            startx: start.0,
            starty: start.1,
            position,
            orientation,
        }
    }

    fn table(rows: &[&str]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.chars().map(String::from).collect())
            .collect()
    }

    // C A T
    // O - -
    // W - -
    fn cat_cow() -> Layout {
        Layout {
            rows: 3,
            cols: 3,
            table: Some(table(&["CAT", "O--", "W--"])),
            result: Some(vec![
                placement("Feline", "cat", (1, 1), 1, PlacementOrientation::Across),
                placement("Bovine", "cow", (1, 1), 1, PlacementOrientation::Down),
            ]),
        }
    }

    #[test]
    fn test_from_layout_normalizes_coordinates() {
        let model = GridModel::from_layout(&cat_cow());
        assert_eq!(model.rows(), 3);
        assert_eq!(model.cols(), 3);
        assert_eq!(model.words().len(), 2);

        let across = model.find(1, Orientation::Across).expect("across word");
        assert_eq!(across.start(), Position::new(0, 0));
        assert_eq!(across.answer(), "CAT");
        assert_eq!(
            across.cells().collect::<Vec<_>>(),
            vec![Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );

        let down = model.find(1, Orientation::Down).expect("down word");
        assert_eq!(down.expected_at(Position::new(0, 2)), Some('W'));
        assert_eq!(down.expected_at(Position::new(1, 0)), None);
    }

    #[test]
    fn test_cells_follow_placements() {
        let model = GridModel::from_layout(&cat_cow());
        assert_eq!(model.cell(Position::new(2, 0)), Some(Cell::Slot));
        assert_eq!(model.cell(Position::new(1, 1)), Some(Cell::Blocked));
        assert_eq!(model.cell(Position::new(3, 0)), None);
        for pos in model.positions() {
            assert_eq!(model.is_slot(pos), !model.words_at(pos).is_empty());
        }
    }

    #[test]
    fn test_words_at() {
        let model = GridModel::from_layout(&cat_cow());

        let corner = model.words_at(Position::new(0, 0));
        assert!(corner.is_intersection());
        assert_eq!(
            corner.get(Orientation::Down).map(PlacedWord::answer),
            Some("COW".to_owned())
        );

        let middle = model.words_at(Position::new(1, 0));
        assert_eq!(middle.len(), 1);
        assert_eq!(
            middle.preferring(Orientation::Down).map(PlacedWord::orientation),
            Some(Orientation::Across)
        );

        assert!(model.words_at(Position::new(2, 2)).is_empty());
        assert!(model.words_at(Position::new(9, 9)).is_empty());
    }

    #[test]
    fn test_is_in_word() {
        let model = GridModel::from_layout(&cat_cow());
        let across = model.find(1, Orientation::Across).expect("across word");
        assert!(model.is_in_word(across, Position::new(2, 0)));
        assert!(!model.is_in_word(across, Position::new(3, 0)));
        assert!(!model.is_in_word(across, Position::new(0, 1)));
    }

    #[test]
    fn test_clue_number_only_on_start_cells() {
        let model = GridModel::from_layout(&cat_cow());
        assert_eq!(model.clue_number_at(Position::new(0, 0)), Some(1));
        assert_eq!(model.clue_number_at(Position::new(1, 0)), None);
        assert_eq!(model.clue_number_at(Position::new(1, 1)), None);
    }

    #[test]
    fn test_first_word_prefers_lowest_number_then_across() {
        let mut layout = cat_cow();
        if let Some(result) = layout.result.as_mut() {
            result.reverse();
        }
        let model = GridModel::from_layout(&layout);
        let first = model.first_word().expect("first word");
        assert_eq!(first.clue_number(), 1);
        assert_eq!(first.orientation(), Orientation::Across);
    }

    #[test]
    fn test_unplaced_words_are_excluded() {
        let mut layout = cat_cow();
        if let Some(result) = layout.result.as_mut() {
            result.push(placement("Missing", "gnu", (0, 0), 0, PlacementOrientation::None));
            result.push(placement("Too long", "tiger", (1, 3), 2, PlacementOrientation::Across));
            result.push(placement("Clash", "cab", (1, 1), 3, PlacementOrientation::Across));
        }
        let model = GridModel::from_layout(&layout);

        assert_eq!(model.words().len(), 2);
        let reasons = model
            .unplaced()
            .iter()
            .map(|word| (word.catalog_index, word.reason))
            .collect::<Vec<_>>();
        assert_eq!(
            reasons,
            vec![
                (2, UnplacedReason::NotPlaced),
                (3, UnplacedReason::OutOfBounds),
                (4, UnplacedReason::Overlap),
            ]
        );
    }

    #[test]
    fn test_malformed_layout_yields_empty_model() {
        let model = GridModel::from_layout(&Layout {
            rows: 5,
            cols: 5,
            table: None,
            result: Some(Vec::new()),
        });
        assert!(model.is_empty());
        assert_eq!(model.rows(), 0);
        assert!(model.first_word().is_none());
        assert!(model.words_at(Position::new(0, 0)).is_empty());
        assert_eq!(model.clue_number_at(Position::new(0, 0)), None);
    }

    #[test]
    fn test_oversized_layout_yields_empty_model() {
        let layout: Layout = serde_json::from_str(
            r#"{"rows": 4294967296, "cols": 4294967296, "table": [], "result": []}"#,
        )
        .expect("valid layout json");
        let model = GridModel::from_layout(&layout);
        assert!(model.is_empty());
        assert_eq!((model.rows(), model.cols()), (0, 0));

        let mut wide = cat_cow();
        wide.rows = 1 << 9;
        wide.cols = 1 << 9;
        let model = GridModel::from_layout(&wide);
        assert!(model.is_empty());
        assert!(model.words_at(Position::new(0, 0)).is_empty());
    }

    #[test]
    fn test_word_ids_index_words() {
        let model = GridModel::from_layout(&cat_cow());
        for (index, word) in model.words().iter().enumerate() {
            assert_eq!(word.id().index(), index);
            assert_eq!(model.word(word.id()), Some(word));
        }
    }
}
