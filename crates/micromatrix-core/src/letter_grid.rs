use crate::{GridModel, Position, grid_cell_count};

/// Uppercases a letter when the uppercase form is a single character.
///
/// Letters whose uppercase form expands to several characters (such as `ß`)
/// are returned unchanged.
#[must_use]
pub fn normalize_letter(ch: char) -> char {
    let mut upper = ch.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => ch,
    }
}

/// The letters entered by the player.
///
/// Has the same dimensions as the [`GridModel`] it was created for. Each cell
/// holds at most one non-whitespace character; writing whitespace clears the
/// cell. Reads outside the grid return `None` and writes outside the grid are
/// ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterGrid {
    rows: usize,
    cols: usize,
    cells: Vec<Option<char>>,
}

impl LetterGrid {
    /// Creates an empty letter grid of the given size.
    ///
    /// Sizes above [`MAX_GRID_CELLS`](crate::MAX_GRID_CELLS) cells yield a
    /// grid with no cells.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        let Some(cell_count) = grid_cell_count(rows, cols) else {
            log::warn!("letter grid of {rows}x{cols} is too large, using an empty grid");
            return Self::default();
        };
        Self {
            rows,
            cols,
            cells: vec![None; cell_count],
        }
    }

    /// Creates an empty letter grid matching `model`'s dimensions.
    #[must_use]
    pub fn for_model(model: &GridModel) -> Self {
        Self::new(model.rows(), model.cols())
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

    /// Returns `true` if `pos` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, pos: Position) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    /// Returns the letter at `pos`.
    #[must_use]
    pub fn get(&self, pos: Position) -> Option<char> {
        if !self.contains(pos) {
            return None;
        }
        self.cells[pos.y * self.cols + pos.x]
    }

    /// Returns `true` if the cell at `pos` holds a letter.
    #[must_use]
    pub fn is_filled(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Writes `letter` at `pos`, returning `true` if the cell changed.
    ///
    /// Whitespace is stored as an empty cell.
    pub fn set(&mut self, pos: Position, letter: Option<char>) -> bool {
        if !self.contains(pos) {
            return false;
        }
        let letter = letter.filter(|c| !c.is_whitespace());
        let cell = &mut self.cells[pos.y * self.cols + pos.x];
        if *cell == letter {
            return false;
        }
        *cell = letter;
        true
    }

    /// Empties the cell at `pos`, returning `true` if it held a letter.
    pub fn clear_cell(&mut self, pos: Position) -> bool {
        self.set(pos, None)
    }

    /// Empties every cell.
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Returns the number of filled cells.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_letter() {
        assert_eq!(normalize_letter('a'), 'A');
        assert_eq!(normalize_letter('Z'), 'Z');
        assert_eq!(normalize_letter('\u{e9}'), '\u{c9}');
        assert_eq!(normalize_letter('\u{df}'), '\u{df}');
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = LetterGrid::new(2, 3);
        assert!(grid.set(Position::new(2, 1), Some('Q')));
        assert_eq!(grid.get(Position::new(2, 1)), Some('Q'));
        assert!(!grid.set(Position::new(2, 1), Some('Q')));
        assert_eq!(grid.filled_count(), 1);
    }

    #[test]
    fn test_whitespace_clears() {
        let mut grid = LetterGrid::new(1, 1);
        grid.set(Position::new(0, 0), Some('A'));
        assert!(grid.set(Position::new(0, 0), Some(' ')));
        assert!(!grid.is_filled(Position::new(0, 0)));
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut grid = LetterGrid::new(1, 1);
        assert!(!grid.set(Position::new(1, 0), Some('A')));
        assert_eq!(grid.get(Position::new(0, 1)), None);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_oversized_grid_has_no_cells() {
        let mut grid = LetterGrid::new(usize::MAX, 2);
        assert_eq!((grid.rows(), grid.cols()), (0, 0));
        assert!(!grid.set(Position::new(0, 0), Some('A')));
        assert_eq!(grid.get(Position::new(0, 0)), None);
    }

    #[test]
    fn test_clear() {
        let mut grid = LetterGrid::new(2, 2);
        grid.set(Position::new(0, 0), Some('A'));
        grid.set(Position::new(1, 1), Some('B'));
        assert!(grid.clear_cell(Position::new(0, 0)));
        assert!(!grid.clear_cell(Position::new(0, 0)));
        grid.clear();
        assert_eq!(grid.filled_count(), 0);
    }
}
