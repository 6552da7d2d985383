use std::cmp::Ordering;

/// A cell coordinate on the crossword grid.
///
/// Coordinates are 0-based: `x` is the column and `y` is the row. Positions
/// are ordered row-major (top to bottom, then left to right), which is the
/// reading order used for clue numbering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[display("({x}, {y})")]
pub struct Position {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Position {
    /// Creates a position from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the position one row above, or `None` at the top edge.
    #[must_use]
    pub const fn up(self) -> Option<Self> {
        match self.y.checked_sub(1) {
            Some(y) => Some(Self::new(self.x, y)),
            None => None,
        }
    }

    /// Returns the position one row below.
    ///
    /// The grid size is not known here, so the caller checks the lower edge.
    #[must_use]
    pub const fn down(self) -> Option<Self> {
        match self.y.checked_add(1) {
            Some(y) => Some(Self::new(self.x, y)),
            None => None,
        }
    }

    /// Returns the position one column to the left, or `None` at the left edge.
    #[must_use]
    pub const fn left(self) -> Option<Self> {
        match self.x.checked_sub(1) {
            Some(x) => Some(Self::new(x, self.y)),
            None => None,
        }
    }

    /// Returns the position one column to the right.
    ///
    /// The grid size is not known here, so the caller checks the right edge.
    #[must_use]
    pub const fn right(self) -> Option<Self> {
        match self.x.checked_add(1) {
            Some(x) => Some(Self::new(x, self.y)),
            None => None,
        }
    }

    /// Returns the neighboring position in `direction`.
    #[must_use]
    pub const fn step(self, direction: MoveDirection) -> Option<Self> {
        match direction {
            MoveDirection::Up => self.up(),
            MoveDirection::Down => self.down(),
            MoveDirection::Left => self.left(),
            MoveDirection::Right => self.right(),
        }
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

/// A direction for arrow-key navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::IsVariant)]
pub enum MoveDirection {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl MoveDirection {
    /// All four directions.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stops_at_zero() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.up(), None);
        assert_eq!(origin.left(), None);
        assert_eq!(origin.down(), Some(Position::new(0, 1)));
        assert_eq!(origin.right(), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_step_matches_direction_helpers() {
        let pos = Position::new(3, 4);
        assert_eq!(pos.step(MoveDirection::Up), pos.up());
        assert_eq!(pos.step(MoveDirection::Down), pos.down());
        assert_eq!(pos.step(MoveDirection::Left), pos.left());
        assert_eq!(pos.step(MoveDirection::Right), pos.right());
    }

    #[test]
    fn test_ordering_is_row_major() {
        let mut positions = vec![
            Position::new(2, 1),
            Position::new(0, 2),
            Position::new(5, 0),
            Position::new(1, 1),
        ];
        positions.sort();
        assert_eq!(
            positions,
            vec![
                Position::new(5, 0),
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(0, 2),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(2, 7).to_string(), "(2, 7)");
    }
}
