use crate::Position;

/// The direction a word runs on the grid.
///
/// `Across` orders before `Down`; this is the tie-break used whenever two
/// words share a clue number.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    serde::Serialize,
    serde::Deserialize,
    derive_more::Display,
    derive_more::IsVariant,
)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Left to right.
    #[default]
    #[display("across")]
    Across,
    /// Top to bottom.
    #[display("down")]
    Down,
}

impl Orientation {
    /// Both orientations, across first.
    pub const ALL: [Self; 2] = [Self::Across, Self::Down];

    /// Returns the other orientation.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Across => Self::Down,
            Self::Down => Self::Across,
        }
    }

    /// Returns the position `offset` cells after `start` along this orientation.
    #[must_use]
    pub const fn advance(self, start: Position, offset: usize) -> Option<Position> {
        match self {
            Self::Across => match start.x.checked_add(offset) {
                Some(x) => Some(Position::new(x, start.y)),
                None => None,
            },
            Self::Down => match start.y.checked_add(offset) {
                Some(y) => Some(Position::new(start.x, y)),
                None => None,
            },
        }
    }

    /// Returns the position directly before `pos` along this orientation.
    #[must_use]
    pub const fn previous(self, pos: Position) -> Option<Position> {
        match self {
            Self::Across => pos.left(),
            Self::Down => pos.up(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggled() {
        assert_eq!(Orientation::Across.toggled(), Orientation::Down);
        assert_eq!(Orientation::Down.toggled(), Orientation::Across);
    }

    #[test]
    fn test_advance_and_previous() {
        let start = Position::new(2, 3);
        assert_eq!(
            Orientation::Across.advance(start, 2),
            Some(Position::new(4, 3))
        );
        assert_eq!(Orientation::Down.advance(start, 2), Some(Position::new(2, 5)));
        assert_eq!(
            Orientation::Across.previous(start),
            Some(Position::new(1, 3))
        );
        assert_eq!(Orientation::Down.previous(Position::new(2, 0)), None);
    }

    #[test]
    fn test_across_sorts_first() {
        assert!(Orientation::Across < Orientation::Down);
    }
}
