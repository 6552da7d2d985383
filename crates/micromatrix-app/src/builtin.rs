//! The puzzle shipped with the binary.

use micromatrix_core::{PictureLayout, WordEntry};

/// Word list used when no `--words` file is given.
pub const WORDS: [(&str, &str); 5] = [
    ("Popular UI library", "react"),
    ("Runtime for JS", "node"),
    ("Cloud platform", "aws"),
    ("Search engine giant", "google"),
    ("Version control site", "github"),
];

/// Solved grid for [`WORDS`], used when no `--layout` file is given.
pub const PICTURE: [&str; 7] = [
    "--N--R--",
    "GOOGLE--",
    "I-D--AWS",
    "T-E--C--",
    "H----T--",
    "U-------",
    "B-------",
];

#[must_use]
pub fn words() -> Vec<WordEntry> {
    WORDS
        .iter()
        .map(|(clue, answer)| WordEntry::new(*clue, *answer))
        .collect()
}

#[must_use]
pub fn generator() -> PictureLayout {
    PictureLayout::new(PICTURE)
}

#[cfg(test)]
mod tests {
    use micromatrix_core::{GridModel, LayoutGenerator as _, Orientation};

    use super::*;

    #[test]
    fn test_builtin_places_every_word() {
        let layout = generator().generate(&words());
        let model = GridModel::from_layout(&layout);
        assert!(model.unplaced().is_empty());
        assert_eq!(model.words().len(), 5);

        let numbered = model
            .words()
            .iter()
            .map(|word| (word.clue_number(), word.orientation(), word.answer()))
            .collect::<Vec<_>>();
        assert_eq!(
            numbered,
            vec![
                (1, Orientation::Down, "NODE".to_owned()),
                (2, Orientation::Down, "REACT".to_owned()),
                (3, Orientation::Across, "GOOGLE".to_owned()),
                (3, Orientation::Down, "GITHUB".to_owned()),
                (4, Orientation::Across, "AWS".to_owned()),
            ]
        );
    }
}
