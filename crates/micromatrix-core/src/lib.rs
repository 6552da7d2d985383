//! Core data types for Micromatrix mini crosswords.
//!
//! This crate contains the puzzle-independent building blocks shared by the
//! codec, game, and app crates:
//!
//! - [`Position`] and [`MoveDirection`] for addressing grid cells
//! - [`Orientation`] of a placed word
//! - [`Layout`], the output format of an external layout generator, together
//!   with the [`LayoutGenerator`] trait used to plug one in
//! - [`GridModel`], the immutable per-generation view derived from a layout
//! - [`LetterGrid`], the player's letters
//!
//! # Example
//!
//! ```
//! use micromatrix_core::{GridModel, Layout, LetterGrid, Orientation, Position};
//!
//! let layout: Layout = serde_json::from_str(
//!     r#"{
//!         "rows": 1, "cols": 3,
//!         "table": [["C", "A", "T"]],
//!         "result": [{
//!             "clue": "Feline", "answer": "cat",
//!             "startx": 1, "starty": 1, "position": 1, "orientation": "across"
//!         }]
//!     }"#,
//! )
//! .unwrap();
//!
//! let model = GridModel::from_layout(&layout);
//! let word = model.first_word().unwrap();
//! assert_eq!(word.orientation(), Orientation::Across);
//! assert_eq!(model.clue_number_at(Position::new(0, 0)), Some(1));
//!
//! let letters = LetterGrid::for_model(&model);
//! assert!(!letters.is_filled(Position::new(1, 0)));
//! ```

pub use self::{grid_model::*, layout::*, letter_grid::*, orientation::*, position::*};

mod grid_model;
mod layout;
mod letter_grid;
mod orientation;
mod position;
