//! Interaction and validation engine for Micromatrix puzzles.
//!
//! - [`Cursor`] is the navigation state machine: it maps focus, click,
//!   typing, and key events onto an active word and a focused cell
//! - [`evaluate`] is the completion engine: it classifies the letter grid as
//!   in progress, a failed attempt, or solved
//! - [`Session`] owns one puzzle generation and wires both together
//!
//! # Example
//!
//! ```
//! use micromatrix_codec::Catalog;
//! use micromatrix_core::{Orientation, PictureLayout, Position, WordEntry};
//! use micromatrix_game::{CursorEvent, PuzzleStatus, Session, SessionOptions};
//!
//! let catalog = Catalog::build(vec![
//!     WordEntry::new("Feline", "cat"),
//!     WordEntry::new("Bovine", "cow"),
//! ])
//! .unwrap();
//! let mut generator = PictureLayout::new(["CAT", "O--", "W--"]);
//! let mut session = Session::new(catalog, &mut generator, SessionOptions::default());
//!
//! session.dispatch(CursorEvent::Click(Position::new(0, 0)));
//! let outcome = session.dispatch(CursorEvent::Input(Position::new(0, 0), 'c'));
//! assert_eq!(outcome.focus, Some(Position::new(1, 0)));
//! assert_eq!(session.selection().orientation, Orientation::Across);
//!
//! for (x, ch) in [(1, 'a'), (2, 't')] {
//!     session.dispatch(CursorEvent::Input(Position::new(x, 0), ch));
//! }
//! session.dispatch(CursorEvent::Click(Position::new(0, 1)));
//! session.dispatch(CursorEvent::Input(Position::new(0, 1), 'o'));
//! let outcome = session.dispatch(CursorEvent::Input(Position::new(0, 2), 'w'));
//! assert!(outcome.solved_now);
//! assert_eq!(session.status(), PuzzleStatus::Solved);
//! ```

pub use self::{completion::*, cursor::*, selection::*, session::*};

mod completion;
mod cursor;
mod selection;
mod session;
pub mod testing;
