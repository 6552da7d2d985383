//! Answer obfuscation for Micromatrix puzzles.
//!
//! Answers are kept out of plaintext while a puzzle is in memory:
//!
//! - [`encode`] / [`decode`] apply a reversible multi-stage transformation
//! - [`hash`] derives a salted digest used as an independent equality check
//! - [`validate`] requires both derivations to agree
//! - [`Catalog`] stores the obfuscated [`WordRecord`]s for a word list
//!
//! The scheme is obfuscation only. Anyone holding a token can recover the
//! answer, because the client has to decode it to check the grid.
//!
//! # Example
//!
//! ```
//! use micromatrix_codec::{decode, encode, hash, validate};
//!
//! let token = encode("react").unwrap();
//! let digest = hash("react");
//! assert_eq!(decode(&token), "react");
//! assert!(validate("REACT", &token, &digest));
//! assert!(!validate("redux", &token, &digest));
//! ```

pub use self::{catalog::*, codec::*};

mod catalog;
mod codec;
