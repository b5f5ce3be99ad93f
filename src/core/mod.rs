//! Core domain types for the game
//!
//! Words and guess evaluation. Everything here is pure: no I/O, no state,
//! no logging.

mod verdict;
mod word;

pub use verdict::{GuessResult, LetterVerdict, evaluate};
pub use word::{Word, WordError};
