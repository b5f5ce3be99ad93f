//! Wordle Thread
//!
//! A collaborative Wordle engine: one hidden word per chat thread, guesses
//! from anyone in the thread, scored with the standard two-pass rule.
//!
//! # Quick Start
//!
//! ```rust
//! use wordle_thread::core::LetterVerdict;
//! use wordle_thread::game::{GameSession, GameStatus};
//!
//! let mut game = GameSession::new("earth").unwrap();
//! let result = game.submit_guess("arise").unwrap();
//! assert_eq!(result.verdicts()[0], LetterVerdict::Present);
//! assert_eq!(game.status(), GameStatus::Active);
//!
//! game.submit_guess("EARTH").unwrap();
//! assert_eq!(game.status(), GameStatus::Won);
//! ```

// Core domain types
pub mod core;

pub mod error;

// Game sessions and the per-thread registry
pub mod game;

// Session persistence
pub mod store;

// Word lists and solution sources
pub mod wordlists;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

pub use error::GameError;
