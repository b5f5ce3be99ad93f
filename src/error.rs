//! Errors raised by the game engine
//!
//! All of them are synchronous and recoverable: the caller either retries
//! with a valid word or stops because the game has ended.

use crate::game::GameStatus;

/// Errors from evaluating guesses and driving a game session
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// Guess length does not match the solution length
    #[error("guess must be {expected} letters long, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Guess contains something other than letters
    #[error("guess '{0}' must contain only the letters a-z")]
    InvalidCharacters(String),

    /// The game already ended; no further guesses are accepted
    #[error("game is not active (status: {0})")]
    GameNotActive(GameStatus),

    /// A session could not be built in a valid state
    #[error("cannot create game: {0}")]
    Construction(String),
}
