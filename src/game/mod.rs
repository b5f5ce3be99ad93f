//! Game lifecycle
//!
//! [`GameSession`] is the pure state machine for one game;
//! [`SessionRegistry`] serializes access to stored sessions for callers that
//! handle many players at once.

mod registry;
mod session;

pub use registry::{GuessOutcome, RegistryError, SessionRegistry};
pub use session::{
    DEFAULT_MAX_GUESSES, DEFAULT_WORD_LENGTH, GameSession, GameStatus, MAX_GUESS_LIMIT,
    RecordedGuess, SessionKey, SessionMeta, SessionRecord,
};
