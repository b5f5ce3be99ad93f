//! Game session state machine
//!
//! A session wraps one hidden solution and a bounded, append-only log of
//! guesses. Its status is never stored; it is derived from the log:
//!
//! ```text
//!            submit (correct)
//!   Active ───────────────────────→ Won
//!     │ ↺ submit (wrong, guesses remain)
//!     │
//!     └── submit (wrong, last guess) ──→ Exhausted
//! ```
//!
//! Terminal sessions reject every submission with
//! [`GameError::GameNotActive`] and stay unchanged.

use crate::core::{GuessResult, LetterVerdict, Word, WordError};
use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Guesses allowed per game
pub const DEFAULT_MAX_GUESSES: usize = 5;

/// Largest guess limit a session accepts
pub const MAX_GUESS_LIMIT: usize = 100;

/// Letters per word in the daily game
pub const DEFAULT_WORD_LENGTH: usize = 5;

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Active,
    Won,
    Exhausted,
}

impl GameStatus {
    /// Won and Exhausted are terminal
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Active => "active",
            Self::Won => "won",
            Self::Exhausted => "exhausted",
        })
    }
}

/// Identity of a session: one game per chat thread
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey {
    pub channel: String,
    pub thread: String,
}

impl SessionKey {
    #[must_use]
    pub fn new(channel: impl Into<String>, thread: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            thread: thread.into(),
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.channel, self.thread)
    }
}

/// Caller-owned metadata carried alongside a session
///
/// The engine never interprets these fields; it only stores and echoes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    /// Timestamp of the thread's parent message
    pub thread_ts: String,
    pub channel: String,
    /// User who started the game
    pub user: String,
    /// Date the solution belongs to, as shown to players
    pub display_date: String,
}

impl SessionMeta {
    /// The persistence key for this session
    #[must_use]
    pub fn key(&self) -> SessionKey {
        SessionKey::new(&self.channel, &self.thread_ts)
    }
}

/// A guess accepted by the session, with its feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedGuess {
    word: Word,
    result: GuessResult,
}

impl RecordedGuess {
    #[must_use]
    pub fn word(&self) -> &Word {
        &self.word
    }

    #[must_use]
    pub fn result(&self) -> &GuessResult {
        &self.result
    }
}

/// Plain form of a session, as persisted
///
/// Restoring goes through [`GameSession::from_record`], which replays every
/// guess, so a record can never produce a session that breaks its invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub meta: SessionMeta,
    pub solution: String,
    pub max_guesses: usize,
    pub guesses: Vec<String>,
}

/// One game: a hidden solution plus the guesses made so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSession {
    solution: Word,
    guesses: Vec<RecordedGuess>,
    max_guesses: usize,
    meta: SessionMeta,
}

impl GameSession {
    /// Start a game with the default guess limit
    ///
    /// The solution's length defines the length every guess must have.
    ///
    /// # Errors
    /// Returns `GameError::Construction` if the solution is empty or not
    /// purely alphabetic.
    ///
    /// # Examples
    /// ```
    /// use wordle_thread::game::{GameSession, GameStatus};
    ///
    /// let mut game = GameSession::new("earth").unwrap();
    /// let first = game.submit_guess("arise").unwrap();
    /// assert!(!first.is_winning_guess());
    /// assert_eq!(game.status(), GameStatus::Active);
    ///
    /// assert!(game.submit_guess("EARTH").unwrap().is_winning_guess());
    /// assert_eq!(game.status(), GameStatus::Won);
    /// assert!(game.submit_guess("heart").is_err());
    /// ```
    pub fn new(solution: &str) -> Result<Self, GameError> {
        Self::with_max_guesses(solution, DEFAULT_MAX_GUESSES)
    }

    /// Start a game with a custom guess limit
    ///
    /// # Errors
    /// Returns `GameError::Construction` if the solution is invalid or
    /// `max_guesses` is zero or above [`MAX_GUESS_LIMIT`].
    pub fn with_max_guesses(solution: &str, max_guesses: usize) -> Result<Self, GameError> {
        if max_guesses == 0 {
            return Err(GameError::Construction(
                "a game needs at least one guess".to_string(),
            ));
        }
        if max_guesses > MAX_GUESS_LIMIT {
            return Err(GameError::Construction(format!(
                "guess limit {max_guesses} is above {MAX_GUESS_LIMIT}"
            )));
        }

        let solution = Word::new(solution).map_err(|e| match &e {
            WordError::Empty => GameError::Construction("solution is empty".to_string()),
            WordError::InvalidCharacters(_) => {
                GameError::Construction(format!("invalid solution: {e}"))
            }
        })?;

        Ok(Self {
            solution,
            guesses: Vec::new(),
            max_guesses,
            meta: SessionMeta::default(),
        })
    }

    /// Attach caller metadata
    #[must_use]
    pub fn with_meta(mut self, meta: SessionMeta) -> Self {
        self.meta = meta;
        self
    }

    #[must_use]
    pub fn solution(&self) -> &Word {
        &self.solution
    }

    /// Letters per guess for this session
    #[must_use]
    pub fn word_length(&self) -> usize {
        self.solution.len()
    }

    #[must_use]
    pub fn max_guesses(&self) -> usize {
        self.max_guesses
    }

    #[must_use]
    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    #[must_use]
    pub fn key(&self) -> SessionKey {
        self.meta.key()
    }

    /// Accepted guesses in submission order
    #[must_use]
    pub fn guesses(&self) -> &[RecordedGuess] {
        &self.guesses
    }

    /// Current status, derived from the guess log
    #[must_use]
    pub fn status(&self) -> GameStatus {
        let won = self
            .guesses
            .last()
            .is_some_and(|last| last.word == self.solution);

        if won {
            GameStatus::Won
        } else if self.guesses.len() < self.max_guesses {
            GameStatus::Active
        } else {
            GameStatus::Exhausted
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status() == GameStatus::Active
    }

    /// Guesses left before the game is exhausted
    #[must_use]
    pub fn remaining_guesses(&self) -> usize {
        self.max_guesses.saturating_sub(self.guesses.len())
    }

    /// Submit a guess
    ///
    /// The guess is lowercased, recorded and evaluated against the solution.
    /// A rejected guess leaves the session untouched.
    ///
    /// # Errors
    /// - `GameError::GameNotActive` if the game is already won or exhausted
    /// - `GameError::InvalidLength` if the guess length differs from the solution's
    /// - `GameError::InvalidCharacters` if the guess contains non-letters
    pub fn submit_guess(&mut self, word: &str) -> Result<GuessResult, GameError> {
        let status = self.status();
        if status.is_terminal() {
            return Err(GameError::GameNotActive(status));
        }

        let length = word.chars().count();
        if length != self.word_length() {
            return Err(GameError::InvalidLength {
                expected: self.word_length(),
                actual: length,
            });
        }

        let word = Word::new(word).map_err(|_| GameError::InvalidCharacters(word.to_string()))?;
        let result = GuessResult::evaluate(&self.solution, &word)?;

        self.guesses.push(RecordedGuess {
            word,
            result: result.clone(),
        });

        Ok(result)
    }

    /// Best verdict seen so far for each guessed letter
    ///
    /// Lets a renderer color an on-screen keyboard.
    #[must_use]
    pub fn letter_hints(&self) -> BTreeMap<char, LetterVerdict> {
        let mut hints = BTreeMap::new();
        for guess in &self.guesses {
            for (&letter, &verdict) in guess.word.letters().iter().zip(guess.result.verdicts()) {
                hints
                    .entry(char::from(letter))
                    .and_modify(|best: &mut LetterVerdict| *best = (*best).max(verdict))
                    .or_insert(verdict);
            }
        }
        hints
    }

    /// Plain form for persistence
    #[must_use]
    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            meta: self.meta.clone(),
            solution: self.solution.text().to_string(),
            max_guesses: self.max_guesses,
            guesses: self
                .guesses
                .iter()
                .map(|g| g.word.text().to_string())
                .collect(),
        }
    }

    /// Rebuild a session from its persisted form by replaying its guesses
    ///
    /// # Errors
    /// Returns `GameError::Construction` if the record is inconsistent: bad
    /// solution, a guess that would be rejected, or guesses after the end.
    pub fn from_record(record: &SessionRecord) -> Result<Self, GameError> {
        let mut session =
            Self::with_max_guesses(&record.solution, record.max_guesses)?.with_meta(record.meta.clone());

        for (i, guess) in record.guesses.iter().enumerate() {
            session.submit_guess(guess).map_err(|e| {
                GameError::Construction(format!("stored guess #{} '{guess}' rejected: {e}", i + 1))
            })?;
        }

        Ok(session)
    }
}
