//! Thread games: the chat-integration flow, driven from the command line
//!
//! A chat bot would call these on a slash command and on each reply in the
//! game's thread. Each call goes through the [`SessionRegistry`], so replies
//! racing in the same thread are applied one at a time.

use crate::game::{GameSession, GuessOutcome, RegistryError, SessionKey, SessionMeta, SessionRegistry};
use crate::store::SessionStore;
use crate::wordlists::SolutionSource;
use jiff::civil::Date;

/// Errors from thread game commands
#[derive(Debug, thiserror::Error)]
pub enum ThreadError {
    #[error("no solution available for {0}")]
    NoSolution(Date),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

/// Who is acting, and in which thread
#[derive(Debug, Clone)]
pub struct ThreadContext {
    pub channel: String,
    pub thread: String,
    pub user: String,
}

impl ThreadContext {
    #[must_use]
    pub fn key(&self) -> SessionKey {
        SessionKey::new(&self.channel, &self.thread)
    }
}

/// Start a new game in a thread with the source's word for `date`
///
/// # Errors
///
/// Returns an error if the source has no word for the date, the word is
/// unusable, or the thread already has a game.
pub fn start_game<S: SessionStore>(
    registry: &SessionRegistry<S>,
    source: &dyn SolutionSource,
    date: Date,
    context: &ThreadContext,
    max_guesses: usize,
) -> Result<GameSession, ThreadError> {
    let daily = source
        .solution_for(date)
        .ok_or(ThreadError::NoSolution(date))?;

    let meta = SessionMeta {
        thread_ts: context.thread.clone(),
        channel: context.channel.clone(),
        user: context.user.clone(),
        display_date: daily.display_date,
    };

    Ok(registry.start(&daily.solution, max_guesses, meta)?)
}

/// Submit a player's guess to the thread's game
///
/// Surrounding whitespace in the reply is ignored.
///
/// # Errors
///
/// Returns an error if the thread has no game, the guess is rejected, or
/// the store fails.
pub fn submit_guess<S: SessionStore>(
    registry: &SessionRegistry<S>,
    context: &ThreadContext,
    word: &str,
) -> Result<GuessOutcome, ThreadError> {
    let key = context.key();
    tracing::debug!(%key, user = %context.user, "guess received");
    Ok(registry.submit(&key, word.trim())?)
}

/// Current state of the thread's game
///
/// # Errors
///
/// Returns an error if the thread has no game or the store fails.
pub fn show_game<S: SessionStore>(
    registry: &SessionRegistry<S>,
    context: &ThreadContext,
) -> Result<GameSession, ThreadError> {
    Ok(registry.load(&context.key())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Word;
    use crate::error::GameError;
    use crate::game::GameStatus;
    use crate::store::MemoryStore;
    use crate::wordlists::{DailyWordList, FixedSolution};
    use jiff::civil::date;

    fn context(user: &str) -> ThreadContext {
        ThreadContext {
            channel: "C123".into(),
            thread: "1718000000.000100".into(),
            user: user.into(),
        }
    }

    fn earth() -> FixedSolution {
        FixedSolution::new(Word::new("earth").unwrap())
    }

    #[test]
    fn players_share_one_game() {
        let registry = SessionRegistry::new(MemoryStore::new());
        let day = date(2024, 6, 10);

        let game = start_game(&registry, &earth(), day, &context("U1"), 5).unwrap();
        assert_eq!(game.meta().user, "U1");
        assert_eq!(game.meta().display_date, "2024-06-10");

        let first = submit_guess(&registry, &context("U2"), " arise \n").unwrap();
        assert_eq!(first.status(), GameStatus::Active);

        let second = submit_guess(&registry, &context("U3"), "EARTH").unwrap();
        assert_eq!(second.status(), GameStatus::Won);

        let shown = show_game(&registry, &context("U4")).unwrap();
        assert_eq!(shown.guesses().len(), 2);
        assert_eq!(shown.meta().user, "U1");
    }

    #[test]
    fn guess_after_game_over() {
        let registry = SessionRegistry::new(MemoryStore::new());
        start_game(&registry, &earth(), date(2024, 6, 10), &context("U1"), 1).unwrap();
        submit_guess(&registry, &context("U1"), "heart").unwrap();

        let err = submit_guess(&registry, &context("U2"), "earth").unwrap_err();
        assert!(matches!(
            err,
            ThreadError::Registry(RegistryError::Game(GameError::GameNotActive(
                GameStatus::Exhausted
            )))
        ));
    }

    #[test]
    fn empty_source_cannot_start() {
        let registry = SessionRegistry::new(MemoryStore::new());
        let source = DailyWordList::new(Vec::new());
        let err = start_game(&registry, &source, date(2024, 6, 10), &context("U1"), 5).unwrap_err();
        assert!(matches!(err, ThreadError::NoSolution(_)));
    }

    #[test]
    fn show_missing_game() {
        let registry = SessionRegistry::new(MemoryStore::new());
        let err = show_game(&registry, &context("U1")).unwrap_err();
        assert!(matches!(
            err,
            ThreadError::Registry(RegistryError::NotFound(_))
        ));
    }
}
