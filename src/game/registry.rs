//! Serialized access to stored sessions.
//!
//! Many players race to guess in the same thread, and a chat server handles
//! their messages concurrently. The registry runs at most one operation per
//! [`SessionKey`] at a time within a process; operations on different keys do
//! not block each other. Across processes, the store's atomic
//! [`SessionStore::update`] keeps submissions from overwriting each other.
//!
//! The registry caches nothing: each operation reads the session from the
//! store, so the store stays the single source of truth even with several
//! processes sharing one database.

use std::sync::{Arc, Mutex, PoisonError};

use rustc_hash::FxHashMap;

use crate::core::GuessResult;
use crate::error::GameError;
use crate::store::{SessionStore, StoreError};

use super::{GameSession, GameStatus, SessionKey, SessionMeta};

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("no game in {0}")]
    NotFound(SessionKey),

    #[error(transparent)]
    Game(#[from] GameError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// What a successful submission produced.
#[derive(Debug, Clone)]
pub struct GuessOutcome {
    /// Feedback for the submitted guess
    pub result: GuessResult,
    /// The session as saved after the guess
    pub session: GameSession,
}

impl GuessOutcome {
    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.session.status()
    }
}

/// Front door for thread games: one lock per session identity over a store.
pub struct SessionRegistry<S> {
    store: S,
    locks: Mutex<FxHashMap<SessionKey, Arc<Mutex<()>>>>,
}

impl<S: SessionStore> SessionRegistry<S> {
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            locks: Mutex::new(FxHashMap::default()),
        }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates and stores a new game for the thread described by `meta`.
    ///
    /// # Errors
    /// - [`RegistryError::Game`] if the solution or guess limit is invalid
    /// - [`RegistryError::Store`] if a game already exists for the thread
    pub fn start(
        &self,
        solution: &str,
        max_guesses: usize,
        meta: SessionMeta,
    ) -> Result<GameSession, RegistryError> {
        let session = GameSession::with_max_guesses(solution, max_guesses)?.with_meta(meta);
        let key = session.key();

        self.with_lock(&key, || {
            self.store.create(&session)?;
            tracing::info!(
                %key,
                user = %session.meta().user,
                date = %session.meta().display_date,
                letters = session.word_length(),
                max_guesses,
                "game started"
            );
            Ok(session)
        })
    }

    /// Submits a guess to the game stored under `key` and saves the result.
    ///
    /// Load, submit and save happen in one [`SessionStore::update`], so a
    /// guess racing in through another handle on the same store is applied
    /// before or after this one, never over it. A rejected guess is not
    /// saved; the stored game is left as it was.
    ///
    /// # Errors
    /// - [`RegistryError::NotFound`] if there is no game for `key`
    /// - [`RegistryError::Game`] if the guess is rejected
    /// - [`RegistryError::Store`] if loading or saving fails
    pub fn submit(&self, key: &SessionKey, word: &str) -> Result<GuessOutcome, RegistryError> {
        self.with_lock(key, || {
            let outcome: Result<GuessOutcome, RegistryError> = self.store.update(key, |session| {
                let result = session.submit_guess(word).inspect_err(|e| {
                    tracing::debug!(%key, guess = word, error = %e, "guess rejected");
                })?;
                Ok(GuessOutcome {
                    result,
                    session: session.clone(),
                })
            });

            let outcome = match outcome {
                Err(RegistryError::Store(StoreError::NotFound(key))) => {
                    return Err(RegistryError::NotFound(key));
                }
                other => other?,
            };

            tracing::info!(
                %key,
                guess_number = outcome.session.guesses().len(),
                result = %outcome.result,
                status = %outcome.status(),
                "guess recorded"
            );
            Ok(outcome)
        })
    }

    /// Loads the current state of the game under `key`.
    ///
    /// # Errors
    /// - [`RegistryError::NotFound`] if there is no game for `key`
    /// - [`RegistryError::Store`] if loading fails
    pub fn load(&self, key: &SessionKey) -> Result<GameSession, RegistryError> {
        self.with_lock(key, || {
            self.store
                .load(key)?
                .ok_or_else(|| RegistryError::NotFound(key.clone()))
        })
    }

    /// Number of keys with a lock currently held or awaited.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn with_lock<T>(
        &self,
        key: &SessionKey,
        op: impl FnOnce() -> Result<T, RegistryError>,
    ) -> Result<T, RegistryError> {
        let lock = self.lock_for(key);
        let outcome = {
            // The lock guards no data, only ordering, so poisoning is harmless.
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            op()
        };
        drop(lock);
        self.prune();
        outcome
    }

    fn lock_for(&self, key: &SessionKey) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.clone()).or_default())
    }

    /// Drops locks nobody holds or waits on.
    ///
    /// Clones are only handed out under the map lock, so a count of one
    /// (the map's own reference) means no thread can be using that lock.
    fn prune(&self) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn meta(thread: &str) -> SessionMeta {
        SessionMeta {
            thread_ts: thread.into(),
            channel: "C1".into(),
            user: "U1".into(),
            display_date: "2024-06-10".into(),
        }
    }

    fn registry() -> SessionRegistry<MemoryStore> {
        SessionRegistry::new(MemoryStore::new())
    }

    #[test]
    fn start_then_submit() {
        let registry = registry();
        let session = registry.start("earth", 5, meta("1.0")).unwrap();
        let key = session.key();

        let outcome = registry.submit(&key, "arise").unwrap();
        assert_eq!(outcome.status(), GameStatus::Active);
        assert_eq!(outcome.session.remaining_guesses(), 4);

        let outcome = registry.submit(&key, "Earth").unwrap();
        assert!(outcome.result.is_winning_guess());
        assert_eq!(outcome.status(), GameStatus::Won);

        let stored = registry.load(&key).unwrap();
        assert_eq!(stored.guesses().len(), 2);
        assert_eq!(stored.status(), GameStatus::Won);
    }

    #[test]
    fn start_twice_in_same_thread_fails() {
        let registry = registry();
        registry.start("earth", 5, meta("1.0")).unwrap();
        let err = registry.start("heart", 5, meta("1.0")).unwrap_err();
        assert!(matches!(err, RegistryError::Store(StoreError::AlreadyExists(_))));
    }

    #[test]
    fn start_rejects_bad_solution() {
        let registry = registry();
        let err = registry.start("", 5, meta("1.0")).unwrap_err();
        assert!(matches!(err, RegistryError::Game(GameError::Construction(_))));
        assert!(registry.store().is_empty());
    }

    #[test]
    fn submit_unknown_thread() {
        let registry = registry();
        let err = registry
            .submit(&SessionKey::new("C1", "missing"), "earth")
            .unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn rejected_guess_is_not_saved() {
        let registry = registry();
        let key = registry.start("earth", 5, meta("1.0")).unwrap().key();

        let err = registry.submit(&key, "ear").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Game(GameError::InvalidLength { .. })
        ));
        assert!(registry.load(&key).unwrap().guesses().is_empty());
    }

    #[test]
    fn finished_game_rejects_guesses() {
        let registry = registry();
        let key = registry.start("earth", 1, meta("1.0")).unwrap().key();
        registry.submit(&key, "heart").unwrap();

        let err = registry.submit(&key, "earth").unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Game(GameError::GameNotActive(GameStatus::Exhausted))
        ));
    }

    #[test]
    fn locks_are_released_after_use() {
        let registry = registry();
        let key = registry.start("earth", 5, meta("1.0")).unwrap().key();
        registry.submit(&key, "arise").unwrap();
        assert_eq!(registry.in_flight(), 0);
    }

    #[test]
    fn concurrent_guesses_never_exceed_limit() {
        let registry = registry();
        let key = registry.start("earth", 5, meta("1.0")).unwrap().key();
        let guesses = ["arise", "heart", "hater", "crane", "tears", "rathe", "thare", "stare"];

        let accepted = std::thread::scope(|scope| {
            let handles: Vec<_> = guesses
                .iter()
                .map(|guess| {
                    let registry = &registry;
                    let key = &key;
                    scope.spawn(move || registry.submit(key, guess).is_ok())
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|&ok| ok)
                .count()
        });

        let stored = registry.load(&key).unwrap();
        assert_eq!(accepted, 5);
        assert_eq!(stored.guesses().len(), 5);
        assert_eq!(stored.status(), GameStatus::Exhausted);
    }
}
