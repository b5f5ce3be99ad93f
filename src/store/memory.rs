//! In-process session store.

use std::sync::{Mutex, MutexGuard, PoisonError};

use rustc_hash::FxHashMap;

use crate::game::{GameSession, SessionKey, SessionRecord};

use super::{Result, SessionStore, StoreError, restore};

/// Keeps session records in a map behind a mutex.
///
/// Records, not live sessions, are stored: every `load` hands out a fresh
/// replayed copy, exactly as a database-backed store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<FxHashMap<SessionKey, SessionRecord>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn records(&self) -> MutexGuard<'_, FxHashMap<SessionKey, SessionRecord>> {
        // A panic mid-insert cannot leave a half-written record behind.
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemoryStore {
    fn create(&self, session: &GameSession) -> Result<()> {
        let key = session.key();
        let mut records = self.records();
        if records.contains_key(&key) {
            return Err(StoreError::AlreadyExists(key));
        }
        tracing::debug!(%key, "storing new game in memory");
        records.insert(key, session.to_record());
        Ok(())
    }

    fn load(&self, key: &SessionKey) -> Result<Option<GameSession>> {
        let record = self.records().get(key).cloned();
        record.map(|r| restore(key, &r)).transpose()
    }

    fn update<T, E>(
        &self,
        key: &SessionKey,
        op: impl FnOnce(&mut GameSession) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut records = self.records();
        let record = records
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(key.clone()))?;

        let mut session = restore(key, record)?;
        let value = op(&mut session)?;
        *record = session.to_record();

        tracing::debug!(%key, guesses = session.guesses().len(), "saved game in memory");
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{RegistryError, SessionMeta};

    fn sample_session(thread: &str) -> GameSession {
        GameSession::new("earth").unwrap().with_meta(SessionMeta {
            thread_ts: thread.into(),
            channel: "C1".into(),
            user: "U1".into(),
            display_date: "2024-06-10".into(),
        })
    }

    #[test]
    fn create_and_load() {
        let store = MemoryStore::new();
        let session = sample_session("1.0");

        store.create(&session).unwrap();
        let loaded = store.load(&session.key()).unwrap().unwrap();

        assert_eq!(loaded, session);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn create_duplicate_fails() {
        let store = MemoryStore::new();
        let session = sample_session("1.0");

        store.create(&session).unwrap();
        let err = store.create(&session).unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn load_missing_is_none() {
        let store = MemoryStore::new();
        assert!(store.load(&SessionKey::new("C1", "nope")).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn update_persists_guesses() {
        let store = MemoryStore::new();
        let session = sample_session("1.0");
        store.create(&session).unwrap();

        let outcome: std::result::Result<_, RegistryError> =
            store.update(&session.key(), |s| Ok(s.submit_guess("arise")?));
        assert!(!outcome.unwrap().is_winning_guess());

        let loaded = store.load(&session.key()).unwrap().unwrap();
        assert_eq!(loaded.guesses().len(), 1);
        assert_eq!(loaded.remaining_guesses(), 4);
    }

    #[test]
    fn failed_update_keeps_record() {
        let store = MemoryStore::new();
        let session = sample_session("1.0");
        store.create(&session).unwrap();

        let outcome: std::result::Result<(), RegistryError> = store.update(&session.key(), |s| {
            s.submit_guess("arise")?;
            s.submit_guess("e4rth")?;
            Ok(())
        });
        assert!(outcome.is_err());

        // The first guess went into a copy that was thrown away
        let loaded = store.load(&session.key()).unwrap().unwrap();
        assert!(loaded.guesses().is_empty());
    }

    #[test]
    fn update_missing_fails() {
        let store = MemoryStore::new();
        let outcome: std::result::Result<(), StoreError> =
            store.update(&SessionKey::new("C1", "nope"), |_| Ok(()));
        assert!(matches!(outcome, Err(StoreError::NotFound(_))));
    }
}
