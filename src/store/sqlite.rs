//! `SQLite`-backed session store.
//!
//! One row per game, keyed by `(channel, thread_ts)`. The caller metadata and
//! the guess log are kept as JSON so a row can be read without this crate.
//! Updates run inside `BEGIN IMMEDIATE`, so handles on the same file (in
//! this process or another) apply their guesses one at a time.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rusqlite::{Connection, ErrorCode, OptionalExtension, TransactionBehavior};

use crate::game::{GameSession, SessionKey, SessionMeta, SessionRecord};

use super::{Result, SessionStore, StoreError, restore};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS games (
        channel      TEXT NOT NULL,
        thread_ts    TEXT NOT NULL,
        solution     TEXT NOT NULL,
        max_guesses  INTEGER NOT NULL,
        meta         TEXT NOT NULL, -- JSON object: user, display date, ...
        guesses      TEXT NOT NULL, -- JSON array of strings
        PRIMARY KEY (channel, thread_ts)
    );
";

/// Session store over a single `SQLite` connection.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Opens (or creates) the database at `path` and ensures the schema.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the file cannot be opened or the
    /// schema cannot be created.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        // journal_mode answers with the resulting mode, so it has to be queried.
        conn.query_row("PRAGMA journal_mode = WAL", [], |_| Ok(()))?;
        tracing::info!(path = %path.display(), "opened game database");
        Self::init(conn)
    }

    /// Opens a private in-memory database.
    ///
    /// # Errors
    /// Returns [`StoreError::Sqlite`] if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for SqliteStore {
    fn create(&self, session: &GameSession) -> Result<()> {
        let key = session.key();
        let record = session.to_record();
        let meta = serde_json::to_string(&record.meta)?;
        let guesses = serde_json::to_string(&record.guesses)?;
        let max_guesses = i64::try_from(record.max_guesses).unwrap_or(i64::MAX);

        let inserted = self.conn().execute(
            "INSERT INTO games
             (channel, thread_ts, solution, max_guesses, meta, guesses)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                &key.channel,
                &key.thread,
                &record.solution,
                max_guesses,
                meta,
                guesses,
            ],
        );

        match inserted {
            Ok(_) => {
                tracing::info!(%key, "game created");
                Ok(())
            }
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::AlreadyExists(key))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn load(&self, key: &SessionKey) -> Result<Option<GameSession>> {
        read(&self.conn(), key)
    }

    fn update<T, E>(
        &self,
        key: &SessionKey,
        op: impl FnOnce(&mut GameSession) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E>
    where
        E: From<StoreError>,
    {
        let mut conn = self.conn();
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(StoreError::from)?;

        let mut session = read(&tx, key)?.ok_or_else(|| StoreError::NotFound(key.clone()))?;
        // An error here drops `tx`, which rolls back.
        let value = op(&mut session)?;

        let guesses =
            serde_json::to_string(&session.to_record().guesses).map_err(StoreError::from)?;
        tx.execute(
            "UPDATE games SET guesses = ?1 WHERE channel = ?2 AND thread_ts = ?3",
            rusqlite::params![guesses, &key.channel, &key.thread],
        )
        .map_err(StoreError::from)?;
        tx.commit().map_err(StoreError::from)?;

        tracing::debug!(%key, guesses = session.guesses().len(), "game saved");
        Ok(value)
    }
}

fn read(conn: &Connection, key: &SessionKey) -> Result<Option<GameSession>> {
    let row = conn
        .query_row(
            "SELECT solution, max_guesses, meta, guesses
             FROM games
             WHERE channel = ?1 AND thread_ts = ?2",
            rusqlite::params![&key.channel, &key.thread],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, i64>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    let Some((solution, max_guesses, meta_json, guesses_json)) = row else {
        return Ok(None);
    };

    let corrupt = |reason: String| StoreError::Corrupt {
        key: key.clone(),
        reason,
    };
    let max_guesses = usize::try_from(max_guesses)
        .map_err(|_| corrupt(format!("negative guess limit {max_guesses}")))?;
    let meta: SessionMeta = serde_json::from_str(&meta_json)
        .map_err(|e| corrupt(format!("invalid metadata: {e}")))?;
    if meta.key() != *key {
        return Err(corrupt(format!("metadata belongs to {}", meta.key())));
    }
    let guesses: Vec<String> = serde_json::from_str(&guesses_json)
        .map_err(|e| corrupt(format!("invalid guess log: {e}")))?;

    let record = SessionRecord {
        meta,
        solution,
        max_guesses,
        guesses,
    };
    restore(key, &record).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GameError;
    use crate::game::{GameStatus, MAX_GUESS_LIMIT, RegistryError};

    use tempfile::TempDir;

    fn sample_session(thread: &str) -> GameSession {
        GameSession::new("earth").unwrap().with_meta(SessionMeta {
            thread_ts: thread.into(),
            channel: "C123".into(),
            user: "U42".into(),
            display_date: "2024-06-10".into(),
        })
    }

    fn guess(
        store: &SqliteStore,
        key: &SessionKey,
        word: &str,
    ) -> std::result::Result<(), RegistryError> {
        store.update(key, |s| {
            s.submit_guess(word)?;
            Ok(())
        })
    }

    #[test]
    fn create_and_load() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = sample_session("1718000000.000100");

        store.create(&session).unwrap();
        let loaded = store.load(&session.key()).unwrap().unwrap();

        assert_eq!(loaded, session);
        assert_eq!(loaded.meta().user, "U42");
        assert_eq!(loaded.meta().display_date, "2024-06-10");
    }

    #[test]
    fn meta_is_stored_as_json() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = sample_session("1.0");
        store.create(&session).unwrap();

        let meta: String = store
            .conn()
            .query_row("SELECT meta FROM games", [], |row| row.get(0))
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&meta).unwrap();
        assert_eq!(value["user"], "U42");
        assert_eq!(value["thread_ts"], "1.0");
    }

    #[test]
    fn create_duplicate_fails() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = sample_session("1.0");

        store.create(&session).unwrap();
        let err = store.create(&session).unwrap_err();

        assert!(matches!(err, StoreError::AlreadyExists(_)));
    }

    #[test]
    fn same_thread_in_other_channel_is_distinct() {
        let store = SqliteStore::open_in_memory().unwrap();
        let first = sample_session("1.0");
        let mut meta = first.meta().clone();
        meta.channel = "C999".into();
        let second = GameSession::new("heart").unwrap().with_meta(meta);

        store.create(&first).unwrap();
        store.create(&second).unwrap();

        let loaded = store.load(&second.key()).unwrap().unwrap();
        assert_eq!(loaded.solution().text(), "heart");
    }

    #[test]
    fn load_missing_is_none() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert!(store.load(&SessionKey::new("C123", "nope")).unwrap().is_none());
    }

    #[test]
    fn update_persists_guesses() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = sample_session("1.0");
        let key = session.key();
        store.create(&session).unwrap();

        guess(&store, &key, "arise").unwrap();
        guess(&store, &key, "EARTH").unwrap();

        let loaded = store.load(&key).unwrap().unwrap();
        assert_eq!(loaded.guesses().len(), 2);
        assert_eq!(loaded.guesses()[1].word().text(), "earth");
        assert_eq!(loaded.status(), GameStatus::Won);
    }

    #[test]
    fn failed_update_writes_nothing() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = sample_session("1.0");
        let key = session.key();
        store.create(&session).unwrap();

        let err = guess(&store, &key, "ear").unwrap_err();
        assert!(matches!(err, RegistryError::Game(GameError::InvalidLength { .. })));
        assert!(store.load(&key).unwrap().unwrap().guesses().is_empty());

        // The transaction was rolled back, so the next update goes through
        guess(&store, &key, "arise").unwrap();
        assert_eq!(store.load(&key).unwrap().unwrap().guesses().len(), 1);
    }

    #[test]
    fn update_missing_fails() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = guess(&store, &SessionKey::new("C123", "nope"), "arise").unwrap_err();
        assert!(matches!(err, RegistryError::Store(StoreError::NotFound(_))));
    }

    #[test]
    fn corrupt_rows_are_reported() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = sample_session("1.0");
        store.create(&session).unwrap();

        let corrupt_after = |sql: &str| {
            store.conn().execute(sql, []).unwrap();
            let err = store.load(&session.key()).unwrap_err();
            assert!(matches!(err, StoreError::Corrupt { .. }), "{sql}");
        };

        corrupt_after("UPDATE games SET guesses = '[\"ear\"]'");
        corrupt_after("UPDATE games SET guesses = 'not json'");
        corrupt_after("UPDATE games SET guesses = '[]', meta = '{'");
        corrupt_after(
            "UPDATE games SET meta = '{\"thread_ts\":\"9.9\",\"channel\":\"C123\",\"user\":\"U42\",\"display_date\":\"\"}'",
        );
    }

    #[test]
    fn oversized_guess_limit_is_corrupt() {
        let store = SqliteStore::open_in_memory().unwrap();
        let session = sample_session("1.0");
        store.create(&session).unwrap();

        for limit in [i64::MAX, i64::try_from(MAX_GUESS_LIMIT).unwrap() + 1, -1] {
            store
                .conn()
                .execute("UPDATE games SET max_guesses = ?1", [limit])
                .unwrap();
            let err = store.load(&session.key()).unwrap_err();
            assert!(matches!(err, StoreError::Corrupt { .. }), "limit {limit}");
        }
    }

    #[test]
    fn file_database_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("games.db");
        let session = sample_session("1.0");

        {
            let store = SqliteStore::open(&path).unwrap();
            store.create(&session).unwrap();
            guess(&store, &session.key(), "heart").unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let loaded = store.load(&session.key()).unwrap().unwrap();
        assert_eq!(loaded.meta(), session.meta());
        assert_eq!(loaded.guesses()[0].word().text(), "heart");
    }
}
