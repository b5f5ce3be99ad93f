//! Persistence for game sessions.
//!
//! A store keeps one session per [`SessionKey`] and is the source of truth.
//! Submissions go through [`SessionStore::update`], which loads, changes and
//! saves a session as one step, so two handles on the same data never
//! overwrite each other's guesses.
//! Two implementations are provided:
//!
//! - [`MemoryStore`]: in-process map, for tests and single-process play
//! - [`SqliteStore`]: one `games` table in a `SQLite` database
//!
//! Sessions are stored as [`SessionRecord`]s and restored through
//! [`GameSession::from_record`], so a corrupt row surfaces as
//! [`StoreError::Corrupt`] instead of an invalid session.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::game::{GameSession, SessionKey, SessionRecord};

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("game not found: {0}")]
    NotFound(SessionKey),

    #[error("game already exists: {0}")]
    AlreadyExists(SessionKey),

    #[error("corrupt game {key}: {reason}")]
    Corrupt { key: SessionKey, reason: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Create, load and update sessions keyed by thread identity.
///
/// Implementations must be safe to share between threads, and `update` must
/// not lose a change made concurrently through another handle.
pub trait SessionStore: Send + Sync {
    /// Stores a brand-new session.
    ///
    /// # Errors
    /// [`StoreError::AlreadyExists`] if a session with the same key exists.
    fn create(&self, session: &GameSession) -> Result<()>;

    /// Loads a session, or `None` if there is none for `key`.
    ///
    /// # Errors
    /// [`StoreError::Corrupt`] if the stored data cannot be replayed.
    fn load(&self, key: &SessionKey) -> Result<Option<GameSession>>;

    /// Loads the session under `key`, applies `op` and persists the result,
    /// atomically with respect to every other `update` on the same data.
    ///
    /// Nothing is written if `op` fails; its error is returned as is.
    ///
    /// # Errors
    /// [`StoreError::NotFound`] if there is no session for `key`, any other
    /// store failure, or the error from `op`.
    fn update<T, E>(
        &self,
        key: &SessionKey,
        op: impl FnOnce(&mut GameSession) -> std::result::Result<T, E>,
    ) -> std::result::Result<T, E>
    where
        E: From<StoreError>;
}

/// Replays a stored record, tagging failures with the key.
fn restore(key: &SessionKey, record: &SessionRecord) -> Result<GameSession> {
    GameSession::from_record(record).map_err(|e| StoreError::Corrupt {
        key: key.clone(),
        reason: e.to_string(),
    })
}
