//! SQLite-backed key-value persistence.
//!
//! Two slots matter:
//! - `app-data`: the serialized [`AppState`] snapshot
//! - `sound-settings`: the alarm collaborator's [`SoundSettings`]
//!
//! Loads never raise: absent or corrupt data degrades to defaults (logged).
//! Saves are best-effort: failures are logged and swallowed, so a full disk
//! or locked database never crashes the caller. The worst case is losing
//! whatever wasn't persisted yet.

use rusqlite::{params, Connection};

use crate::error::StorageError;
use crate::sound::SoundSettings;
use crate::state::AppState;

use super::data_dir;

/// Slot holding the application-state snapshot.
pub const STATE_KEY: &str = "app-data";
/// Slot holding the sound settings.
pub const SOUND_KEY: &str = "sound-settings";

/// Key-value database for state snapshots.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/chronos/chronos.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::DataDirFailed(e.to_string()))?
            .join("chronos.db");
        Self::open_at(&path)
    }

    /// Open (or create) a database at an explicit path.
    pub fn open_at(path: impl AsRef<std::path::Path>) -> Result<Self, StorageError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        // Concurrent CLI invocations share this file; wait out short writes.
        conn.busy_timeout(std::time::Duration::from_secs(5))?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|source| StorageError::OpenFailed {
                path: ":memory:".into(),
                source,
            })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(|e| StorageError::MigrationFailed(e.to_string()))
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Load the state snapshot, or the zero-value default when the slot is
    /// absent or unreadable. Never raises.
    pub fn load_state(&self) -> AppState {
        match self.kv_get(STATE_KEY) {
            Ok(Some(json)) => match serde_json::from_str(&json) {
                Ok(state) => state,
                Err(e) => {
                    log::warn!("corrupt {STATE_KEY} slot, starting fresh: {e}");
                    AppState::default()
                }
            },
            Ok(None) => AppState::default(),
            Err(e) => {
                log::warn!("failed to read {STATE_KEY} slot, starting fresh: {e}");
                AppState::default()
            }
        }
    }

    /// Persist the state snapshot. Best-effort: failures are logged and
    /// swallowed.
    pub fn save_state(&self, state: &AppState) {
        let json = match serde_json::to_string(state) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize state: {e}");
                return;
            }
        };
        if let Err(e) = self.kv_set(STATE_KEY, &json) {
            log::warn!("failed to persist {STATE_KEY} slot: {e}");
        }
    }

    /// Load the sound settings, defaulting like [`Self::load_state`].
    pub fn load_sound(&self) -> SoundSettings {
        match self.kv_get(SOUND_KEY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("corrupt {SOUND_KEY} slot, using defaults: {e}");
                SoundSettings::default()
            }),
            Ok(None) => SoundSettings::default(),
            Err(e) => {
                log::warn!("failed to read {SOUND_KEY} slot, using defaults: {e}");
                SoundSettings::default()
            }
        }
    }

    /// Persist the sound settings. Best-effort.
    pub fn save_sound(&self, sound: &SoundSettings) {
        let json = match serde_json::to_string(sound) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("failed to serialize sound settings: {e}");
                return;
            }
        };
        if let Err(e) = self.kv_set(SOUND_KEY, &json) {
            log::warn!("failed to persist {SOUND_KEY} slot: {e}");
        }
    }
}
