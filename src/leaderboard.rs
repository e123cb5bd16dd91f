use crate::app_dirs::AppDirs;
use crate::error::StoreError;
use rusqlite::{params, Connection, ErrorCode};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A persisted leaderboard record tied to a unique player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: i64,
    pub name: String,
    pub wpm: i64,
    pub accuracy: i64,
    pub phrases: i64,
    /// Epoch milliseconds of the submission.
    pub timestamp: i64,
}

/// A candidate entry before the store has assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub name: String,
    pub wpm: i64,
    pub accuracy: i64,
    pub phrases: i64,
    pub timestamp: i64,
}

/// SQLite-backed leaderboard with a unique-name constraint.
///
/// Entries are inserted exactly once and never mutated or deleted; a
/// second submission for an existing name is rejected.
#[derive(Debug)]
pub struct Leaderboard {
    conn: Connection,
}

impl Leaderboard {
    /// Open (or create) the leaderboard database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open the leaderboard at the platform default data path.
    pub fn open_default() -> Result<Self, StoreError> {
        let path = AppDirs::db_path().unwrap_or_else(|| PathBuf::from("leaderboard.db"));
        Self::open(path)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS leaderboard (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                wpm INTEGER NOT NULL,
                accuracy INTEGER NOT NULL,
                phrases INTEGER NOT NULL,
                timestamp INTEGER NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_leaderboard_wpm ON leaderboard(wpm)",
            [],
        )?;

        Ok(Leaderboard { conn })
    }

    /// All entries, best score first.
    pub fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT id, name, wpm, accuracy, phrases, timestamp
            FROM leaderboard
            ORDER BY wpm DESC
            "#,
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(Entry {
                id: row.get(0)?,
                name: row.get(1)?,
                wpm: row.get(2)?,
                accuracy: row.get(3)?,
                phrases: row.get(4)?,
                timestamp: row.get(5)?,
            })
        })?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Exact, case-sensitive lookup against stored (trimmed) names.
    pub fn name_exists(&self, name: &str) -> Result<bool, StoreError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM leaderboard WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Persist a new entry and return it with its assigned id.
    ///
    /// Fails with [`StoreError::DuplicateName`] if the name is taken; the
    /// UNIQUE column makes this atomic with the write, so concurrent
    /// submissions for the same name cannot both succeed.
    pub fn insert(&self, entry: &NewEntry) -> Result<Entry, StoreError> {
        let result = self.conn.execute(
            r#"
            INSERT INTO leaderboard (name, wpm, accuracy, phrases, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                entry.name,
                entry.wpm,
                entry.accuracy,
                entry.phrases,
                entry.timestamp,
            ],
        );

        match result {
            Ok(_) => Ok(Entry {
                id: self.conn.last_insert_rowid(),
                name: entry.name.clone(),
                wpm: entry.wpm,
                accuracy: entry.accuracy,
                phrases: entry.phrases,
                timestamp: entry.timestamp,
            }),
            Err(rusqlite::Error::SqliteFailure(e, _))
                if e.code == ErrorCode::ConstraintViolation =>
            {
                Err(StoreError::DuplicateName)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn entry(name: &str, wpm: i64) -> NewEntry {
        NewEntry {
            name: name.to_string(),
            wpm,
            accuracy: 95,
            phrases: 3,
            timestamp: 1_700_000_000_000,
        }
    }

    #[test]
    fn test_empty_store_lists_nothing() {
        let db = Leaderboard::open_in_memory().unwrap();
        assert!(db.list().unwrap().is_empty());
    }

    #[test]
    fn test_insert_assigns_id_and_lists() {
        let db = Leaderboard::open_in_memory().unwrap();
        let inserted = db.insert(&entry("ash", 42)).unwrap();
        assert!(inserted.id > 0);
        assert_eq!(inserted.name, "ash");
        assert_eq!(inserted.wpm, 42);

        let listed = db.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], inserted);
    }

    #[test]
    fn test_list_orders_by_wpm_descending() {
        let db = Leaderboard::open_in_memory().unwrap();
        db.insert(&entry("slow", 30)).unwrap();
        db.insert(&entry("fast", 90)).unwrap();
        db.insert(&entry("mid", 60)).unwrap();

        let wpms: Vec<i64> = db.list().unwrap().iter().map(|e| e.wpm).collect();
        assert_eq!(wpms, vec![90, 60, 30]);
    }

    #[test]
    fn test_name_exists_is_case_sensitive() {
        let db = Leaderboard::open_in_memory().unwrap();
        db.insert(&entry("Ash", 42)).unwrap();
        assert!(db.name_exists("Ash").unwrap());
        assert!(!db.name_exists("ash").unwrap());
        assert!(!db.name_exists("misty").unwrap());
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let db = Leaderboard::open_in_memory().unwrap();
        db.insert(&entry("ash", 42)).unwrap();
        let err = db.insert(&entry("ash", 99)).unwrap_err();
        assert_matches!(err, StoreError::DuplicateName);
    }

    #[test]
    fn test_duplicate_insert_leaves_existing_row_untouched() {
        let db = Leaderboard::open_in_memory().unwrap();
        let original = db.insert(&entry("ash", 42)).unwrap();
        let _ = db.insert(&entry("ash", 99));

        let listed = db.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], original);
    }

    #[test]
    fn test_entries_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard.db");

        {
            let db = Leaderboard::open(&path).unwrap();
            db.insert(&entry("ash", 42)).unwrap();
        }

        let db = Leaderboard::open(&path).unwrap();
        let listed = db.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].name, "ash");
    }

    #[test]
    fn test_open_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("dir").join("leaderboard.db");
        let db = Leaderboard::open(&path).unwrap();
        assert!(db.list().unwrap().is_empty());
        assert!(path.exists());
    }
}
