use thiserror::Error;

/// Errors produced by the leaderboard store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A row with this player name already exists. Submissions are rejected,
    /// never overwritten.
    #[error("name already taken")]
    DuplicateName,

    /// Unexpected failure in the underlying database.
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
