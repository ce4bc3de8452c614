pub mod sqlite;

pub use sqlite::SqliteReviewStore;

use crate::review::ReviewResult;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Number;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("failed to serialize review: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to prepare database directory: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// One persisted review summary. The row id is assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRecord {
    pub language: String,
    /// Integer in practice; a fractional model score is stored as REAL.
    pub score: Number,
    pub bugs: String,
    pub optimizations: String,
    pub best_practices: String,
    pub created_at: String,
}

impl ReviewRecord {
    pub fn new(
        language: &str,
        result: &ReviewResult,
        created_at: DateTime<Utc>,
    ) -> Result<Self, StorageError> {
        Ok(Self {
            language: language.to_string(),
            score: result.score.clone(),
            bugs: serde_json::to_string(&result.bugs)?,
            optimizations: serde_json::to_string(&result.optimizations)?,
            best_practices: serde_json::to_string(&result.best_practices)?,
            created_at: created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        })
    }
}

/// Append-only review table.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Create the table if it does not exist. Safe to call on every start.
    async fn initialize(&self) -> Result<(), StorageError>;

    /// Insert one row and return its id.
    async fn append(&self, record: &ReviewRecord) -> Result<i64, StorageError>;
}
