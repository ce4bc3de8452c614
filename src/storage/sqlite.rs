use super::{ReviewRecord, ReviewStore, StorageError};
use async_trait::async_trait;
use rusqlite::types::Value as SqlValue;
use rusqlite::{Connection, params};
use serde_json::Number;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    language TEXT,
    score INTEGER,
    bugs TEXT,
    optimizations TEXT,
    best_practices TEXT,
    created_at TEXT
);
";

/// SQLite-backed review store.
///
/// Only the path is kept. Each operation opens its own connection on a
/// blocking thread and drops it before returning, on success and on error.
pub struct SqliteReviewStore {
    path: PathBuf,
}

impl SqliteReviewStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn with_connection<T, F>(&self, op: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            let conn = Connection::open(&path)?;
            op(&conn)
        })
        .await?
    }
}

#[async_trait]
impl ReviewStore for SqliteReviewStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || -> Result<(), StorageError> {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            let conn = Connection::open(&path)?;
            conn.execute_batch(SCHEMA)?;
            Ok(())
        })
        .await??;

        info!(path = %self.path.display(), "Review store ready");
        Ok(())
    }

    async fn append(&self, record: &ReviewRecord) -> Result<i64, StorageError> {
        let record = record.clone();
        let id = self
            .with_connection(move |conn| {
                conn.execute(
                    "INSERT INTO reviews (language, score, bugs, optimizations, best_practices, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    params![
                        record.language,
                        score_value(&record.score),
                        record.bugs,
                        record.optimizations,
                        record.best_practices,
                        record.created_at,
                    ],
                )?;
                Ok(conn.last_insert_rowid())
            })
            .await?;

        debug!(id, "Review row inserted");
        Ok(id)
    }
}

fn score_value(score: &Number) -> SqlValue {
    match (score.as_i64(), score.as_f64()) {
        (Some(n), _) => SqlValue::Integer(n),
        (None, Some(f)) => SqlValue::Real(f),
        (None, None) => SqlValue::Null,
    }
}
