//! In-memory stand-ins for the completion service and the review store.

use crate::api::AppState;
use crate::llm::{CompletionClient, CompletionRequest};
use crate::review::DEFAULT_TEMPERATURE;
use crate::storage::{ReviewRecord, ReviewStore, StorageError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub struct FakeCompletion {
    reply: Result<String, String>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        self.reply.clone().map_err(anyhow::Error::msg)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<ReviewRecord>>,
    broken: bool,
}

impl MemoryStore {
    /// A store whose appends always fail.
    pub fn broken() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub fn records(&self) -> Vec<ReviewRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn initialize(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn append(&self, record: &ReviewRecord) -> Result<i64, StorageError> {
        if self.broken {
            return Err(StorageError::Sqlite(rusqlite::Error::InvalidQuery));
        }
        let mut records = self.records.lock().unwrap();
        records.push(record.clone());
        Ok(records.len() as i64)
    }
}

pub fn state_with(completion: Arc<dyn CompletionClient>, store: Arc<dyn ReviewStore>) -> AppState {
    AppState {
        completion,
        store,
        temperature: DEFAULT_TEMPERATURE,
    }
}
