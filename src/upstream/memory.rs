use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::FetchError;
use crate::models::RawRecord;
use crate::upstream::CollectionSource;

/// Scripted answer for one collection
#[derive(Debug, Clone)]
pub enum Scripted {
    Rows(Vec<RawRecord>),
    Fail(FetchError),
    /// Never answers; only the attempt timeout ends it
    Hang,
}

/// In-memory item store for driving the pipeline without a network
///
/// Collections with no script answer with zero rows.
#[derive(Debug, Default)]
pub struct MemorySource {
    scripts: HashMap<String, Scripted>,
    calls: Mutex<HashMap<String, u32>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, collection: &str, rows: Vec<serde_json::Value>) -> Self {
        let rows = rows.into_iter().map(RawRecord::from).collect();
        self.scripts.insert(collection.to_string(), Scripted::Rows(rows));
        self
    }

    pub fn with_failure(mut self, collection: &str, error: FetchError) -> Self {
        self.scripts.insert(collection.to_string(), Scripted::Fail(error));
        self
    }

    pub fn with_hang(mut self, collection: &str) -> Self {
        self.scripts.insert(collection.to_string(), Scripted::Hang);
        self
    }

    /// Number of reads issued against `collection`
    pub fn calls(&self, collection: &str) -> u32 {
        self.calls
            .lock()
            .map(|calls| calls.get(collection).copied().unwrap_or(0))
            .unwrap_or(0)
    }
}

#[async_trait]
impl CollectionSource for MemorySource {
    async fn fetch_collection(&self, collection: &str) -> Result<Vec<RawRecord>, FetchError> {
        if let Ok(mut calls) = self.calls.lock() {
            *calls.entry(collection.to_string()).or_insert(0) += 1;
        }

        match self.scripts.get(collection) {
            None => Ok(Vec::new()),
            Some(Scripted::Rows(rows)) => Ok(rows.clone()),
            Some(Scripted::Fail(e)) => Err(e.clone()),
            Some(Scripted::Hang) => std::future::pending().await,
        }
    }
}
