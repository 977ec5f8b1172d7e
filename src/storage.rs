//! Uploaded datasets, keyed by their `dataset_id`.
//!
//! An [`InMemoryDatasetStore`] built with [`InMemoryDatasetStore::with_capacity`] evicts the
//! oldest upload once it is full; [`InMemoryDatasetStore::new`] keeps everything.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::analysis::DatasetSummary;
use crate::error::{InsightError, InsightResult};
use crate::types::Table;

/// A loaded table together with the summary returned at upload time.
#[derive(Debug, Clone)]
pub struct StoredDataset {
    pub summary: DatasetSummary,
    pub table: Arc<Table>,
}

impl StoredDataset {
    pub fn new(summary: DatasetSummary, table: Table) -> Self {
        Self {
            summary,
            table: Arc::new(table),
        }
    }

    pub fn dataset_id(&self) -> &str {
        &self.summary.dataset_id
    }
}

/// Where the HTTP layer keeps uploads between requests.
pub trait DatasetStore: Send + Sync {
    /// Store `dataset`, replacing any previous entry with the same id.
    fn insert(&self, dataset: StoredDataset) -> InsightResult<()>;

    /// Fails with [`InsightError::NotFound`] for unknown ids.
    fn get(&self, dataset_id: &str) -> InsightResult<StoredDataset>;

    fn remove(&self, dataset_id: &str) -> InsightResult<Option<StoredDataset>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Default)]
struct Entries {
    datasets: HashMap<String, StoredDataset>,
    /// Ids in insertion order, oldest first.
    order: VecDeque<String>,
}

/// Process-local store backed by a `RwLock<HashMap>`, optionally bounded.
#[derive(Debug, Default)]
pub struct InMemoryDatasetStore {
    entries: RwLock<Entries>,
    capacity: Option<usize>,
}

impl InMemoryDatasetStore {
    /// Unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding at most `capacity` datasets (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::default(),
            capacity: Some(capacity.max(1)),
        }
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    fn read(&self) -> InsightResult<RwLockReadGuard<'_, Entries>> {
        self.entries.read().map_err(|_| poisoned())
    }

    fn write(&self) -> InsightResult<RwLockWriteGuard<'_, Entries>> {
        self.entries.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> InsightError {
    InsightError::Internal {
        message: "dataset store lock poisoned".to_string(),
    }
}

impl DatasetStore for InMemoryDatasetStore {
    fn insert(&self, dataset: StoredDataset) -> InsightResult<()> {
        let mut entries = self.write()?;
        let id = dataset.dataset_id().to_owned();

        if entries.datasets.insert(id.clone(), dataset).is_some() {
            return Ok(());
        }
        entries.order.push_back(id);

        if let Some(capacity) = self.capacity {
            while entries.datasets.len() > capacity {
                let Some(oldest) = entries.order.pop_front() else {
                    break;
                };
                entries.datasets.remove(&oldest);
                debug!(dataset_id = %oldest, capacity, "evicted oldest dataset");
            }
        }
        Ok(())
    }

    fn get(&self, dataset_id: &str) -> InsightResult<StoredDataset> {
        self.read()?
            .datasets
            .get(dataset_id)
            .cloned()
            .ok_or_else(|| InsightError::NotFound {
                dataset_id: dataset_id.to_owned(),
            })
    }

    fn remove(&self, dataset_id: &str) -> InsightResult<Option<StoredDataset>> {
        let mut entries = self.write()?;
        let removed = entries.datasets.remove(dataset_id);
        if removed.is_some() {
            entries.order.retain(|id| id != dataset_id);
        }
        Ok(removed)
    }

    fn len(&self) -> usize {
        self.entries.read().map(|e| e.datasets.len()).unwrap_or(0)
    }
}
