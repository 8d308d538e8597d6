use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::OnceCell;

use crate::input::{DataLoadError, TableSources, load_tables};
use crate::model::Dataset;

/// Lazily loaded, process-lifetime holder of the validated tables.
///
/// The first successful `get` reads and validates both sources; every later
/// call returns the same `&Dataset` without touching the filesystem.
/// Concurrent first callers block on a single initializer, and readers after
/// a successful load never block. A failed load is not cached.
#[derive(Debug)]
pub struct TableStore {
    sources: Option<TableSources>,
    cell: OnceCell<Dataset>,
    load_attempts: AtomicUsize,
}

impl TableStore {
    pub fn new(sources: TableSources) -> Self {
        Self {
            sources: Some(sources),
            cell: OnceCell::new(),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Wraps tables that are already in memory.
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            sources: None,
            cell: OnceCell::with_value(dataset),
            load_attempts: AtomicUsize::new(0),
        }
    }

    pub fn get(&self) -> Result<&Dataset, DataLoadError> {
        self.cell.get_or_try_init(|| {
            let attempt = self.load_attempts.fetch_add(1, Ordering::SeqCst) + 1;
            tracing::debug!(attempt, "loading tables");
            match &self.sources {
                Some(sources) => load_tables(sources),
                None => Err(DataLoadError::MissingInput(
                    "table store has no sources".to_string(),
                )),
            }
        })
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Number of times the sources were read, successful or not.
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }

    pub fn sources(&self) -> Option<&TableSources> {
        self.sources.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/store.rs"]
mod tests;
