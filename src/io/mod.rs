//! Input module: tabular sources and the memoized load cache

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;

pub use csv::{read_csv, read_csv_reader};
#[cfg(feature = "excel")]
pub use excel::{read_excel, read_excel_reader};

use std::collections::HashMap;
use std::sync::Arc;

use crate::dataset::Dataset;
use crate::error::Result;

/// Memoized dataset loads, keyed by source identity
///
/// A session loads each source at most once: repeated requests against
/// the same key reuse the cached, read-only dataset. The cache is an
/// explicitly constructed value passed to whoever needs it; there is no
/// ambient global.
#[derive(Debug, Default)]
pub struct SourceCache {
    entries: HashMap<String, Arc<Dataset>>,
}

impl SourceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        SourceCache {
            entries: HashMap::new(),
        }
    }

    /// Get the dataset for `key`, loading it with `loader` on first use
    ///
    /// A failed load caches nothing, so a later retry with a corrected
    /// source is possible under the same key.
    pub fn get_or_load<F>(&mut self, key: &str, loader: F) -> Result<Arc<Dataset>>
    where
        F: FnOnce() -> Result<Dataset>,
    {
        if let Some(dataset) = self.entries.get(key) {
            return Ok(Arc::clone(dataset));
        }

        let dataset = Arc::new(loader()?);
        self.entries.insert(key.to_string(), Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Check whether a source is already cached
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of cached sources
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
