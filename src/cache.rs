//! Content-addressed cache of decoded geometry tables.

use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use anyhow::Result;

use crate::common::sha256_file;
use crate::table::GeoTable;

/// Cache of decoded [`GeoTable`]s keyed by the SHA-256 of the file bytes.
///
/// Content addressing means a changed file is never served stale: its
/// digest is a different key and the old entry just stops being hit.
/// `invalidate` and `clear` exist for callers that want the memory back.
#[derive(Debug, Default)]
pub struct GeoCache {
    entries: AHashMap<String, Arc<GeoTable>>,
}

impl GeoCache {
    pub fn new() -> Self {
        Self { entries: AHashMap::new() }
    }

    /// Load the geometry table at `path`, reusing the decoded table when
    /// the file bytes are unchanged.
    pub fn load(&mut self, path: &Path) -> Result<Arc<GeoTable>> {
        let digest = sha256_file(path)?;
        if let Some(table) = self.entries.get(&digest) {
            return Ok(Arc::clone(table));
        }

        let table = Arc::new(GeoTable::read_from_csv(path)?);
        self.entries.insert(digest, Arc::clone(&table));
        Ok(table)
    }

    /// Drop the cached entry for the file currently at `path`. Returns
    /// whether an entry was present.
    pub fn invalidate(&mut self, path: &Path) -> Result<bool> {
        let digest = sha256_file(path)?;
        Ok(self.entries.remove(&digest).is_some())
    }

    /// Drop every cached table.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
