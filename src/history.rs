//! Bounded, de-duplicated, most-recent-first search history.
//!
//! Backed by a [`KeyValueStore`] under a single JSON-encoded key. Corrupt or
//! unreadable state never fails the caller: the cache starts empty and logs a
//! warning instead.

use chrono::Utc;
use tracing::{debug, warn};

use crate::compare::normalize_product_name;
use crate::config;
use crate::error::{ComparioError, Result};
use crate::models::{ComparisonResult, HistoryEntry};
use crate::storage::KeyValueStore;

/// Holds the user's recent searches.
///
/// Invariants after every operation: no two entries share a product name,
/// at most `capacity` entries, newest first.
pub struct HistoryCache {
    store: Box<dyn KeyValueStore>,
    key: String,
    capacity: usize,
    entries: Vec<HistoryEntry>,
}

impl HistoryCache {
    /// Load the history from `store` under the default key and capacity.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        Self::load_with(store, config::HISTORY_STORAGE_KEY, config::MAX_HISTORY_ENTRIES)
    }

    /// Load the history under a custom key and capacity (minimum 1).
    pub fn load_with(store: Box<dyn KeyValueStore>, key: &str, capacity: usize) -> Self {
        let mut cache = Self {
            store,
            key: key.to_string(),
            capacity: capacity.max(1),
            entries: Vec::new(),
        };
        cache.reload();
        cache
    }

    /// Re-read persisted state, replacing the in-memory list.
    ///
    /// Read or decode failures leave the cache empty.
    pub fn reload(&mut self) -> &[HistoryEntry] {
        self.entries = match self.read_persisted() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(key = %self.key, error = %e, "ignoring unreadable search history");
                Vec::new()
            }
        };
        self.enforce_invariants();
        &self.entries
    }

    fn read_persisted(&self) -> Result<Vec<HistoryEntry>> {
        let raw = match self.store.get(&self.key)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Vec::new()),
        };
        serde_json::from_str(&raw).map_err(|e| ComparioError::MalformedState(e.to_string()))
    }

    fn persist(&mut self) -> Result<()> {
        let encoded = serde_json::to_string(&self.entries)?;
        self.store.set(&self.key, &encoded)
    }

    fn enforce_invariants(&mut self) {
        let mut seen = std::collections::HashSet::new();
        self.entries.retain(|e| seen.insert(e.product_name.clone()));
        self.entries.truncate(self.capacity);
    }

    /// Record a search.
    ///
    /// The new entry goes first; any older entry for the same product is
    /// dropped and the list is cut to capacity. The in-memory list is updated
    /// even if the write to storage fails; the write error is returned.
    pub fn add_entry(
        &mut self,
        product_name: &str,
        best_price: f64,
        store: &str,
    ) -> Result<&[HistoryEntry]> {
        let product_name = normalize_product_name(product_name);
        validate_entry(&product_name, best_price, store)?;

        let entry = HistoryEntry {
            id: uuid::Uuid::new_v4().to_string(),
            product_name,
            best_price,
            store: store.trim().to_string(),
            timestamp: Utc::now(),
        };
        debug!(product = %entry.product_name, price = entry.best_price, "recording search");

        self.entries.retain(|e| e.product_name != entry.product_name);
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);

        self.persist()?;
        Ok(&self.entries)
    }

    /// Record the best price of a comparison.
    ///
    /// Returns `Ok(None)` without touching the history when the comparison
    /// found no prices.
    pub fn record(&mut self, result: &ComparisonResult) -> Result<Option<&HistoryEntry>> {
        let Some(best) = &result.best_price else {
            return Ok(None);
        };
        let entries = self.add_entry(&result.product_name, best.price, best.store.name())?;
        Ok(entries.first())
    }

    /// Delete a single entry by id. Returns `false` if no entry matched.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Delete every entry and the stored key. Returns the number removed.
    pub fn clear(&mut self) -> Result<usize> {
        let removed = self.entries.len();
        self.entries.clear();
        self.store.remove(&self.key)?;
        Ok(removed)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, id: &str) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

fn validate_entry(product_name: &str, best_price: f64, store: &str) -> Result<()> {
    if product_name.is_empty() {
        return Err(ComparioError::InvalidArgument(
            "Product name must not be empty".into(),
        ));
    }
    if product_name.chars().count() > config::MAX_PRODUCT_NAME_LEN {
        return Err(ComparioError::InvalidArgument(format!(
            "Product name exceeds {} characters",
            config::MAX_PRODUCT_NAME_LEN
        )));
    }
    let store = store.trim();
    if store.is_empty() || store.chars().count() > config::MAX_STORE_NAME_LEN {
        return Err(ComparioError::InvalidArgument(format!(
            "Store name must be 1 to {} characters",
            config::MAX_STORE_NAME_LEN
        )));
    }
    if !best_price.is_finite() || best_price < 0.0 {
        return Err(ComparioError::InvalidArgument(format!(
            "Invalid best price: {}",
            best_price
        )));
    }
    Ok(())
}
