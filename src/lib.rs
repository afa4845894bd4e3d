//! Compario SDK for Rust.
//!
//! Simulated multi-store price comparison for a product name or photo, with a
//! bounded search history persisted through a pluggable key-value store.
//! Prices are synthesized locally; no marketplace is contacted.
//!
//! # Quick start
//!
//! ```no_run
//! use compario_sdk::{ComparioSdk, MemoryStore};
//!
//! let sdk = ComparioSdk::builder()
//!     .storage(MemoryStore::new())
//!     .build()
//!     .unwrap();
//!
//! let result = sdk.search_and_record("iPhone 15").unwrap();
//! println!("{}", result.summary);
//! assert_eq!(sdk.history().len(), 1);
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod bulk;
pub mod catalog;
pub mod compare;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod pricing;
pub mod recognition;
pub mod storage;
pub mod summarizer;

#[cfg(feature = "async")]
pub use async_client::AsyncComparioSdk;
pub use bulk::CsvTable;
pub use catalog::{StoreCatalog, StoreProfile};
pub use error::{ComparioError, Result};
pub use history::HistoryCache;
pub use models::{ComparisonResult, HistoryEntry, PriceQuote, Recognition, Store};
pub use pricing::PricePolicy;
pub use recognition::{AspectRatioRecognizer, ImageUpload, ProductRecognizer};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use summarizer::{HttpSummarizer, Summarizer};

use std::cell::RefCell;
use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use compare::Comparer;

// ---------------------------------------------------------------------------
// ComparioSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`ComparioSdk`] instance.
///
/// Use [`ComparioSdk::builder()`] to obtain a builder, chain configuration
/// methods, and call [`build()`](ComparioSdkBuilder::build) to create the SDK.
pub struct ComparioSdkBuilder {
    catalog: Option<StoreCatalog>,
    policy: PricePolicy,
    storage: Option<Box<dyn KeyValueStore>>,
    storage_dir: Option<PathBuf>,
    history_capacity: usize,
    summarizer: Option<Box<dyn Summarizer>>,
    recognizer: Option<Box<dyn ProductRecognizer>>,
}

impl Default for ComparioSdkBuilder {
    fn default() -> Self {
        Self {
            catalog: None,
            policy: PricePolicy::default(),
            storage: None,
            storage_dir: None,
            history_capacity: config::MAX_HISTORY_ENTRIES,
            summarizer: None,
            recognizer: None,
        }
    }
}

impl ComparioSdkBuilder {
    /// Start from environment variables.
    ///
    /// Reads `COMPARIO_STORAGE_DIR`, `COMPARIO_PRICE_POLICY`
    /// (`deterministic` or `random`), and `COMPARIO_SUMMARIZER_URL` with its
    /// optional `COMPARIO_SUMMARIZER_API_KEY` and `COMPARIO_SUMMARIZER_MODEL`.
    /// Unset variables keep the defaults; an unknown policy is an error.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::default();

        if let Some(dir) = env_var(config::ENV_STORAGE_DIR) {
            builder = builder.storage_dir(dir);
        }
        if let Some(policy) = env_var(config::ENV_PRICE_POLICY) {
            builder = builder.price_policy(policy.parse()?);
        }
        if let Some(url) = env_var(config::ENV_SUMMARIZER_URL) {
            let mut summarizer = HttpSummarizer::new(url);
            if let Some(key) = env_var(config::ENV_SUMMARIZER_API_KEY) {
                summarizer = summarizer.api_key(key);
            }
            if let Some(model) = env_var(config::ENV_SUMMARIZER_MODEL) {
                summarizer = summarizer.model(model);
            }
            builder = builder.summarizer(summarizer);
        }

        Ok(builder)
    }

    /// Replace the default five-store catalog.
    pub fn catalog(mut self, catalog: StoreCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Choose between name-seeded and per-call random prices.
    ///
    /// Defaults to [`PricePolicy::Deterministic`].
    pub fn price_policy(mut self, policy: PricePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Persist history through a custom store. Takes precedence over
    /// [`storage_dir`](Self::storage_dir).
    pub fn storage<S: KeyValueStore + 'static>(mut self, store: S) -> Self {
        self.storage = Some(Box::new(store));
        self
    }

    /// Persist history as JSON files under `path`.
    ///
    /// If neither this nor [`storage`](Self::storage) is set, the platform
    /// local data directory is used (e.g. `~/.local/share/compario` on Linux).
    pub fn storage_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.storage_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Maximum number of history entries kept. Defaults to 10.
    pub fn history_capacity(mut self, capacity: usize) -> Self {
        self.history_capacity = capacity;
        self
    }

    pub fn summarizer<S: Summarizer + 'static>(mut self, summarizer: S) -> Self {
        self.summarizer = Some(Box::new(summarizer));
        self
    }

    /// Defaults to [`AspectRatioRecognizer`].
    pub fn recognizer<R: ProductRecognizer + 'static>(mut self, recognizer: R) -> Self {
        self.recognizer = Some(Box::new(recognizer));
        self
    }

    /// Build the SDK, loading any persisted history.
    ///
    /// Corrupt history does not fail the build; only an unusable storage
    /// directory does.
    pub fn build(self) -> Result<ComparioSdk> {
        let store: Box<dyn KeyValueStore> = match self.storage {
            Some(store) => store,
            None => Box::new(FileStore::new(self.storage_dir)?),
        };
        let history =
            HistoryCache::load_with(store, config::HISTORY_STORAGE_KEY, self.history_capacity);

        Ok(ComparioSdk {
            catalog: self.catalog.unwrap_or_default(),
            policy: self.policy,
            summarizer: self.summarizer,
            recognizer: self
                .recognizer
                .unwrap_or_else(|| Box::new(AspectRatioRecognizer)),
            history: RefCell::new(history),
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// ComparioSdk
// ---------------------------------------------------------------------------

/// The main entry point for the Compario SDK.
///
/// Owns the store catalog, the optional summarizer and recognizer, and the
/// search history. Created via [`ComparioSdk::builder()`].
///
/// The history is only reachable through snapshots and whole operations, so
/// no borrow of it outlives a single method call.
pub struct ComparioSdk {
    catalog: StoreCatalog,
    policy: PricePolicy,
    summarizer: Option<Box<dyn Summarizer>>,
    recognizer: Box<dyn ProductRecognizer>,
    history: RefCell<HistoryCache>,
}

impl ComparioSdk {
    /// Create a new builder for configuring the SDK.
    pub fn builder() -> ComparioSdkBuilder {
        ComparioSdkBuilder::default()
    }

    fn comparer(&self) -> Comparer<'_> {
        Comparer::new(&self.catalog, self.policy, self.summarizer.as_deref())
    }

    // -- Comparison --------------------------------------------------------

    /// Compare prices for a product name without touching the history.
    ///
    /// Fails with [`ComparioError::InvalidArgument`] for a blank name. A
    /// failing summarizer never fails the comparison.
    pub fn search_prices(&self, product_name: &str) -> Result<ComparisonResult> {
        self.comparer().compare(product_name)
    }

    /// Compare prices and record the best one in the history.
    ///
    /// Comparisons with no quotes are not recorded. A failure to persist the
    /// history is logged; the comparison is still returned and the in-memory
    /// history still updated.
    pub fn search_and_record(&self, product_name: &str) -> Result<ComparisonResult> {
        let result = self.search_prices(product_name)?;
        if let Err(e) = self.history.borrow_mut().record(&result) {
            warn!(product = %result.product_name, error = %e, "failed to persist search history");
        }
        Ok(result)
    }

    /// Compare every row of a table's `ProductName` column.
    ///
    /// Fails with [`ComparioError::CsvSchema`] if the column is missing; no
    /// row is processed in that case. Batch results are not recorded.
    pub fn search_batch(&self, table: &CsvTable) -> Result<Vec<ComparisonResult>> {
        let results = bulk::compare_table(&self.comparer(), table)?;
        info!(rows = table.rows().len(), results = results.len(), "batch comparison complete");
        Ok(results)
    }

    // -- Recognition -------------------------------------------------------

    /// Validate an upload and identify the product in it.
    ///
    /// Recognizer failures surface as
    /// [`ComparioError::DependencyUnavailable`]; callers may retry. When the
    /// recognizer reports a brand, model or size, the product name is rebuilt
    /// from them with the brand in canonical spelling.
    pub fn recognize(&self, image: &ImageUpload) -> Result<Recognition> {
        image.validate()?;
        let recognition = self.recognizer.recognize(image).map_err(|e| match e {
            ComparioError::DependencyUnavailable(msg) => ComparioError::DependencyUnavailable(msg),
            other => ComparioError::DependencyUnavailable(other.to_string()),
        })?;
        Ok(recognition.normalized())
    }

    /// Recognize the product in a photo, then compare and record its prices.
    pub fn search_by_image(&self, image: &ImageUpload) -> Result<ComparisonResult> {
        let recognition = self.recognize(image)?;
        info!(
            product = %recognition.product_name,
            confidence = recognition.confidence,
            source = %recognition.source,
            "product recognized"
        );
        self.search_and_record(&recognition.product_name)
    }

    // -- History -----------------------------------------------------------

    /// Snapshot of the search history, newest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.history.borrow().entries().to_vec()
    }

    /// Delete one history entry by id. Returns `false` if no entry matched.
    pub fn remove_history_entry(&self, id: &str) -> Result<bool> {
        self.history.borrow_mut().remove(id)
    }

    /// Delete every history entry. Returns the number removed.
    pub fn clear_history(&self) -> Result<usize> {
        self.history.borrow_mut().clear()
    }

    /// Re-read the history from storage, e.g. after another process wrote it.
    pub fn reload_history(&self) -> Vec<HistoryEntry> {
        self.history.borrow_mut().reload().to_vec()
    }

    // -- Configuration -----------------------------------------------------

    pub fn catalog(&self) -> &StoreCatalog {
        &self.catalog
    }

    pub fn price_policy(&self) -> PricePolicy {
        self.policy
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for ComparioSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stores: Vec<&str> = self.catalog.iter().map(|p| p.store.name()).collect();
        let history = self.history.borrow();
        write!(
            f,
            "ComparioSdk(stores=[{}], policy={:?}, history={}/{})",
            stores.join(", "),
            self.policy,
            history.len(),
            history.capacity()
        )
    }
}
