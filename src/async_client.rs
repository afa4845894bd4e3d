//! Async wrapper around [`ComparioSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free while a
//! summarizer request or a history write is in flight.
//!
//! # Example
//!
//! ```no_run
//! use compario_sdk::{AsyncComparioSdk, ComparioSdk, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = ComparioSdk::builder().storage(MemoryStore::new()).build().unwrap();
//!     let sdk = AsyncComparioSdk::new(sdk);
//!
//!     let result = sdk.search_prices("iPhone 15").await.unwrap();
//!     println!("{}", result.summary);
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::bulk::CsvTable;
use crate::error::{ComparioError, Result};
use crate::models::{ComparisonResult, HistoryEntry};
use crate::ComparioSdk;

/// Async wrapper around [`ComparioSdk`].
///
/// The SDK sits behind a [`Mutex`] since it uses `RefCell` internally. Every
/// call holds the lock for its whole duration, so concurrent
/// [`search_and_record`](Self::search_and_record) calls are serialized and
/// the history keeps its de-duplication and size cap.
#[derive(Clone)]
pub struct AsyncComparioSdk {
    inner: Arc<Mutex<ComparioSdk>>,
}

impl AsyncComparioSdk {
    pub fn new(sdk: ComparioSdk) -> Self {
        Self {
            inner: Arc::new(Mutex::new(sdk)),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    ///
    /// The closure receives an `&ComparioSdk` reference and should return a
    /// `Result<T>`.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&ComparioSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = sdk
                .lock()
                .map_err(|_| ComparioError::InvalidArgument("SDK lock poisoned".into()))?;
            f(&guard)
        })
        .await
        .map_err(|e| ComparioError::InvalidArgument(format!("Task join error: {e}")))?
    }

    pub async fn search_prices(&self, product_name: &str) -> Result<ComparisonResult> {
        let name = product_name.to_string();
        self.run(move |s| s.search_prices(&name)).await
    }

    pub async fn search_and_record(&self, product_name: &str) -> Result<ComparisonResult> {
        let name = product_name.to_string();
        self.run(move |s| s.search_and_record(&name)).await
    }

    pub async fn search_batch(&self, table: CsvTable) -> Result<Vec<ComparisonResult>> {
        self.run(move |s| s.search_batch(&table)).await
    }

    /// Snapshot of the current history, newest first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        self.run(|s| Ok(s.history())).await
    }

    pub async fn remove_history_entry(&self, id: &str) -> Result<bool> {
        let id = id.to_string();
        self.run(move |s| s.remove_history_entry(&id)).await
    }

    pub async fn clear_history(&self) -> Result<usize> {
        self.run(|s| s.clear_history()).await
    }
}
