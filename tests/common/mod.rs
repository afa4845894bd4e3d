//! Shared test fixtures for the Compario SDK integration tests.
//!
//! Provides small deterministic catalogs, in-memory storage, and summarizer
//! doubles so tests never touch the network or the user's data directory.

#![allow(dead_code)]

use compario_sdk::error::{ComparioError, Result};
use compario_sdk::{
    ComparioSdk, MemoryStore, PricePolicy, PriceQuote, Store, StoreCatalog, StoreProfile,
    Summarizer,
};

/// A two-store catalog with non-overlapping bands: Cheapo always undercuts
/// Pricey.
pub fn two_store_catalog() -> StoreCatalog {
    StoreCatalog::new()
        .with_store(
            StoreProfile::new("Cheapo", 0.50, 0.60, "https://cheapo.test/search?q={query}")
                .unwrap(),
        )
        .with_store(
            StoreProfile::new("Pricey", 1.40, 1.50, "https://pricey.test/find/{query}").unwrap(),
        )
}

/// SDK over the default five-store catalog with in-memory history.
pub fn memory_sdk() -> ComparioSdk {
    ComparioSdk::builder()
        .storage(MemoryStore::new())
        .build()
        .unwrap()
}

pub fn sdk_with_summarizer<S: Summarizer + 'static>(summarizer: S) -> ComparioSdk {
    ComparioSdk::builder()
        .storage(MemoryStore::new())
        .price_policy(PricePolicy::Deterministic)
        .summarizer(summarizer)
        .build()
        .unwrap()
}

/// Summarizer that always errors, like an unreachable AI service.
pub struct FailingSummarizer;

impl Summarizer for FailingSummarizer {
    fn summarize(&self, _product_name: &str, _quotes: &[PriceQuote]) -> Result<String> {
        Err(ComparioError::DependencyUnavailable("summarizer offline".into()))
    }
}

/// Summarizer that returns a fixed sentence.
pub struct FixedSummarizer(pub &'static str);

impl Summarizer for FixedSummarizer {
    fn summarize(&self, _product_name: &str, _quotes: &[PriceQuote]) -> Result<String> {
        Ok(self.0.to_string())
    }
}

/// Summarizer that panics if called.
pub struct UnreachableSummarizer;

impl Summarizer for UnreachableSummarizer {
    fn summarize(&self, product_name: &str, _quotes: &[PriceQuote]) -> Result<String> {
        panic!("summarizer should not be called for {product_name}");
    }
}

pub fn is_sorted_by_price(quotes: &[PriceQuote]) -> bool {
    quotes.windows(2).all(|w| w[0].price <= w[1].price)
}

pub fn store(name: &str) -> Store {
    Store::from(name)
}
