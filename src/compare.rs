//! Comparison orchestration: validate, quote, sort, pick the best price,
//! summarize.

use tracing::{info, warn};

use crate::catalog::StoreCatalog;
use crate::error::{ComparioError, Result};
use crate::models::{ComparisonResult, PriceQuote};
use crate::pricing::{PriceGenerator, PricePolicy};
use crate::summarizer::Summarizer;

/// Trim and collapse runs of whitespace to a single space.
pub fn normalize_product_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Summary used when there are no quotes at all.
pub fn no_prices_summary(product_name: &str) -> String {
    format!("No prices found for {}.", product_name)
}

/// Summary used when the summarizer is absent or fails.
pub fn fallback_summary(product_name: &str, best: &PriceQuote, store_count: usize) -> String {
    format!(
        "The best price for {} is ${:.2} at {}, compared across {} stores.",
        product_name, best.price, best.store, store_count
    )
}

/// Runs one price comparison against a catalog.
pub struct Comparer<'a> {
    catalog: &'a StoreCatalog,
    policy: PricePolicy,
    summarizer: Option<&'a dyn Summarizer>,
}

impl<'a> Comparer<'a> {
    pub fn new(
        catalog: &'a StoreCatalog,
        policy: PricePolicy,
        summarizer: Option<&'a dyn Summarizer>,
    ) -> Self {
        Self {
            catalog,
            policy,
            summarizer,
        }
    }

    /// Compare prices for a product name.
    ///
    /// Fails only with [`ComparioError::InvalidArgument`] for a blank name;
    /// summarizer failures fall back to a templated summary.
    pub fn compare(&self, product_name: &str) -> Result<ComparisonResult> {
        let product_name = normalize_product_name(product_name);
        if product_name.is_empty() {
            return Err(ComparioError::InvalidArgument(
                "Product name must not be empty".into(),
            ));
        }
        if product_name.chars().count() > crate::config::MAX_PRODUCT_NAME_LEN {
            return Err(ComparioError::InvalidArgument(format!(
                "Product name exceeds {} characters",
                crate::config::MAX_PRODUCT_NAME_LEN
            )));
        }

        let mut results = PriceGenerator::new(self.catalog, self.policy).generate(&product_name);
        // Stable, so equal prices keep catalog order.
        results.sort_by(|a, b| a.price.total_cmp(&b.price));

        let Some(best) = results.first().cloned() else {
            info!(product = %product_name, "no prices found");
            let summary = no_prices_summary(&product_name);
            return Ok(ComparisonResult {
                product_name,
                results,
                best_price: None,
                summary,
            });
        };

        let summary = self.summarize(&product_name, &results, &best);
        info!(
            product = %product_name,
            stores = results.len(),
            best_store = %best.store,
            best_price = best.price,
            "comparison complete"
        );

        Ok(ComparisonResult {
            product_name,
            results,
            best_price: Some(best),
            summary,
        })
    }

    fn summarize(&self, product_name: &str, results: &[PriceQuote], best: &PriceQuote) -> String {
        let Some(summarizer) = self.summarizer else {
            return fallback_summary(product_name, best, results.len());
        };
        match summarizer.summarize(product_name, results) {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!(product = %product_name, "summarizer returned empty text; using fallback");
                fallback_summary(product_name, best, results.len())
            }
            Err(e) => {
                warn!(product = %product_name, error = %e, "summarizer failed; using fallback");
                fallback_summary(product_name, best, results.len())
            }
        }
    }
}
