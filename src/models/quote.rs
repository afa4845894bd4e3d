use serde::{Deserialize, Serialize};

use super::Store;

// ---------------------------------------------------------------------------
// PriceQuote — One store's offer for a product
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceQuote {
    pub store: Store,
    pub title: String,
    pub price: f64,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

// ---------------------------------------------------------------------------
// ComparisonResult — Quotes for one query, cheapest first
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    pub product_name: String,
    pub results: Vec<PriceQuote>,
    pub best_price: Option<PriceQuote>,
    pub summary: String,
}

impl ComparisonResult {
    /// True when no store returned a quote.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
