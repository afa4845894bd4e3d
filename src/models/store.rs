use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Store — Retailer identifier
// ---------------------------------------------------------------------------

/// A retailer quoted in a comparison.
///
/// Known retailers serialize to their display name (`"eBay"`, `"Best Buy"`).
/// Any other string round-trips through [`Store::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Store {
    Amazon,
    Flipkart,
    Walmart,
    Ebay,
    BestBuy,
    Other(String),
}

impl Store {
    pub fn name(&self) -> &str {
        match self {
            Store::Amazon => "Amazon",
            Store::Flipkart => "Flipkart",
            Store::Walmart => "Walmart",
            Store::Ebay => "eBay",
            Store::BestBuy => "Best Buy",
            Store::Other(name) => name,
        }
    }
}

impl From<&str> for Store {
    fn from(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "amazon" => Store::Amazon,
            "flipkart" => Store::Flipkart,
            "walmart" => Store::Walmart,
            "ebay" => Store::Ebay,
            "best buy" | "bestbuy" => Store::BestBuy,
            _ => Store::Other(name.to_string()),
        }
    }
}

impl From<String> for Store {
    fn from(name: String) -> Self {
        Store::from(name.as_str())
    }
}

impl From<Store> for String {
    fn from(store: Store) -> Self {
        match store {
            Store::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
