use std::path::PathBuf;

use crate::catalog::{StoreCatalog, StoreProfile};
use crate::models::Store;

/// Storage key holding the JSON-encoded search history.
pub const HISTORY_STORAGE_KEY: &str = "compario_search_history";
pub const MAX_HISTORY_ENTRIES: usize = 10;

pub const MAX_PRODUCT_NAME_LEN: usize = 255;
pub const MAX_STORE_NAME_LEN: usize = 100;

/// Largest accepted image upload (5 MiB).
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

/// Required header for bulk comparison tables.
pub const PRODUCT_NAME_COLUMN: &str = "ProductName";

pub const DEFAULT_SUMMARIZER_MODEL: &str = "gpt-4o-mini";

// Environment variables read by `ComparioSdkBuilder::from_env`.
pub const ENV_STORAGE_DIR: &str = "COMPARIO_STORAGE_DIR";
pub const ENV_PRICE_POLICY: &str = "COMPARIO_PRICE_POLICY";
pub const ENV_SUMMARIZER_URL: &str = "COMPARIO_SUMMARIZER_URL";
pub const ENV_SUMMARIZER_API_KEY: &str = "COMPARIO_SUMMARIZER_API_KEY";
pub const ENV_SUMMARIZER_MODEL: &str = "COMPARIO_SUMMARIZER_MODEL";

/// The five retailers quoted out of the box, with their price offset bands.
pub fn default_store_profiles() -> Vec<StoreProfile> {
    vec![
        StoreProfile {
            store: Store::Amazon,
            min_factor: 0.85,
            max_factor: 1.00,
            search_url: "https://www.amazon.com/s?k={query}".to_string(),
        },
        StoreProfile {
            store: Store::Flipkart,
            min_factor: 0.80,
            max_factor: 0.95,
            search_url: "https://www.flipkart.com/search?q={query}".to_string(),
        },
        StoreProfile {
            store: Store::Walmart,
            min_factor: 0.90,
            max_factor: 1.05,
            search_url: "https://www.walmart.com/search?q={query}".to_string(),
        },
        StoreProfile {
            store: Store::Ebay,
            min_factor: 0.75,
            max_factor: 0.95,
            search_url: "https://www.ebay.com/sch/i.html?_nkw={query}".to_string(),
        },
        StoreProfile {
            store: Store::BestBuy,
            min_factor: 1.00,
            max_factor: 1.15,
            search_url: "https://www.bestbuy.com/site/searchpage.jsp?st={query}".to_string(),
        },
    ]
}

pub fn default_catalog() -> StoreCatalog {
    StoreCatalog::from_profiles(default_store_profiles())
}

pub fn default_storage_dir() -> PathBuf {
    if let Some(data) = dirs::data_local_dir() {
        data.join("compario")
    } else {
        PathBuf::from(".compario")
    }
}
