//! Store catalog: the retailers a comparison quotes, with their price bands.
//!
//! The catalog is plain configuration. Tests substitute a small catalog of
//! their own; an empty catalog is valid and yields comparisons with no quotes.

use crate::config;
use crate::error::{ComparioError, Result};
use crate::models::Store;

/// Placeholder replaced by the URL-encoded product name in `search_url`.
pub const QUERY_PLACEHOLDER: &str = "{query}";

// ---------------------------------------------------------------------------
// StoreProfile
// ---------------------------------------------------------------------------

/// Pricing and link settings for one retailer.
///
/// Each quote is the base price multiplied by a factor drawn from
/// `min_factor..=max_factor`, so a band below `1.0` makes a store
/// consistently cheaper than nominal.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreProfile {
    pub store: Store,
    pub min_factor: f64,
    pub max_factor: f64,
    pub search_url: String,
}

impl StoreProfile {
    /// Create a validated profile.
    ///
    /// Fails with [`ComparioError::InvalidArgument`] if either factor is
    /// negative or non-finite, or if `min_factor > max_factor`.
    pub fn new(
        store: impl Into<Store>,
        min_factor: f64,
        max_factor: f64,
        search_url: impl Into<String>,
    ) -> Result<Self> {
        let store = store.into();
        if !min_factor.is_finite() || !max_factor.is_finite() {
            return Err(ComparioError::InvalidArgument(format!(
                "Price factors for {} must be finite",
                store
            )));
        }
        if min_factor < 0.0 || min_factor > max_factor {
            return Err(ComparioError::InvalidArgument(format!(
                "Invalid price factor band {}..={} for {}",
                min_factor, max_factor, store
            )));
        }
        Ok(Self {
            store,
            min_factor,
            max_factor,
            search_url: search_url.into(),
        })
    }

    /// Build the store's search link for a product name.
    pub fn search_url_for(&self, product_name: &str) -> String {
        let encoded = urlencoding::encode(product_name);
        if self.search_url.contains(QUERY_PLACEHOLDER) {
            self.search_url.replace(QUERY_PLACEHOLDER, &encoded)
        } else {
            format!("{}{}", self.search_url, encoded)
        }
    }
}

// ---------------------------------------------------------------------------
// StoreCatalog
// ---------------------------------------------------------------------------

/// Ordered list of store profiles. Quote order follows catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreCatalog {
    profiles: Vec<StoreProfile>,
}

impl Default for StoreCatalog {
    fn default() -> Self {
        config::default_catalog()
    }
}

impl StoreCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self {
            profiles: Vec::new(),
        }
    }

    pub fn from_profiles(profiles: Vec<StoreProfile>) -> Self {
        Self { profiles }
    }

    /// Append a profile, replacing any existing profile for the same store.
    pub fn with_store(mut self, profile: StoreProfile) -> Self {
        let existing = self.profiles.iter().position(|p| p.store == profile.store);
        match existing {
            Some(idx) => self.profiles[idx] = profile,
            None => self.profiles.push(profile),
        }
        self
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StoreProfile> {
        self.profiles.iter()
    }

    pub fn get(&self, store: &Store) -> Option<&StoreProfile> {
        self.profiles.iter().find(|p| &p.store == store)
    }
}
