//! Deterministic per-store quote synthesis.

use tracing::debug;

use super::rng::SeededRng;
use super::round_price;
use crate::catalog::StoreCatalog;
use crate::models::PriceQuote;

/// Smallest price ever quoted, so every quote stays strictly positive.
const MIN_PRICE: f64 = 0.01;

// ---------------------------------------------------------------------------
// PricePolicy
// ---------------------------------------------------------------------------

/// Whether repeated searches for a name return the same prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PricePolicy {
    /// Seed from a hash of the product name; the same name always gets the
    /// same prices.
    #[default]
    Deterministic,
    /// Fresh entropy per call.
    Random,
}

impl std::str::FromStr for PricePolicy {
    type Err = crate::error::ComparioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deterministic" | "seeded" => Ok(PricePolicy::Deterministic),
            "random" => Ok(PricePolicy::Random),
            other => Err(crate::error::ComparioError::InvalidArgument(format!(
                "Unknown price policy: {}",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// PriceBand — keyword-driven base price range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

const PHONE: PriceBand = PriceBand {
    label: "phone",
    min: 400.0,
    max: 1200.0,
};
const COMPUTER: PriceBand = PriceBand {
    label: "computer",
    min: 500.0,
    max: 1800.0,
};
const ENTERTAINMENT: PriceBand = PriceBand {
    label: "entertainment",
    min: 300.0,
    max: 900.0,
};
const AUDIO: PriceBand = PriceBand {
    label: "audio",
    min: 50.0,
    max: 400.0,
};
const GENERIC: PriceBand = PriceBand {
    label: "generic",
    min: 10.0,
    max: 150.0,
};

/// Keyword prefixes per band, checked in order; first hit wins.
const KEYWORD_BANDS: &[(&[&str], PriceBand)] = &[
    (&["iphone", "phone", "galaxy", "pixel", "smartphone", "mobile"], PHONE),
    (&["laptop", "macbook", "notebook", "tablet", "ipad"], COMPUTER),
    (&["tv", "television", "playstation", "xbox", "console"], ENTERTAINMENT),
    (&["headphone", "earbuds", "airpods", "speaker", "watch"], AUDIO),
];

/// Pick the base price band for a product name.
///
/// Words are split on non-alphanumeric characters and matched by prefix, so
/// `"Sony Headphones"` hits the audio band but `"stove"` does not hit `tv`.
pub fn base_price_band(product_name: &str) -> PriceBand {
    let lower = product_name.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    KEYWORD_BANDS
        .iter()
        .find(|(keywords, _)| {
            words
                .iter()
                .any(|w| keywords.iter().any(|k| w.starts_with(k)))
        })
        .map(|(_, band)| *band)
        .unwrap_or(GENERIC)
}

// ---------------------------------------------------------------------------
// PriceGenerator
// ---------------------------------------------------------------------------

/// Produces one [`PriceQuote`] per catalog store for a product name.
///
/// Quotes come back in catalog order; sorting is the caller's job. An empty
/// catalog yields an empty vector.
pub struct PriceGenerator<'a> {
    catalog: &'a StoreCatalog,
    policy: PricePolicy,
}

impl<'a> PriceGenerator<'a> {
    /// Create a new `PriceGenerator` bound to the given catalog.
    pub fn new(catalog: &'a StoreCatalog, policy: PricePolicy) -> Self {
        Self { catalog, policy }
    }

    /// Generate quotes for an already-normalized, non-empty product name.
    pub fn generate(&self, product_name: &str) -> Vec<PriceQuote> {
        if self.catalog.is_empty() {
            return Vec::new();
        }

        let mut rng = match self.policy {
            PricePolicy::Deterministic => SeededRng::for_product(product_name),
            PricePolicy::Random => SeededRng::from_entropy(),
        };

        let band = base_price_band(product_name);
        let base = rng.uniform(band.min, band.max);
        debug!(
            product = product_name,
            band = band.label,
            base,
            seed = ?rng.seed(),
            "generating quotes"
        );

        self.catalog
            .iter()
            .map(|profile| {
                let factor = rng.uniform(profile.min_factor, profile.max_factor);
                PriceQuote {
                    store: profile.store.clone(),
                    title: format!("{} - {}", product_name, profile.store),
                    price: round_price(base * factor).max(MIN_PRICE),
                    url: profile.search_url_for(product_name),
                    image: None,
                }
            })
            .collect()
    }
}
