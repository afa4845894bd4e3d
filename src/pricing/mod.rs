//! Mock price generation.
//!
//! Synthesizes a plausible multi-store price spread for a product name
//! without contacting any marketplace. See [`PriceGenerator`].

pub mod generator;
pub mod rng;

pub use generator::{base_price_band, PriceBand, PriceGenerator, PricePolicy};
pub use rng::{seed_for, SeededRng};

/// Round a price to two decimal places.
pub fn round_price(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
