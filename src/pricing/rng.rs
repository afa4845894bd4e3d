use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Derive a reproducible seed from a product name.
///
/// Rolling 32-bit string hash (`h = h * 31 + c`) over the lowercased name.
/// Not cryptographic; only stability matters.
pub fn seed_for(product_name: &str) -> u64 {
    let hash = product_name
        .to_lowercase()
        .chars()
        .fold(0u32, |h, c| h.wrapping_mul(31).wrapping_add(c as u32));
    u64::from(hash)
}

/// Pseudo-random source for price generation.
///
/// Built either from a product-name seed, so the same name always yields the
/// same sequence, or from OS entropy for per-call randomness.
pub struct SeededRng {
    inner: StdRng,
    seed: Option<u64>,
}

impl SeededRng {
    pub fn for_product(product_name: &str) -> Self {
        let seed = seed_for(product_name);
        Self {
            inner: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
            seed: None,
        }
    }

    /// The seed this generator was built from, or `None` if entropy-seeded.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Draw uniformly from `low..=high`. A degenerate band returns `low`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if high <= low {
            return low;
        }
        self.inner.gen_range(low..=high)
    }
}
