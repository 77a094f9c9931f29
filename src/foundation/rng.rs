//! Injectable randomness.
//!
//! Every generator that needs random draws takes a `&mut R` where `R: RandomSource`. Nothing in
//! the crate touches a global RNG, so a run is reproducible from its seed and independent runs
//! can proceed in parallel with their own streams.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of uniform integers, uniform floats and normal samples.
pub trait RandomSource {
    /// Uniform integer in the inclusive range `[lo, hi]`.
    ///
    /// Degenerate ranges (`hi <= lo`) yield `lo`.
    fn next_int(&mut self, lo: i64, hi: i64) -> i64;

    /// Uniform float in the half-open range `[lo, hi)`. Degenerate ranges yield `lo`.
    fn next_float(&mut self, lo: f64, hi: f64) -> f64;

    /// Sample from `Normal(mean, stddev^2)`.
    fn next_gaussian(&mut self, mean: f64, stddev: f64) -> f64;
}

/// Seedable [`RandomSource`] backed by [`StdRng`].
#[derive(Clone, Debug)]
pub struct RandomStream {
    rng: StdRng,
    spare_normal: Option<f64>,
}

impl RandomStream {
    /// Create a reproducible stream from a 64-bit seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spare_normal: None,
        }
    }

    /// Stream for the `index`-th item of a batch sharing one base seed.
    ///
    /// Streams for different indices are decorrelated, and the result depends only on
    /// `(seed, index)`, not on the order in which items are processed.
    pub fn for_item(seed: u64, index: u64) -> Self {
        Self::from_seed(mix64(seed ^ index.wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }

    /// Split off an independent child stream, advancing this one.
    pub fn fork(&mut self) -> Self {
        Self::from_seed(self.rng.r#gen::<u64>())
    }
}

impl RandomSource for RandomStream {
    fn next_int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn next_float(&mut self, lo: f64, hi: f64) -> f64 {
        if lo.is_nan() || hi.is_nan() || hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..hi)
    }

    fn next_gaussian(&mut self, mean: f64, stddev: f64) -> f64 {
        let z = match self.spare_normal.take() {
            Some(z) => z,
            None => {
                // Box-Muller; u1 is kept away from zero so ln() stays finite.
                let u1: f64 = 1.0 - self.rng.r#gen::<f64>();
                let u2: f64 = self.rng.r#gen::<f64>();
                let mag = (-2.0 * u1.ln()).sqrt();
                let theta = std::f64::consts::TAU * u2;
                self.spare_normal = Some(mag * theta.sin());
                mag * theta.cos()
            }
        };
        mean + stddev * z
    }
}

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
