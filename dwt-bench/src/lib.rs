//! Shared inputs for the backend benchmarks.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic signal of `n` samples in `[-1, 1)`.
pub fn signal(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(-1.0..1.0)).collect()
}
