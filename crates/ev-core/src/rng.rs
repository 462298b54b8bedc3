//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A run owns exactly one `SimRng`, seeded from `RunConfig::seed`, and
//! threads `&mut SimRng` through every probabilistic decision: spawning,
//! move sampling, conflict winner selection, and strategy flips.  Because a
//! run is single-threaded and visits agents in a fixed scan order, the same
//! seed always yields the same sequence of draws.
//!
//! Independent runs (parameter sweeps) each build their own `SimRng`; seeds
//! for a batch are derived with [`mix_seed`] so that neighbouring job indices
//! land far apart in seed space.

use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Derive a per-job seed from a batch seed and a job index.
#[inline]
pub fn mix_seed(base: u64, index: u64) -> u64 {
    base ^ index.wrapping_add(1).wrapping_mul(MIXING_CONSTANT)
}

/// The single seeded random source of one simulation run.
///
/// Not `Clone`: a copy would replay the same stream.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]; NaN counts as 0).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        let p = if p.is_nan() { 0.0 } else { p.clamp(0.0, 1.0) };
        self.0.gen_bool(p)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.0)
    }

    /// Choose `amount` distinct elements (fewer if the slice is shorter), in
    /// random order.
    pub fn choose_multiple<T: Clone>(&mut self, slice: &[T], amount: usize) -> Vec<T> {
        slice.choose_multiple(&mut self.0, amount).cloned().collect()
    }

    /// Sample an index from a categorical distribution.
    ///
    /// Weights need not be normalised.  Returns `None` when no index can be
    /// drawn: empty input, all weights zero, or any weight negative,
    /// non-finite, or NaN.  Callers decide what "no draw" means.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.iter().any(|w| !w.is_finite()) {
            return None;
        }
        let dist = WeightedIndex::new(weights).ok()?;
        Some(dist.sample(&mut self.0))
    }
}
