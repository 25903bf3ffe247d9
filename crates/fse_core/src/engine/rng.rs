//! Random source seam.
//!
//! Every draw in the engine goes through [`SimContext`], which borrows an
//! injectable generator. Seeding that generator makes a simulation reproducible.

use rand::{Rng, RngCore};

use super::config::EngineConfig;

/// Per-iteration context: the random source plus tuning.
pub struct SimContext<'a> {
    pub rng: &'a mut dyn RngCore,
    pub config: &'a EngineConfig,
}

impl<'a> SimContext<'a> {
    pub fn new(rng: &'a mut dyn RngCore, config: &'a EngineConfig) -> Self {
        Self { rng, config }
    }

    /// Float drawn from `[lo, hi)`. Returns `lo` for an empty range.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        if hi > lo {
            self.rng.gen_range(lo..hi)
        } else {
            lo
        }
    }

    /// Integer drawn from `[lo, hi]`. Returns `lo` for an empty range.
    pub fn random_int(&mut self, lo: i64, hi: i64) -> i64 {
        if hi > lo {
            self.rng.gen_range(lo..=hi)
        } else {
            lo
        }
    }

    /// True with probability `percent / 100`.
    pub fn percent(&mut self, percent: f64) -> bool {
        self.uniform(0.0, 100.0) < percent
    }

    pub fn pick<'s, T>(&mut self, items: &'s [T]) -> Option<&'s T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.random_int(0, items.len() as i64 - 1) as usize;
        items.get(idx)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
