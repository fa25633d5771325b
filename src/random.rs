//! Random sources for level generation
//!
//! Generation never touches a global RNG; callers inject one of these.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies uniform draws in `[0, 1)`
pub trait RandomSource {
    fn random(&mut self) -> f64;
}

/// Seeded PCG stream (same seed, same levels)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn random(&mut self) -> f64 {
        self.rng.random::<f64>()
    }
}

/// Replays a fixed sequence of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    draws: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Draws outside `[0, 1)` are clamped into range.
    pub fn new(draws: impl Into<Vec<f64>>) -> Self {
        let draws = draws
            .into()
            .into_iter()
            .map(|d| if d.is_nan() { 0.0 } else { d.clamp(0.0, 1.0 - f64::EPSILON) })
            .collect();
        Self { draws, cursor: 0 }
    }

    /// Number of draws consumed so far
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn random(&mut self) -> f64 {
        if self.draws.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let value = self.draws[self.cursor % self.draws.len()];
        self.cursor += 1;
        value
    }
}
