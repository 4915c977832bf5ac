//! Random source for pipe gap placement
//!
//! Kept behind a trait so tests and replays can pin the exact pipe geometry.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Supplies a gap center for each new pipe
pub trait GapSource {
    /// Draw a gap center in the inclusive range `[min, max]`
    fn next_gap_center(&mut self, min: f32, max: f32) -> f32;

    /// Seed that reproduces this source, if it has one
    fn seed(&self) -> Option<u64> {
        None
    }
}

/// PCG32 seeded from a `u64`. Same seed, same pipes.
#[derive(Debug, Clone)]
pub struct SeededGaps {
    seed: u64,
    rng: Pcg32,
}

impl SeededGaps {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl GapSource for SeededGaps {
    fn next_gap_center(&mut self, min: f32, max: f32) -> f32 {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..=max)
    }

    fn seed(&self) -> Option<u64> {
        Some(self.seed)
    }
}

/// Always returns the same gap center, clamped into the requested range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedGap(pub f32);

impl GapSource for FixedGap {
    fn next_gap_center(&mut self, min: f32, max: f32) -> f32 {
        self.0.clamp(min, max)
    }
}
