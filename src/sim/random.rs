//! Injected randomness
//!
//! The simulation never touches a global generator. Gap placement and cosmetic
//! choices pull unit draws from a [`RandomSource`] handed in by the host: a
//! seeded PCG stream in production, a fixed script in tests and replays.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform draws in `[0, 1)`
pub trait RandomSource {
    fn next_unit(&mut self) -> f32;

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn pick(&mut self, len: usize) -> usize {
        let index = (self.next_unit() * len as f32) as usize;
        index.min(len.saturating_sub(1))
    }
}

/// Seeded PCG stream (reproducible per seed)
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: Pcg32,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    draws: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    /// Draws are clamped into `[0, 1]`; an empty script always yields `0.5`
    pub fn new(draws: impl Into<Vec<f32>>) -> Self {
        Self {
            draws: draws.into(),
            cursor: 0,
        }
    }

    /// Source that always returns the same draw
    pub fn constant(draw: f32) -> Self {
        Self::new(vec![draw])
    }
}

impl RandomSource for ScriptedSource {
    fn next_unit(&mut self) -> f32 {
        if self.draws.is_empty() {
            return 0.5;
        }
        let draw = self.draws[self.cursor % self.draws.len()];
        self.cursor = self.cursor.wrapping_add(1);
        if draw.is_finite() {
            draw.clamp(0.0, 1.0)
        } else {
            0.5
        }
    }
}
