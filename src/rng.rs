#![warn(clippy::all, clippy::pedantic)]

//! Injectable randomness for piece spawning and gimmick selection.
//!
//! Every random decision the engine makes goes through [`RandomSource`], so a
//! seeded generator (or a scripted one in tests) reproduces a game exactly.

/// The only source of randomness the engine consumes.
pub trait RandomSource {
    /// Uniform index in `0..len`. `len` is always non-zero.
    fn index(&mut self, len: usize) -> usize;

    /// Returns `true` with the given probability.
    fn chance(&mut self, probability: f32) -> bool;
}

impl RandomSource for fastrand::Rng {
    fn index(&mut self, len: usize) -> usize {
        self.usize(..len)
    }

    fn chance(&mut self, probability: f32) -> bool {
        self.f32() < probability
    }
}

/// Deterministic generator for a given seed.
#[must_use]
pub fn seeded(seed: u64) -> fastrand::Rng {
    fastrand::Rng::with_seed(seed)
}
