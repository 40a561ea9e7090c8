//! Random sources
//!
//! Combat code draws randomness through [`RandomSource`] so tests can replay
//! a fixed sequence of rolls instead of relying on a live generator.

use std::collections::VecDeque;

use rand::Rng;

/// Minimal randomness interface used by the combat core
pub trait RandomSource {
    /// Uniform float in `[0, 1)`
    fn roll(&mut self) -> f64;

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    fn pick(&mut self, len: usize) -> usize;

    /// Uniform integer in `[low, high]`
    fn range(&mut self, low: u32, high: u32) -> u32;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn pick(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }

    fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            low
        } else {
            self.gen_range(low..=high)
        }
    }
}

/// Replays a scripted list of rolls, then repeats `fallback` forever
#[derive(Debug, Clone)]
pub struct ScriptedRolls {
    rolls: VecDeque<f64>,
    fallback: f64,
}

impl ScriptedRolls {
    /// Script the given rolls. Once exhausted every roll returns 0.99,
    /// which fails any chance-based check.
    pub fn new(rolls: impl IntoIterator<Item = f64>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            fallback: 0.99,
        }
    }

    /// Roll that is returned once the script is exhausted
    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = fallback;
        self
    }

    /// Rolls not yet consumed
    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl RandomSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        self.rolls.pop_front().unwrap_or(self.fallback)
    }

    fn pick(&mut self, len: usize) -> usize {
        let scaled = (self.roll() * len as f64) as usize;
        scaled.min(len.saturating_sub(1))
    }

    fn range(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = (high - low + 1) as f64;
        (low + (self.roll() * span) as u32).min(high)
    }
}
