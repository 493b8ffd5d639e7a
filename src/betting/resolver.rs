//! Outcome resolution with an injectable source of randomness.
//!
//! Resolution is a stateless function of a uniform draw in [0, 1). The
//! generator is passed in explicitly rather than read from process-wide
//! state, so tests can pin outcomes with a seeded or scripted source.

use rand::{Rng, SeedableRng, rngs::StdRng};
use std::sync::{Arc, Mutex};

/// Probability that a bet resolves as won
pub const WIN_PROBABILITY: f64 = 0.30;

/// Prize multiplier applied to the stake of a won bet
pub const PAYOUT_MULTIPLIER: i64 = 2;

/// Result of a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Won,
    Lost,
}

/// A source of uniform draws in [0, 1)
pub trait RandomSource: Send + Sync {
    fn next_unit(&self) -> f64;
}

/// Production source backed by the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn next_unit(&self) -> f64 {
        rand::rng().random()
    }
}

/// Deterministic source backed by a seeded generator
///
/// Two instances built from the same seed produce the same draw sequence.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&self) -> f64 {
        self.rng.lock().expect("rng mutex poisoned").random()
    }
}

/// Scripted source that replays a fixed sequence of draws
///
/// Repeats the last value once the script is exhausted. Useful for
/// forcing specific win/loss sequences in tests.
pub struct ScriptedRandom {
    draws: Vec<f64>,
    position: Mutex<usize>,
}

impl ScriptedRandom {
    pub fn new(draws: Vec<f64>) -> Self {
        assert!(!draws.is_empty(), "need at least one draw");
        Self {
            draws,
            position: Mutex::new(0),
        }
    }

    /// A source that always loses
    pub fn always_lose() -> Self {
        Self::new(vec![0.99])
    }

    /// A source that always wins
    pub fn always_win() -> Self {
        Self::new(vec![0.0])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&self) -> f64 {
        let mut position = self.position.lock().expect("position mutex poisoned");
        let value = self.draws[(*position).min(self.draws.len() - 1)];
        *position += 1;
        value
    }
}

/// Outcome resolver
///
/// Draws against the fixed win probability and computes prizes in
/// fixed-point cents, so payouts carry no rounding drift.
#[derive(Clone)]
pub struct OutcomeResolver {
    source: Arc<dyn RandomSource>,
}

impl OutcomeResolver {
    pub fn new(source: Arc<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Draw the outcome for one bet
    pub fn draw(&self) -> Outcome {
        if self.source.next_unit() <= WIN_PROBABILITY {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }

    /// Prize for a winning stake, `None` on overflow
    pub fn payout(stake: i64) -> Option<i64> {
        stake.checked_mul(PAYOUT_MULTIPLIER)
    }
}

impl Default for OutcomeResolver {
    fn default() -> Self {
        Self::new(Arc::new(ThreadRandom))
    }
}
