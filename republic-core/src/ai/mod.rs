//! Decision strategies for answering yearly events without a human player.
//!
//! A [`Strategy`] sees the current state and the offered event and returns
//! the index of the option to take. The session driver applies the choice,
//! so strategies never touch state themselves.
//!
//! # Determinism
//!
//! Strategies must be deterministic given the same seed, so a run can be
//! replayed from its seed and strategy name alone.

pub mod greedy;

pub use greedy::GreedyStrategy;

use crate::content::GameEvent;
use crate::state::GameState;
use rand::Rng;
use rand::SeedableRng;

/// Chooses an option for each offered event.
pub trait Strategy {
    /// Index into `event.options` of the chosen option.
    ///
    /// Callers only offer events with at least one option; implementations
    /// must return an index below `event.options.len()`.
    fn choose(&mut self, state: &GameState, event: &GameEvent) -> usize;

    /// Human-readable name for logs and run summaries.
    fn name(&self) -> &str;
}

/// Always takes the first option.
#[derive(Debug, Default)]
pub struct FirstOptionStrategy;

impl Strategy for FirstOptionStrategy {
    fn choose(&mut self, _state: &GameState, _event: &GameEvent) -> usize {
        0
    }

    fn name(&self) -> &str {
        "first"
    }
}

/// Picks an option uniformly at random.
pub struct RandomStrategy {
    rng: rand::rngs::StdRng,
}

impl RandomStrategy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: rand::rngs::StdRng::seed_from_u64(seed),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose(&mut self, _state: &GameState, event: &GameEvent) -> usize {
        if event.options.is_empty() {
            return 0;
        }
        self.rng.gen_range(0..event.options.len())
    }

    fn name(&self) -> &str {
        "random"
    }
}
