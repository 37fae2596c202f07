//! Turn sequencing for one run.
//!
//! The session owns the single [`GameState`] and calls the engine in the
//! same order every front end must: check, advance, check, offer an event,
//! apply the chosen option, check again.

use rand::rngs::StdRng;
use rand::SeedableRng;
use republic_core::{
    advance_turn, apply_option, check_game_over, legacy_score, select_weighted_event, GameEvent,
    GameOverReason, GameState, ObserverRegistry, Strategy, TurnRecord,
};

/// One answered event.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub year: i32,
    pub event_id: String,
    pub option: usize,
}

/// Outcome of a finished run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub country_name: String,
    pub strategy: String,
    pub seed: u64,
    pub final_year: i32,
    pub turns: u32,
    pub reason: Option<GameOverReason>,
    pub score: i64,
    pub checksum: u64,
    pub decisions: Vec<Decision>,
    pub state: GameState,
}

pub struct Session<'a> {
    state: GameState,
    events: &'a [GameEvent],
    rng: StdRng,
    seed: u64,
    observers: ObserverRegistry,
    decisions: Vec<Decision>,
}

impl<'a> Session<'a> {
    pub fn new(state: GameState, events: &'a [GameEvent], seed: u64) -> Self {
        Self {
            state,
            events,
            rng: StdRng::seed_from_u64(seed),
            seed,
            observers: ObserverRegistry::new(),
            decisions: Vec::new(),
        }
    }

    pub fn with_observers(mut self, observers: ObserverRegistry) -> Self {
        self.observers = observers;
        self
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Play one fiscal year. Returns `false` once the run is over.
    pub fn next_turn(&mut self, strategy: &mut dyn Strategy) -> bool {
        self.state = check_game_over(&self.state);
        if self.state.game_over {
            return false;
        }

        self.state = check_game_over(&advance_turn(&self.state));
        if self.state.game_over {
            self.observers.notify(&TurnRecord::new(&self.state, None, None));
            return false;
        }

        let events = self.events;
        let Some(event) = select_weighted_event(events, &self.state, &mut self.rng) else {
            self.observers.notify(&TurnRecord::new(&self.state, None, None));
            return true;
        };

        let choice = strategy.choose(&self.state, event);
        let Some(option) = event.options.get(choice) else {
            log::warn!(
                "Strategy '{}' chose option {} of {} for '{}'; skipping",
                strategy.name(),
                choice,
                event.options.len(),
                event.id
            );
            self.observers
                .notify(&TurnRecord::new(&self.state, Some(&event.id), None));
            return true;
        };

        self.state = check_game_over(&apply_option(&self.state, option));
        self.decisions.push(Decision {
            year: self.state.year,
            event_id: event.id.clone(),
            option: choice,
        });
        self.observers
            .notify(&TurnRecord::new(&self.state, Some(&event.id), Some(choice)));

        !self.state.game_over
    }

    /// Play until the run ends.
    pub fn run(mut self, strategy: &mut dyn Strategy) -> RunSummary {
        log::info!(
            "Starting run for {} with strategy '{}' (seed {})",
            self.state.country_name,
            strategy.name(),
            self.seed
        );

        while self.next_turn(strategy) {
            republic_core::profiling::frame_mark_year();
        }
        self.observers.shutdown();

        let state = self.state;
        RunSummary {
            country_name: state.country_name.clone(),
            strategy: strategy.name().to_string(),
            seed: self.seed,
            final_year: state.year,
            turns: state.turn,
            reason: state.game_over_reason,
            score: legacy_score(&state.country),
            checksum: state.checksum(),
            decisions: self.decisions,
            state,
        }
    }
}
