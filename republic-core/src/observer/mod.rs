//! Observer pattern for recording a run without affecting it.
//!
//! Observers receive an immutable [`TurnRecord`] after each completed year.
//! They cannot reach back into the state, so a run with observers attached
//! is identical to one without.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = ObserverRegistry::new();
//! registry.register(Box::new(ConsoleObserver::new()));
//! registry.register(Box::new(EventLogObserver::file("run.jsonl")?));
//!
//! // In the turn loop, after the decision is applied:
//! registry.notify(&TurnRecord::new(&state, Some(event_id), Some(choice)));
//! ```

pub mod console;
pub mod event_log;

use crate::state::{GameOverReason, GameState};
use crate::stats::CountryStats;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What happened in one fiscal year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub year: i32,
    pub turn: u32,
    /// Event offered this year (None when no event was eligible)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Index of the option taken
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<usize>,
    /// Stats after the decision was applied
    pub country: CountryStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over_reason: Option<GameOverReason>,
}

impl TurnRecord {
    pub fn new(state: &GameState, event_id: Option<&str>, option: Option<usize>) -> Self {
        Self {
            year: state.year,
            turn: state.turn,
            event_id: event_id.map(str::to_string),
            option,
            country: state.country.clone(),
            game_over_reason: state.game_over_reason,
        }
    }
}

/// Errors that can occur during observation.
#[derive(Error, Debug)]
pub enum ObserverError {
    /// I/O error (e.g., writing the event log)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error (JSON output)
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Receives a record for every completed year.
///
/// Errors returned from `on_turn` are logged by the registry and do not stop
/// the run.
pub trait RunObserver: Send + Sync {
    fn on_turn(&self, record: &TurnRecord) -> Result<(), ObserverError>;

    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Called once when the run ends. Default is a no-op.
    fn on_shutdown(&self) {}
}

/// Holds the observers attached to a run.
pub struct ObserverRegistry {
    observers: Vec<Box<dyn RunObserver>>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self { observers: vec![] }
    }

    pub fn register(&mut self, observer: Box<dyn RunObserver>) {
        log::info!("Registered observer: {}", observer.name());
        self.observers.push(observer);
    }

    pub fn notify(&self, record: &TurnRecord) {
        for observer in &self.observers {
            if let Err(e) = observer.on_turn(record) {
                log::warn!("Observer '{}' failed: {}", observer.name(), e);
            }
        }
    }

    pub fn shutdown(&self) {
        for observer in &self.observers {
            observer.on_shutdown();
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl Default for ObserverRegistry {
    fn default() -> Self {
        Self::new()
    }
}
