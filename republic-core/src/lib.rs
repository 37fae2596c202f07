//! # Republic Simulation Core
//!
//! Turn-based nation-management engine: pick starting artifacts, then
//! advance fiscal years, answering one weighted-random policy event per year
//! until the term limit or a collapse ends the run.
//!
//! The engine is a set of pure functions. The caller owns the single
//! [`GameState`] and threads it through every call:
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────────┐   ┌─────────────────┐
//! │  Artifacts   │──▶│ create_initial_state │──▶│    GameState    │
//! └──────────────┘   └──────────────────────┘   └────────┬────────┘
//!                                                        │
//!        ┌───────────────────────────────────────────────┘
//!        ▼
//! ┌──────────────┐   ┌─────────────────┐   ┌───────────────────────┐
//! │ advance_turn │──▶│ check_game_over │──▶│ select_weighted_event │
//! └──────────────┘   └─────────────────┘   └───────────┬───────────┘
//!        ▲                                             │ Strategy / player
//!        │           ┌─────────────────┐   ┌───────────▼───────────┐
//!        └───────────│ check_game_over │◀──│     apply_option      │
//!                    └─────────────────┘   └───────────────────────┘
//! ```
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`GameState`] | Complete run state (stats, year, flags, artifacts) |
//! | [`CountryStats`] | Bounded and unbounded national statistics |
//! | [`Artifact`], [`GameEvent`] | Catalog schema |
//! | [`Strategy`] | Chooses event options for autoplay |
//! | [`RunObserver`] | Records turns without affecting the run |
//!
//! Every function that modifies stats clamps the seven percentage stats to
//! `[0, 100]` as its last step.

pub mod ai;
pub mod bounded;
pub mod config;
pub mod content;
pub mod events;
pub mod observer;
pub mod profiling;
pub mod score;
pub mod setup;
pub mod state;
pub mod stats;
pub mod step;
pub mod testing;


pub use ai::{FirstOptionStrategy, GreedyStrategy, RandomStrategy, Strategy};
pub use config::SimConfig;
pub use content::{Artifact, EventOption, GameEvent};
pub use events::{eligible_events, select_weighted_event};
pub use observer::console::ConsoleObserver;
pub use observer::event_log::EventLogObserver;
pub use observer::{ObserverError, ObserverRegistry, RunObserver, TurnRecord};
pub use score::legacy_score;
pub use setup::{Constitution, SetupError};
pub use state::{Flags, GameOverReason, GameState, START_YEAR, TERM_LIMIT_YEAR};
pub use stats::{clamp, CountryStats, Effects, StatKey, INITIAL_STATS};
pub use step::{advance_turn, apply_option, check_game_over, create_initial_state, evaluate_game_over};
