use crate::content::Artifact;
use crate::stats::{CountryStats, StatKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persistent narrative flags. Once a flag is set to `true` it is never cleared.
pub type Flags = im::OrdMap<String, bool>;

/// First fiscal year of every run.
pub const START_YEAR: i32 = 1960;

/// Reaching this year ends the run.
pub const TERM_LIMIT_YEAR: i32 = 2030;

/// Why a run ended, in evaluation priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    TermLimit,
    MilitaryCoup,
    Invasion,
    Famine,
}

impl GameOverReason {
    pub fn description(self) -> &'static str {
        match self {
            GameOverReason::TermLimit => "Term Limit Reached (2030). History will judge your legacy.",
            GameOverReason::MilitaryCoup => "Military Coup d'état",
            GameOverReason::Invasion => "Invasion",
            GameOverReason::Famine => "Famine",
        }
    }
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Complete state of one run.
///
/// Engine functions never mutate a `GameState` in place; each returns a new
/// value and the caller keeps the single source of truth. `artifacts` and
/// `flags` are persistent collections so those copies share structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub country: CountryStats,
    pub year: i32,
    pub turn: u32,
    /// Artifacts chosen at setup, kept for event weighting all run long
    pub artifacts: im::Vector<Artifact>,
    pub flags: Flags,
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_over_reason: Option<GameOverReason>,
    pub country_name: String,
}

impl GameState {
    /// Whether `flag` has been raised.
    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }

    /// Union of the tags carried by the chosen artifacts.
    pub fn artifact_tags(&self) -> rustc_hash::FxHashSet<&str> {
        self.artifacts
            .iter()
            .flat_map(|artifact| artifact.tags.iter().map(String::as_str))
            .collect()
    }

    /// Compute a deterministic checksum of the run state.
    ///
    /// Used to verify that a replay from the same seed and choices reaches
    /// the same state. Floats are hashed by bit pattern; flags iterate in
    /// key order.
    pub fn checksum(&self) -> u64 {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        self.year.hash(&mut hasher);
        self.turn.hash(&mut hasher);
        self.country_name.hash(&mut hasher);

        for key in StatKey::ALL {
            self.country.get(key).to_bits().hash(&mut hasher);
        }

        for artifact in &self.artifacts {
            artifact.id.hash(&mut hasher);
        }

        for (flag, value) in &self.flags {
            flag.hash(&mut hasher);
            value.hash(&mut hasher);
        }

        self.game_over.hash(&mut hasher);
        self.game_over_reason.hash(&mut hasher);

        hasher.finish()
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::GameStateBuilder;

    #[test]
    fn test_checksum_determinism() {
        let state = GameStateBuilder::new().flag("imf_program").build();
        assert_eq!(state.checksum(), state.checksum());
    }

    #[test]
    fn test_checksum_sensitivity() {
        let a = GameStateBuilder::new().year(1970).build();
        let b = GameStateBuilder::new().year(1971).build();
        assert_ne!(a.checksum(), b.checksum());

        let c = GameStateBuilder::new().stability(50.0).build();
        let d = GameStateBuilder::new().stability(50.000001).build();
        assert_ne!(c.checksum(), d.checksum());
    }

    #[test]
    fn test_has_flag_treats_false_as_unset() {
        let mut state = GameStateBuilder::new().build();
        state.flags.insert("x".to_string(), false);
        assert!(!state.has_flag("x"));
        assert!(!state.has_flag("y"));
    }

    #[test]
    fn test_game_state_json_round_trip() {
        let state = GameStateBuilder::new().flag("tax_haven").famine_risk(40.0).build();
        let json = serde_json::to_string(&state).unwrap();
        let back: crate::GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
