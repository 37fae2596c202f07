use serde::{Deserialize, Serialize};

/// Settings owned by the application around the engine.
///
/// The five engine functions use fixed rule constants; these values only
/// shape setup validation and score bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Constitution points available when choosing artifacts.
    pub points_budget: i32,

    /// Number of runs kept in the hall of fame.
    pub leaderboard_capacity: usize,

    /// Country name used when the player does not pick one.
    pub default_country_name: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            points_budget: 5,
            leaderboard_capacity: 20,
            default_country_name: "Republic".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.points_budget, 5);
        assert_eq!(config.leaderboard_capacity, 20);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: SimConfig = serde_json::from_str(r#"{"points_budget": 8}"#).unwrap();
        assert_eq!(config.points_budget, 8);
        assert_eq!(config.leaderboard_capacity, 20);
        assert_eq!(config.default_country_name, "Republic");
    }
}
