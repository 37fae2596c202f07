//! Country statistics and sparse stat deltas.

use crate::bounded::clamp_percent;
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of stat names that catalog effects may address.
///
/// Serialized names match the catalog JSON (`gdp`, `gdpGrowthRate`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatKey {
    Gdp,
    GdpGrowthRate,
    Population,
    Stability,
    EliteSatisfaction,
    MilitaryPower,
    EducationLevel,
    FamineRisk,
    InternationalRelations,
    GenderEquality,
    ExternalDebt,
}

impl StatKey {
    pub const ALL: [StatKey; 11] = [
        StatKey::Gdp,
        StatKey::GdpGrowthRate,
        StatKey::Population,
        StatKey::Stability,
        StatKey::EliteSatisfaction,
        StatKey::MilitaryPower,
        StatKey::EducationLevel,
        StatKey::FamineRisk,
        StatKey::InternationalRelations,
        StatKey::GenderEquality,
        StatKey::ExternalDebt,
    ];

    /// The stats held to the 0..=100 range.
    pub const BOUNDED: [StatKey; 7] = [
        StatKey::Stability,
        StatKey::EliteSatisfaction,
        StatKey::MilitaryPower,
        StatKey::EducationLevel,
        StatKey::FamineRisk,
        StatKey::InternationalRelations,
        StatKey::GenderEquality,
    ];

    pub fn is_bounded(self) -> bool {
        Self::BOUNDED.contains(&self)
    }

    /// Catalog name of the stat.
    pub fn name(self) -> &'static str {
        match self {
            StatKey::Gdp => "gdp",
            StatKey::GdpGrowthRate => "gdpGrowthRate",
            StatKey::Population => "population",
            StatKey::Stability => "stability",
            StatKey::EliteSatisfaction => "eliteSatisfaction",
            StatKey::MilitaryPower => "militaryPower",
            StatKey::EducationLevel => "educationLevel",
            StatKey::FamineRisk => "famineRisk",
            StatKey::InternationalRelations => "internationalRelations",
            StatKey::GenderEquality => "genderEquality",
            StatKey::ExternalDebt => "externalDebt",
        }
    }
}

impl fmt::Display for StatKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StatKey {
    type Err = UnknownStat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatKey::ALL
            .iter()
            .copied()
            .find(|key| key.name() == s)
            .ok_or_else(|| UnknownStat(s.to_string()))
    }
}

/// A stat name outside [`StatKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown stat name: {0}")]
pub struct UnknownStat(pub String);

/// A nation's condition at a point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryStats {
    /// Millions of currency units
    pub gdp: f64,
    /// Percent per year, signed
    pub gdp_growth_rate: f64,
    /// Millions of people
    pub population: f64,
    pub stability: f64,
    pub elite_satisfaction: f64,
    pub military_power: f64,
    pub education_level: f64,
    pub famine_risk: f64,
    pub international_relations: f64,
    pub gender_equality: f64,
    /// Amount owed abroad, millions of currency units
    pub external_debt: f64,
    /// Population growth rate used in the last year advance. Display only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop_growth_rate: Option<f64>,
}

/// Baseline every run starts from before artifacts are applied.
pub const INITIAL_STATS: CountryStats = CountryStats {
    gdp: 1000.0,
    gdp_growth_rate: 2.0,
    population: 5.0,
    stability: 50.0,
    elite_satisfaction: 50.0,
    military_power: 30.0,
    education_level: 20.0,
    famine_risk: 10.0,
    international_relations: 50.0,
    gender_equality: 30.0,
    external_debt: 0.0,
    pop_growth_rate: None,
};

impl Default for CountryStats {
    fn default() -> Self {
        INITIAL_STATS
    }
}

impl CountryStats {
    pub fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Gdp => self.gdp,
            StatKey::GdpGrowthRate => self.gdp_growth_rate,
            StatKey::Population => self.population,
            StatKey::Stability => self.stability,
            StatKey::EliteSatisfaction => self.elite_satisfaction,
            StatKey::MilitaryPower => self.military_power,
            StatKey::EducationLevel => self.education_level,
            StatKey::FamineRisk => self.famine_risk,
            StatKey::InternationalRelations => self.international_relations,
            StatKey::GenderEquality => self.gender_equality,
            StatKey::ExternalDebt => self.external_debt,
        }
    }

    pub fn get_mut(&mut self, key: StatKey) -> &mut f64 {
        match key {
            StatKey::Gdp => &mut self.gdp,
            StatKey::GdpGrowthRate => &mut self.gdp_growth_rate,
            StatKey::Population => &mut self.population,
            StatKey::Stability => &mut self.stability,
            StatKey::EliteSatisfaction => &mut self.elite_satisfaction,
            StatKey::MilitaryPower => &mut self.military_power,
            StatKey::EducationLevel => &mut self.education_level,
            StatKey::FamineRisk => &mut self.famine_risk,
            StatKey::InternationalRelations => &mut self.international_relations,
            StatKey::GenderEquality => &mut self.gender_equality,
            StatKey::ExternalDebt => &mut self.external_debt,
        }
    }

    /// Add every delta in `effects`. Does not clamp.
    pub fn apply_effects(&mut self, effects: &Effects) {
        for (key, delta) in effects.iter() {
            *self.get_mut(key) += delta;
        }
    }

    /// Copy with every bounded stat pulled into `[0, 100]`.
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for key in StatKey::BOUNDED {
            let value = out.get_mut(key);
            *value = clamp_percent(*value);
        }
        out
    }
}

/// Returns `stats` with the bounded fields clamped; unbounded fields pass through.
pub fn clamp(stats: &CountryStats) -> CountryStats {
    stats.clamped()
}

/// Sparse stat deltas attached to artifacts and event options.
///
/// Only present keys are visited. Deserialization is lenient: unknown stat
/// names and non-numeric values are dropped with a warning instead of
/// failing the whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Effects(BTreeMap<StatKey, f64>);

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: StatKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    pub fn insert(&mut self, key: StatKey, delta: f64) -> Option<f64> {
        self.0.insert(key, delta)
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatKey, f64)> + '_ {
        self.0.iter().map(|(&key, &delta)| (key, delta))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(StatKey, f64)> for Effects {
    fn from_iter<I: IntoIterator<Item = (StatKey, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<const N: usize> From<[(StatKey, f64); N]> for Effects {
    fn from(entries: [(StatKey, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDelta {
    Number(f64),
    Other(IgnoredAny),
}

impl<'de> Deserialize<'de> for Effects {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EffectsVisitor;

        impl<'de> Visitor<'de> for EffectsVisitor {
            type Value = Effects;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of stat names to numeric deltas")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Effects, A::Error> {
                let mut effects = BTreeMap::new();
                while let Some(name) = map.next_key::<String>()? {
                    let raw = map.next_value::<RawDelta>()?;
                    let key = match name.parse::<StatKey>() {
                        Ok(key) => key,
                        Err(e) => {
                            log::warn!("Skipping effect: {}", e);
                            continue;
                        }
                    };
                    match raw {
                        RawDelta::Number(delta) => {
                            effects.insert(key, delta);
                        }
                        RawDelta::Other(_) => {
                            log::warn!("Skipping non-numeric effect value for '{}'", key);
                        }
                    }
                }
                Ok(Effects(effects))
            }
        }

        deserializer.deserialize_map(EffectsVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounded::in_percent_range;

    #[test]
    fn test_stat_key_names_round_trip() {
        for key in StatKey::ALL {
            assert_eq!(key.name().parse::<StatKey>(), Ok(key));
        }
        assert!("popGrowthRate".parse::<StatKey>().is_err());
    }

    #[test]
    fn test_clamp_only_touches_bounded_fields() {
        let stats = CountryStats {
            gdp: -50.0,
            external_debt: -20.0,
            gdp_growth_rate: -7.5,
            stability: 140.0,
            famine_risk: -3.0,
            ..INITIAL_STATS
        };
        let clamped = clamp(&stats);
        assert_eq!(clamped.gdp, -50.0);
        assert_eq!(clamped.external_debt, -20.0);
        assert_eq!(clamped.gdp_growth_rate, -7.5);
        assert_eq!(clamped.stability, 100.0);
        assert_eq!(clamped.famine_risk, 0.0);
    }

    #[test]
    fn test_effects_skip_malformed_entries() {
        let json = r#"{"stability": 5, "gdp": "lots", "happiness": 3, "famineRisk": -2.5}"#;
        let effects: Effects = serde_json::from_str(json).unwrap();
        assert_eq!(effects.len(), 2);
        assert_eq!(effects.get(StatKey::Stability), Some(5.0));
        assert_eq!(effects.get(StatKey::FamineRisk), Some(-2.5));
        assert_eq!(effects.get(StatKey::Gdp), None);
    }

    #[test]
    fn test_apply_effects_visits_present_keys_only() {
        let mut stats = INITIAL_STATS;
        stats.apply_effects(&Effects::from([
            (StatKey::Gdp, 500.0),
            (StatKey::Stability, -5.0),
        ]));
        assert_eq!(stats.gdp, 1500.0);
        assert_eq!(stats.stability, 45.0);
        assert_eq!(stats.population, INITIAL_STATS.population);
    }

    #[test]
    fn test_stats_serialize_with_catalog_names() {
        let json = serde_json::to_value(INITIAL_STATS).unwrap();
        assert_eq!(json["gdpGrowthRate"], 2.0);
        assert_eq!(json["eliteSatisfaction"], 50.0);
        assert!(json.get("popGrowthRate").is_none());
    }

    use proptest::prelude::*;

    fn arb_stats() -> impl Strategy<Value = CountryStats> {
        proptest::collection::vec(-1.0e6..1.0e6f64, 11).prop_map(|values| {
            let mut stats = INITIAL_STATS;
            for (key, value) in StatKey::ALL.into_iter().zip(values) {
                *stats.get_mut(key) = value;
            }
            stats
        })
    }

    proptest! {
        #[test]
        fn prop_clamp_bounds_and_passthrough(stats in arb_stats()) {
            let clamped = clamp(&stats);
            for key in StatKey::ALL {
                if key.is_bounded() {
                    prop_assert!(in_percent_range(clamped.get(key)));
                } else {
                    prop_assert_eq!(clamped.get(key), stats.get(key));
                }
            }
        }
    }
}
