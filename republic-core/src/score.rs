use crate::stats::CountryStats;

/// End-of-run legacy score.
///
/// `gdp / 10 + stability * 10 + education * 20 - debt / 5`, rounded half up
/// (toward positive infinity on exact halves).
pub fn legacy_score(stats: &CountryStats) -> i64 {
    let raw = stats.gdp / 10.0 + stats.stability * 10.0 + stats.education_level * 20.0
        - stats.external_debt / 5.0;
    (raw + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::INITIAL_STATS;

    #[test]
    fn test_baseline_score() {
        // 100 + 500 + 400 - 0
        assert_eq!(legacy_score(&INITIAL_STATS), 1000);
    }

    #[test]
    fn test_debt_drags_score() {
        let stats = CountryStats {
            external_debt: 2500.0,
            ..INITIAL_STATS
        };
        assert_eq!(legacy_score(&stats), 500);
    }

    #[test]
    fn test_halves_round_up() {
        let stats = CountryStats {
            gdp: 5.0,
            stability: 0.0,
            education_level: 0.0,
            ..INITIAL_STATS
        };
        assert_eq!(legacy_score(&stats), 1);

        let negative = CountryStats {
            external_debt: 5002.5,
            gdp: 0.0,
            stability: 0.0,
            education_level: 0.0,
            ..INITIAL_STATS
        };
        // -1000.5 rounds to -1000
        assert_eq!(legacy_score(&negative), -1000);
    }
}
