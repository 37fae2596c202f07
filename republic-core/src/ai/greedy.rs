use crate::ai::Strategy;
use crate::content::GameEvent;
use crate::score::legacy_score;
use crate::state::{GameOverReason, GameState};
use crate::step::{apply_option, evaluate_game_over};

/// A deterministic one-step lookahead strategy.
///
/// Scores each option by the legacy score of the resulting stats, minus
/// penalties for drifting toward an end condition. Options that end the run
/// outright are only taken when nothing else is available; running out the
/// clock at the term limit is not penalised.
#[derive(Debug, Default)]
pub struct GreedyStrategy;

/// Score of an option that triggers a coup, invasion or famine.
const FATAL: i64 = i64::MIN / 2;

impl GreedyStrategy {
    pub fn new() -> Self {
        Self
    }

    fn score_outcome(&self, next: &GameState) -> i64 {
        match evaluate_game_over(next) {
            Some(GameOverReason::TermLimit) | None => {}
            Some(_) => return FATAL,
        }

        let c = &next.country;
        let mut score = legacy_score(c);

        // Margins around the end conditions, weighted well above score noise
        if c.elite_satisfaction < 35.0 {
            score -= ((35.0 - c.elite_satisfaction) * 40.0) as i64;
        }
        if c.military_power < 20.0 {
            score -= ((20.0 - c.military_power) * 60.0) as i64;
        }
        if c.famine_risk > 60.0 {
            score -= ((c.famine_risk - 60.0) * 60.0) as i64;
        }
        if c.military_power > 80.0 && c.stability < 60.0 {
            score -= ((60.0 - c.stability) * 40.0) as i64;
        }

        score
    }
}

impl Strategy for GreedyStrategy {
    fn choose(&mut self, state: &GameState, event: &GameEvent) -> usize {
        let mut best = 0;
        let mut best_score = i64::MIN;

        for (index, option) in event.options.iter().enumerate() {
            let score = self.score_outcome(&apply_option(state, option));
            log::trace!("Greedy: '{}' option {} scores {}", event.id, index, score);
            // Strict comparison keeps the earliest option on ties
            if score > best_score {
                best = index;
                best_score = score;
            }
        }

        best
    }

    fn name(&self) -> &str {
        "greedy"
    }
}
