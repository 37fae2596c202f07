//! Yearly event selection: gate filtering followed by tag-weighted random choice.

use crate::content::GameEvent;
use crate::state::GameState;
use rand::Rng;
use rustc_hash::FxHashSet;
use tracing::instrument;

/// Weight of an event sharing a tag with any chosen artifact.
pub const TAGGED_EVENT_WEIGHT: u32 = 3;

/// Weight of every other eligible event.
pub const BASE_EVENT_WEIGHT: u32 = 1;

/// Whether `event` may be offered in `state`.
///
/// Every required flag must be set and the current year must fall inside the
/// event's inclusive year window.
pub fn is_eligible(event: &GameEvent, state: &GameState) -> bool {
    event.req_flags.iter().all(|flag| state.has_flag(flag)) && event.in_year_window(state.year)
}

/// Events from `events` that pass the flag and year gates, in catalog order.
pub fn eligible_events<'a>(events: &'a [GameEvent], state: &GameState) -> Vec<&'a GameEvent> {
    events.iter().filter(|event| is_eligible(event, state)).collect()
}

/// Selection weight of an eligible event given the active artifact tags.
pub fn event_weight(event: &GameEvent, active_tags: &FxHashSet<&str>) -> u32 {
    if event.tags.iter().any(|tag| active_tags.contains(tag.as_str())) {
        TAGGED_EVENT_WEIGHT
    } else {
        BASE_EVENT_WEIGHT
    }
}

/// Pick this year's event.
///
/// Draws `r` uniformly in `[0, total_weight)` and walks the eligible events
/// in catalog order, subtracting each weight until the remainder reaches
/// zero. Returns `None` when no event passes the gates: a gated event is
/// never offered out of turn, and the caller simply skips the decision.
#[instrument(skip_all, name = "select_weighted_event")]
pub fn select_weighted_event<'a, R: Rng + ?Sized>(
    events: &'a [GameEvent],
    state: &GameState,
    rng: &mut R,
) -> Option<&'a GameEvent> {
    let active_tags = state.artifact_tags();

    let weighted: Vec<(&GameEvent, u32)> = eligible_events(events, state)
        .into_iter()
        .map(|event| (event, event_weight(event, &active_tags)))
        .collect();

    if weighted.is_empty() {
        log::warn!(
            "No eligible event in {} ({} in catalog); skipping decision",
            state.year,
            events.len()
        );
        return None;
    }

    let total_weight: u32 = weighted.iter().map(|(_, weight)| weight).sum();
    let mut remainder = rng.gen::<f64>() * f64::from(total_weight);

    for &(event, weight) in &weighted {
        remainder -= f64::from(weight);
        if remainder <= 0.0 {
            log::debug!(
                "Selected '{}' from {} candidates (total weight {})",
                event.id,
                weighted.len(),
                total_weight
            );
            return Some(event);
        }
    }

    // Only reachable through float rounding on the final subtraction
    weighted.last().map(|&(event, _)| event)
}
