//! Console observer: one log line per fiscal year.

use super::{ObserverError, RunObserver, TurnRecord};

/// Logs a compact summary of each year at `info` level.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl ConsoleObserver {
    pub fn new() -> Self {
        Self
    }

    fn format_record(record: &TurnRecord) -> String {
        let c = &record.country;
        let decision = match (&record.event_id, record.option) {
            (Some(event), Some(option)) => format!("{} -> option {}", event, option + 1),
            (Some(event), None) => event.clone(),
            _ => "no event".to_string(),
        };
        format!(
            "{} | GDP {:.0} ({:+.2}%) | Pop {:.2}M | Stab {:.0} | Elite {:.0} | Mil {:.0} | Edu {:.0} | Famine {:.0} | Debt {:.0} | {}",
            record.year,
            c.gdp,
            c.gdp_growth_rate,
            c.population,
            c.stability,
            c.elite_satisfaction,
            c.military_power,
            c.education_level,
            c.famine_risk,
            c.external_debt,
            decision
        )
    }
}

impl RunObserver for ConsoleObserver {
    fn on_turn(&self, record: &TurnRecord) -> Result<(), ObserverError> {
        log::info!("{}", Self::format_record(record));
        if let Some(reason) = record.game_over_reason {
            log::info!("{} | {}", record.year, reason);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
