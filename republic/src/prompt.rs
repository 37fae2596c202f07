//! Interactive play: a [`Strategy`] backed by a human at a terminal.

use republic_core::{legacy_score, GameEvent, GameState, Strategy};
use std::io::{BufRead, Write};

/// Shows the dashboard and the event, then reads a 1-based option number.
///
/// Invalid input is re-prompted. End of input or a read error takes the
/// first option so piped sessions always terminate.
pub struct PromptStrategy<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptStrategy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn render(&mut self, state: &GameState, event: &GameEvent) -> std::io::Result<()> {
        let c = &state.country;
        let out = &mut self.output;

        writeln!(out)?;
        writeln!(
            out,
            "=== {} | Fiscal Year {} | Turn {} ===",
            state.country_name, state.year, state.turn
        )?;
        writeln!(
            out,
            "GDP ${:.0}M ({:+.2}%)  Population {:.2}M  Debt ${:.0}M",
            c.gdp, c.gdp_growth_rate, c.population, c.external_debt
        )?;
        writeln!(
            out,
            "Stability {:.0}  Elites {:.0}  Military {:.0}  Education {:.0}",
            c.stability, c.elite_satisfaction, c.military_power, c.education_level
        )?;
        writeln!(
            out,
            "Gender equality {:.0}  Famine risk {:.0}  Legacy {}",
            c.gender_equality,
            c.famine_risk,
            legacy_score(c)
        )?;
        writeln!(out)?;
        writeln!(out, "## {}", event.title)?;
        if !event.description.is_empty() {
            writeln!(out, "{}", event.description)?;
        }
        if let Some(theory) = &event.theory {
            writeln!(out, "Theory: {}", theory)?;
        }
        for (i, option) in event.options.iter().enumerate() {
            writeln!(out, "  [{}] {}", i + 1, option.text)?;
        }
        Ok(())
    }

    fn read_choice(&mut self, count: usize) -> std::io::Result<Option<usize>> {
        loop {
            write!(self.output, "Choose 1-{}: ", count)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match line.trim().parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(self.output, "Please enter a number from 1 to {}.", count)?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Strategy for PromptStrategy<R, W> {
    fn choose(&mut self, state: &GameState, event: &GameEvent) -> usize {
        let result = self
            .render(state, event)
            .and_then(|_| self.read_choice(event.options.len()));
        match result {
            Ok(Some(choice)) => {
                if let Some(explanation) = &event.options[choice].explanation {
                    let _ = writeln!(self.output, "{}", explanation);
                }
                choice
            }
            Ok(None) => {
                log::warn!("Input closed; taking the first option for '{}'", event.id);
                0
            }
            Err(e) => {
                log::warn!("Prompt failed ({}); taking the first option", e);
                0
            }
        }
    }

    fn name(&self) -> &str {
        "player"
    }
}
