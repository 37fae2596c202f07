//! Constitution setup: the point-budget check the engine leaves to its caller.

use crate::config::SimConfig;
use crate::content::Artifact;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SetupError {
    #[error("no artifacts selected")]
    EmptySelection,
    #[error("artifact '{0}' selected more than once")]
    DuplicateArtifact(String),
    #[error("over budget: {spent} points spent, {budget} available")]
    OverBudget { spent: i32, budget: i32 },
}

/// A validated artifact selection, ready for
/// [`create_initial_state`](crate::step::create_initial_state).
#[derive(Debug, Clone)]
pub struct Constitution {
    artifacts: Vec<Artifact>,
    points_spent: i32,
}

impl Constitution {
    /// Validate a selection against the configured budget.
    ///
    /// Negative point costs refund points, so a selection may exceed the
    /// budget in gross terms as long as the net cost fits.
    pub fn ratify(selection: Vec<Artifact>, config: &SimConfig) -> Result<Self, SetupError> {
        if selection.is_empty() {
            return Err(SetupError::EmptySelection);
        }

        for (i, artifact) in selection.iter().enumerate() {
            if selection[..i].iter().any(|other| other.id == artifact.id) {
                return Err(SetupError::DuplicateArtifact(artifact.id.clone()));
            }
        }

        let points_spent = points_spent(&selection);
        if points_spent > config.points_budget {
            return Err(SetupError::OverBudget {
                spent: points_spent,
                budget: config.points_budget,
            });
        }

        log::debug!(
            "Ratified constitution with {} artifacts ({} / {} points)",
            selection.len(),
            points_spent,
            config.points_budget
        );

        Ok(Self {
            artifacts: selection,
            points_spent,
        })
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn points_spent(&self) -> i32 {
        self.points_spent
    }
}

/// Net point cost of a selection.
pub fn points_spent(selection: &[Artifact]) -> i32 {
    selection.iter().map(|artifact| artifact.point_cost).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Effects;
    use crate::testing::artifact;

    fn costing(id: &str, cost: i32) -> Artifact {
        Artifact {
            point_cost: cost,
            ..artifact(id, Effects::new(), &[])
        }
    }

    #[test]
    fn test_ratify_within_budget() {
        let config = SimConfig::default();
        let c = Constitution::ratify(vec![costing("a", 3), costing("b", 2)], &config).unwrap();
        assert_eq!(c.points_spent(), 5);
        assert_eq!(c.artifacts().len(), 2);
    }

    #[test]
    fn test_negative_costs_refund() {
        let config = SimConfig::default();
        let selection = vec![costing("a", 3), costing("b", 3), costing("c", -2)];
        assert!(Constitution::ratify(selection, &config).is_ok());
    }

    #[test]
    fn test_ratify_rejects_bad_selections() {
        let config = SimConfig::default();
        assert_eq!(
            Constitution::ratify(vec![], &config).unwrap_err(),
            SetupError::EmptySelection
        );
        assert_eq!(
            Constitution::ratify(vec![costing("a", 1), costing("a", 1)], &config).unwrap_err(),
            SetupError::DuplicateArtifact("a".to_string())
        );
        assert_eq!(
            Constitution::ratify(vec![costing("a", 3), costing("b", 3)], &config).unwrap_err(),
            SetupError::OverBudget { spent: 6, budget: 5 }
        );
    }
}
