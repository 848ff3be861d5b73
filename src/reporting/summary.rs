use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Action, Vocabulary};
use crate::pipeline::RowOutcome;

/// Counts over a processed batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub rows: usize,
    pub decided: usize,
    pub invalid: usize,
    /// Keyed by action code.
    pub actions: BTreeMap<String, usize>,
}

impl Summary {
    pub fn from_outcomes(outcomes: &[RowOutcome]) -> Self {
        let mut summary = Summary {
            rows: outcomes.len(),
            actions: Action::ALL.iter().map(|a| (a.code().to_string(), 0)).collect(),
            ..Default::default()
        };
        for outcome in outcomes {
            match outcome.result.action() {
                Some(action) => {
                    summary.decided += 1;
                    *summary.actions.entry(action.code().to_string()).or_insert(0) += 1;
                }
                None => summary.invalid += 1,
            }
        }
        summary
    }

    pub fn count(&self, action: Action) -> usize {
        self.actions.get(action.code()).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decision::decide;
    use crate::models::{
        Automatable, DecisionResult, Exploitation, Metric, MissionImpact, TechnicalImpact,
        ValidationError, ValidationErrors,
    };

    #[test]
    fn test_summary_counts() {
        let act = decide(Exploitation::Active, Automatable::Yes, TechnicalImpact::Total, MissionImpact::Low);
        let track = decide(Exploitation::None, Automatable::No, TechnicalImpact::Partial, MissionImpact::Low);
        let outcomes = vec![
            RowOutcome { metrics: None, result: DecisionResult::Decided(act) },
            RowOutcome { metrics: None, result: DecisionResult::Decided(act) },
            RowOutcome { metrics: None, result: DecisionResult::Decided(track) },
            RowOutcome {
                metrics: None,
                result: DecisionResult::RowInvalid(ValidationErrors::new(vec![
                    ValidationError::MissingField(Metric::Exploitation),
                ])),
            },
        ];
        let summary = Summary::from_outcomes(&outcomes);
        assert_eq!(summary.rows, 4);
        assert_eq!(summary.decided, 3);
        assert_eq!(summary.invalid, 1);
        assert_eq!(summary.count(Action::Act), 2);
        assert_eq!(summary.count(Action::Track), 1);
        assert_eq!(summary.count(Action::Attend), 0);
        assert_eq!(summary.actions.len(), 4);
    }
}
