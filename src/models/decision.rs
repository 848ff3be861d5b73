use serde::Serialize;

use super::metrics::{Action, Automatable, Exploitation, MissionImpact, TechnicalImpact};
use super::validation::ValidationErrors;

/// The decision path taken through the tree, with its leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Decision {
    pub exploitation: Exploitation,
    pub automatable: Automatable,
    pub technical_impact: TechnicalImpact,
    pub mission_impact: MissionImpact,
    pub action: Action,
}

/// Outcome of evaluating one row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionResult {
    Decided(Decision),
    /// Normalization failed; carries every defect of the row.
    RowInvalid(ValidationErrors),
}

impl DecisionResult {
    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Decided(d) => Some(d.action),
            Self::RowInvalid(_) => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Self::RowInvalid(_))
    }
}
