use serde::{Deserialize, Serialize};

use super::vocabulary::{vocabulary, Vocabulary};

vocabulary! {
    /// Observed state of exploitation for the vulnerability.
    Exploitation {
        None => ("none", "None"),
        /// Public proof of concept exists.
        Poc => ("poc", "PoC"),
        Active => ("active", "Active"),
    }
}

vocabulary! {
    /// Whether the first steps of the kill chain can be reliably automated.
    Automatable {
        No => ("no", "No"),
        Yes => ("yes", "Yes"),
    }
}

vocabulary! {
    TechnicalImpact {
        Partial => ("partial", "Partial"),
        Total => ("total", "Total"),
    }
}

vocabulary! {
    /// Mission and well-being impact of the affected system for the deployer.
    MissionImpact {
        Low => ("low", "Low"),
        Medium => ("medium", "Medium"),
        High => ("high", "High"),
    }
}

vocabulary! {
    /// Final SSVC decision, declared in increasing order of urgency.
    Action {
        Track => ("track", "Track"),
        /// Track closely, especially if the mitigation does not arrive quickly.
        TrackStar => ("track*", "Track*"),
        Attend => ("attend", "Attend"),
        Act => ("act", "Act"),
    }
}

impl Action {
    /// Actions from most to least urgent.
    pub fn by_urgency() -> impl Iterator<Item = Action> {
        Self::ALL.iter().rev().copied()
    }
}

vocabulary! {
    AttackVector {
        Network => ("N", "Network"),
        Adjacent => ("A", "Adjacent"),
        Local => ("L", "Local"),
        Physical => ("P", "Physical"),
    }
}

vocabulary! {
    AttackComplexity {
        Low => ("L", "Low"),
        High => ("H", "High"),
    }
}

vocabulary! {
    PrivilegesRequired {
        None => ("N", "None"),
        Low => ("L", "Low"),
        High => ("H", "High"),
    }
}

vocabulary! {
    UserInteraction {
        None => ("N", "None"),
        Required => ("R", "Required"),
    }
}

vocabulary! {
    Scope {
        Unchanged => ("U", "Unchanged"),
        Changed => ("C", "Changed"),
    }
}

vocabulary! {
    /// Confidentiality, integrity or availability impact.
    Impact {
        None => ("N", "None"),
        Low => ("L", "Low"),
        High => ("H", "High"),
    }
}

/// The eight CVSS v3 base metrics of one vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CvssVector {
    pub attack_vector: AttackVector,
    pub attack_complexity: AttackComplexity,
    pub privileges_required: PrivilegesRequired,
    pub user_interaction: UserInteraction,
    pub scope: Scope,
    pub confidentiality: Impact,
    pub integrity: Impact,
    pub availability: Impact,
}

impl CvssVector {
    /// Label of each base metric in vector order (AV, AC, PR, UI, S, C, I, A).
    pub fn labels(&self) -> [&'static str; 8] {
        [
            self.attack_vector.label(),
            self.attack_complexity.label(),
            self.privileges_required.label(),
            self.user_interaction.label(),
            self.scope.label(),
            self.confidentiality.label(),
            self.integrity.label(),
            self.availability.label(),
        ]
    }

    pub fn automation_inputs(&self) -> AutomatableInput {
        AutomatableInput::FromCvss {
            complexity: self.attack_complexity,
            privileges: self.privileges_required,
            interaction: self.user_interaction,
        }
    }

    pub fn impact_inputs(&self) -> ImpactInput {
        ImpactInput::FromCvss {
            confidentiality: self.confidentiality,
            integrity: self.integrity,
            availability: self.availability,
        }
    }
}

/// Where the Automatable decision point comes from for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AutomatableInput {
    /// Pre-computed value read from the table.
    Supplied(Automatable),
    FromCvss {
        complexity: AttackComplexity,
        privileges: PrivilegesRequired,
        interaction: UserInteraction,
    },
}

/// Where the Technical Impact decision point comes from for a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactInput {
    Supplied(TechnicalImpact),
    FromCvss {
        confidentiality: Impact,
        integrity: Impact,
        availability: Impact,
    },
}

/// Validated decision inputs for one row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedMetrics {
    pub exploitation: Exploitation,
    pub automatable: AutomatableInput,
    pub technical_impact: ImpactInput,
    pub mission_impact: MissionImpact,
    /// Parsed base vector, when the row carried one.
    pub cvss: Option<CvssVector>,
}
