//! Walks the SSVC decision sequence for normalized metrics.

pub mod table;

pub use table::{action_for, automatable_for, entries, TableEntry};

use serde::{Deserialize, Serialize};

use crate::models::{
    Automatable, AutomatableInput, Decision, DecisionResult, Exploitation, Impact, ImpactInput,
    MissionImpact, NormalizedMetrics, TechnicalImpact, ValidationErrors,
};

/// How CVSS confidentiality/integrity/availability impacts map to Technical Impact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactRule {
    /// Total when any of C, I, A is High.
    #[default]
    AnyHigh,
    /// Total only when C, I and A are all High.
    AllHigh,
}

impl ImpactRule {
    pub fn technical_impact(
        self,
        confidentiality: Impact,
        integrity: Impact,
        availability: Impact,
    ) -> TechnicalImpact {
        let impacts = [confidentiality, integrity, availability];
        let total = match self {
            Self::AnyHigh => impacts.contains(&Impact::High),
            Self::AllHigh => impacts.iter().all(|i| *i == Impact::High),
        };
        if total {
            TechnicalImpact::Total
        } else {
            TechnicalImpact::Partial
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnyHigh => "any_high",
            Self::AllHigh => "all_high",
        }
    }
}

impl std::fmt::Display for ImpactRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    impact_rule: ImpactRule,
}

impl Evaluator {
    pub fn new(impact_rule: ImpactRule) -> Self {
        Self { impact_rule }
    }

    pub fn impact_rule(&self) -> ImpactRule {
        self.impact_rule
    }

    /// Exploitation, then Automatable, then Technical Impact, then Mission &
    /// Well-being, then the action leaf.
    pub fn evaluate(&self, metrics: &NormalizedMetrics) -> Decision {
        let exploitation = metrics.exploitation;
        let automatable = match metrics.automatable {
            AutomatableInput::Supplied(value) => value,
            AutomatableInput::FromCvss { complexity, privileges, interaction } => {
                automatable_for(complexity, privileges, interaction)
            }
        };
        let technical_impact = match metrics.technical_impact {
            ImpactInput::Supplied(value) => value,
            ImpactInput::FromCvss { confidentiality, integrity, availability } => {
                self.impact_rule.technical_impact(confidentiality, integrity, availability)
            }
        };
        let mission_impact = metrics.mission_impact;

        Decision {
            exploitation,
            automatable,
            technical_impact,
            mission_impact,
            action: action_for(exploitation, automatable, technical_impact, mission_impact),
        }
    }

    /// Validation errors pass through untouched; nothing is evaluated for them.
    pub fn evaluate_row(
        &self,
        normalized: Result<NormalizedMetrics, ValidationErrors>,
    ) -> DecisionResult {
        match normalized {
            Ok(metrics) => DecisionResult::Decided(self.evaluate(&metrics)),
            Err(errors) => DecisionResult::RowInvalid(errors),
        }
    }
}

/// Convenience for callers that only have the precomputed decision points.
pub fn decide(
    exploitation: Exploitation,
    automatable: Automatable,
    technical_impact: TechnicalImpact,
    mission_impact: MissionImpact,
) -> Decision {
    Evaluator::default().evaluate(&NormalizedMetrics {
        exploitation,
        automatable: AutomatableInput::Supplied(automatable),
        technical_impact: ImpactInput::Supplied(technical_impact),
        mission_impact,
        cvss: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Action, AttackComplexity, Metric, PrivilegesRequired, UserInteraction, ValidationError,
        Vocabulary,
    };
    use proptest::prelude::*;

    fn from_cvss(
        exploitation: Exploitation,
        ac: AttackComplexity,
        pr: PrivilegesRequired,
        ui: UserInteraction,
        cia: [Impact; 3],
        mission_impact: MissionImpact,
    ) -> NormalizedMetrics {
        NormalizedMetrics {
            exploitation,
            automatable: AutomatableInput::FromCvss { complexity: ac, privileges: pr, interaction: ui },
            technical_impact: ImpactInput::FromCvss {
                confidentiality: cia[0],
                integrity: cia[1],
                availability: cia[2],
            },
            mission_impact,
            cvss: None,
        }
    }

    #[test]
    fn test_active_automatable_total_is_act() {
        let d = decide(Exploitation::Active, Automatable::Yes, TechnicalImpact::Total, MissionImpact::Low);
        assert_eq!(d.action, Action::Act);
    }

    #[test]
    fn test_none_manual_partial_is_track() {
        let d = decide(Exploitation::None, Automatable::No, TechnicalImpact::Partial, MissionImpact::High);
        assert_eq!(d.action, Action::Track);
    }

    #[test]
    fn test_no_impact_and_no_exploitation_is_partial_track() {
        let metrics = from_cvss(
            Exploitation::None,
            AttackComplexity::Low,
            PrivilegesRequired::None,
            UserInteraction::None,
            [Impact::None; 3],
            MissionImpact::High,
        );
        let d = Evaluator::default().evaluate(&metrics);
        assert_eq!(d.automatable, Automatable::Yes);
        assert_eq!(d.technical_impact, TechnicalImpact::Partial);
        assert_eq!(d.action, Action::Track);
    }

    #[test]
    fn test_impact_rules() {
        let one_high = [Impact::High, Impact::None, Impact::Low];
        assert_eq!(
            ImpactRule::AnyHigh.technical_impact(one_high[0], one_high[1], one_high[2]),
            TechnicalImpact::Total
        );
        assert_eq!(
            ImpactRule::AllHigh.technical_impact(one_high[0], one_high[1], one_high[2]),
            TechnicalImpact::Partial
        );
        assert_eq!(
            ImpactRule::AllHigh.technical_impact(Impact::High, Impact::High, Impact::High),
            TechnicalImpact::Total
        );
        assert_eq!(
            ImpactRule::AnyHigh.technical_impact(Impact::Low, Impact::Low, Impact::Low),
            TechnicalImpact::Partial
        );
    }

    #[test]
    fn test_impact_rule_changes_derived_path() {
        let metrics = from_cvss(
            Exploitation::Active,
            AttackComplexity::High,
            PrivilegesRequired::Low,
            UserInteraction::Required,
            [Impact::High, Impact::Low, Impact::None],
            MissionImpact::Medium,
        );
        let any = Evaluator::new(ImpactRule::AnyHigh).evaluate(&metrics);
        let all = Evaluator::new(ImpactRule::AllHigh).evaluate(&metrics);
        assert_eq!(any.automatable, Automatable::No);
        assert_eq!(any.action, Action::Act);
        assert_eq!(all.action, Action::Attend);
        assert_eq!(Evaluator::new(ImpactRule::AllHigh).impact_rule(), ImpactRule::AllHigh);
    }

    #[test]
    fn test_invalid_row_propagates_errors_untouched() {
        let errors = ValidationErrors::new(vec![ValidationError::InvalidValue(
            Metric::Exploitation,
            "maybe".into(),
        )]);
        let result = Evaluator::default().evaluate_row(Err(errors.clone()));
        assert_eq!(result, DecisionResult::RowInvalid(errors));
        assert_eq!(result.action(), None);
    }

    #[test]
    fn test_impact_rule_serde() {
        let rule: ImpactRule = serde_yaml::from_str("all_high").unwrap();
        assert_eq!(rule, ImpactRule::AllHigh);
        assert_eq!(ImpactRule::default().to_string(), "any_high");
    }

    fn any_vocab<V: Vocabulary + std::fmt::Debug>() -> impl Strategy<Value = V> {
        prop::sample::select(V::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_evaluate_is_total_and_deterministic(
            exploitation in any_vocab::<Exploitation>(),
            ac in any_vocab::<AttackComplexity>(),
            pr in any_vocab::<PrivilegesRequired>(),
            ui in any_vocab::<UserInteraction>(),
            c in any_vocab::<Impact>(),
            i in any_vocab::<Impact>(),
            a in any_vocab::<Impact>(),
            mission in any_vocab::<MissionImpact>(),
            all_high in any::<bool>(),
        ) {
            let rule = if all_high { ImpactRule::AllHigh } else { ImpactRule::AnyHigh };
            let evaluator = Evaluator::new(rule);
            let metrics = from_cvss(exploitation, ac, pr, ui, [c, i, a], mission);
            let first = evaluator.evaluate(&metrics);
            let second = evaluator.evaluate(&metrics);
            prop_assert_eq!(first, second);
            prop_assert!(Action::ALL.contains(&first.action));
            let trivial = ac == AttackComplexity::Low
                && pr == PrivilegesRequired::None
                && ui == UserInteraction::None;
            prop_assert_eq!(first.automatable == Automatable::Yes, trivial);
            let highs = [c, i, a].iter().filter(|&&x| x == Impact::High).count();
            let total = if all_high { highs == 3 } else { highs > 0 };
            prop_assert_eq!(first.technical_impact == TechnicalImpact::Total, total);
            prop_assert_eq!(first.exploitation, exploitation);
            prop_assert_eq!(first.mission_impact, mission);
        }
    }
}
