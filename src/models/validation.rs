use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::vocabulary::{vocabulary, Vocabulary};

vocabulary! {
    /// Every categorical input the decision procedure reads. The codes of the
    /// CVSS base metrics are their vector keys.
    Metric {
        Exploitation => ("exploitation", "Exploitation"),
        Automatable => ("automatable", "Automatable"),
        TechnicalImpact => ("technical_impact", "Technical Impact"),
        MissionImpact => ("mission_impact", "Mission & Well-being"),
        AttackVector => ("AV", "Attack Vector"),
        AttackComplexity => ("AC", "Attack Complexity"),
        PrivilegesRequired => ("PR", "Privileges Required"),
        UserInteraction => ("UI", "User Interaction"),
        Scope => ("S", "Scope"),
        Confidentiality => ("C", "Confidentiality"),
        Integrity => ("I", "Integrity"),
        Availability => ("A", "Availability"),
    }
}

impl Metric {
    pub const CVSS_BASE: [Metric; 8] = [
        Metric::AttackVector,
        Metric::AttackComplexity,
        Metric::PrivilegesRequired,
        Metric::UserInteraction,
        Metric::Scope,
        Metric::Confidentiality,
        Metric::Integrity,
        Metric::Availability,
    ];

    /// Look up a base metric by its vector key, case-insensitively.
    pub fn from_cvss_key(key: &str) -> Option<Metric> {
        Self::CVSS_BASE
            .iter()
            .copied()
            .find(|m| m.code().eq_ignore_ascii_case(key.trim()))
    }
}

/// A defect in one field of one row. Recoverable: the row is flagged, the batch goes on.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum ValidationError {
    #[error("MissingField({0})")]
    MissingField(Metric),

    #[error("InvalidValue({0}, {1:?})")]
    InvalidValue(Metric, String),
}

impl ValidationError {
    pub fn metric(&self) -> Metric {
        match self {
            Self::MissingField(m) | Self::InvalidValue(m, _) => *m,
        }
    }
}

/// All validation errors of a row, ordered by metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new(mut errors: Vec<ValidationError>) -> Self {
        errors.sort_by_key(ValidationError::metric);
        Self(errors)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_metric_and_raw_value() {
        let err = ValidationError::InvalidValue(Metric::Exploitation, "maybe".into());
        assert_eq!(err.to_string(), "InvalidValue(Exploitation, \"maybe\")");
        let err = ValidationError::MissingField(Metric::TechnicalImpact);
        assert_eq!(err.to_string(), "MissingField(Technical Impact)");
    }

    #[test]
    fn test_errors_sorted_by_metric() {
        let errors = ValidationErrors::new(vec![
            ValidationError::MissingField(Metric::Availability),
            ValidationError::InvalidValue(Metric::Exploitation, "x".into()),
        ]);
        assert_eq!(errors.errors()[0].metric(), Metric::Exploitation);
        assert_eq!(
            errors.to_string(),
            "InvalidValue(Exploitation, \"x\"); MissingField(Availability)"
        );
    }

    #[test]
    fn test_cvss_keys() {
        assert_eq!(Metric::from_cvss_key("pr"), Some(Metric::PrivilegesRequired));
        assert_eq!(Metric::from_cvss_key("exploitation"), None);
        assert_eq!(Metric::from_cvss_key("E"), None);
    }
}
