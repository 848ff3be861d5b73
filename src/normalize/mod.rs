//! Turns raw table rows into validated decision inputs.

pub mod aliases;
pub mod cvss;

pub use aliases::{ColumnAliases, ValueAliases};
pub use cvss::parse_vector;

use crate::models::{
    Automatable, AutomatableInput, Exploitation, ImpactInput, Metric, MissionImpact,
    NormalizedMetrics, RawRow, TechnicalImpact, ValidationError, ValidationErrors, Vocabulary,
};

#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    columns: ColumnAliases,
    exploitation: ValueAliases<Exploitation>,
    mission_impact: ValueAliases<MissionImpact>,
}

impl Normalizer {
    pub fn new(
        columns: ColumnAliases,
        exploitation: ValueAliases<Exploitation>,
        mission_impact: ValueAliases<MissionImpact>,
    ) -> Self {
        Self { columns, exploitation, mission_impact }
    }

    pub fn columns(&self) -> &ColumnAliases {
        &self.columns
    }

    /// Validate every decision input of a row, collecting all defects.
    ///
    /// Automatable and Technical Impact are read from their own columns when
    /// present and otherwise carried as the CVSS components they derive from.
    /// A present CVSS vector is always validated in full.
    pub fn normalize(&self, row: &RawRow) -> Result<NormalizedMetrics, ValidationErrors> {
        let mut errors = Vec::new();

        let exploitation = required(
            lookup(row, &self.columns.exploitation, Metric::Exploitation, |raw| {
                self.exploitation.resolve(raw)
            }),
            Metric::Exploitation,
            &mut errors,
        );
        let mission_impact = required(
            lookup(row, &self.columns.mission_impact, Metric::MissionImpact, |raw| {
                self.mission_impact.resolve(raw)
            }),
            Metric::MissionImpact,
            &mut errors,
        );

        let vector_raw = row.get_any(&self.columns.cvss_vector);
        let cvss = match vector_raw.map(parse_vector) {
            Some(Ok(vector)) => Some(vector),
            Some(Err(mut vector_errors)) => {
                errors.append(&mut vector_errors);
                None
            }
            None => None,
        };

        let automatable = match lookup(
            row,
            &self.columns.automatable,
            Metric::Automatable,
            Automatable::parse,
        ) {
            Some(supplied) => keep(supplied.map(AutomatableInput::Supplied), &mut errors),
            None => derived(
                cvss.map(|v| v.automation_inputs()),
                vector_raw.is_some(),
                Metric::Automatable,
                &mut errors,
            ),
        };

        let technical_impact = match lookup(
            row,
            &self.columns.technical_impact,
            Metric::TechnicalImpact,
            TechnicalImpact::parse,
        ) {
            Some(supplied) => keep(supplied.map(ImpactInput::Supplied), &mut errors),
            None => derived(
                cvss.map(|v| v.impact_inputs()),
                vector_raw.is_some(),
                Metric::TechnicalImpact,
                &mut errors,
            ),
        };

        match (exploitation, automatable, technical_impact, mission_impact) {
            (Some(exploitation), Some(automatable), Some(technical_impact), Some(mission_impact))
                if errors.is_empty() =>
            {
                Ok(NormalizedMetrics {
                    exploitation,
                    automatable,
                    technical_impact,
                    mission_impact,
                    cvss,
                })
            }
            _ => Err(ValidationErrors::new(errors)),
        }
    }
}

/// `None` when no alias column holds a value.
fn lookup<V>(
    row: &RawRow,
    aliases: &[String],
    metric: Metric,
    resolve: impl Fn(&str) -> Option<V>,
) -> Option<Result<V, ValidationError>> {
    let raw = row.get_any(aliases)?;
    Some(resolve(raw).ok_or_else(|| ValidationError::InvalidValue(metric, raw.to_string())))
}

fn required<V>(
    found: Option<Result<V, ValidationError>>,
    metric: Metric,
    errors: &mut Vec<ValidationError>,
) -> Option<V> {
    keep(
        found.unwrap_or(Err(ValidationError::MissingField(metric))),
        errors,
    )
}

fn keep<V>(result: Result<V, ValidationError>, errors: &mut Vec<ValidationError>) -> Option<V> {
    result.map_err(|e| errors.push(e)).ok()
}

// A present but broken vector has already reported its own components.
fn derived<V>(
    from_vector: Option<V>,
    vector_present: bool,
    metric: Metric,
    errors: &mut Vec<ValidationError>,
) -> Option<V> {
    if from_vector.is_none() && !vector_present {
        errors.push(ValidationError::MissingField(metric));
    }
    from_vector
}
