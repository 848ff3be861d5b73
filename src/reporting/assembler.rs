use crate::errors::TriageError;
use crate::io::Table;
use crate::models::{DecisionResult, Vocabulary};
use crate::pipeline::RowOutcome;
use super::columns::derived_headers;
use super::summary::Summary;

const CVSS_COLUMNS: usize = 8;

/// The augmented table: source columns followed by the derived ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub summary: Summary,
}

/// Merge each source row with its outcome. One output row per input row, in input order.
pub fn assemble_report(table: &Table, outcomes: &[RowOutcome]) -> Result<Report, TriageError> {
    if table.rows.len() != outcomes.len() {
        return Err(TriageError::Internal(format!(
            "{} rows read but {} evaluated",
            table.rows.len(),
            outcomes.len()
        )));
    }

    let mut headers = table.headers.clone();
    headers.extend(derived_headers());

    let rows = table
        .rows
        .iter()
        .zip(outcomes)
        .map(|(row, outcome)| {
            let mut cells: Vec<String> = (0..table.headers.len())
                .map(|i| row.fields().get(i).map(|(_, v)| v.clone()).unwrap_or_default())
                .collect();
            cells.extend(derived_cells(outcome));
            cells
        })
        .collect();

    Ok(Report {
        headers,
        rows,
        summary: Summary::from_outcomes(outcomes),
    })
}

fn derived_cells(outcome: &RowOutcome) -> Vec<String> {
    let mut cells = Vec::with_capacity(CVSS_COLUMNS + 8);

    match outcome.metrics.and_then(|m| m.cvss) {
        Some(vector) => cells.extend(vector.labels().iter().map(|l| l.to_string())),
        None => cells.extend(std::iter::repeat(String::new()).take(CVSS_COLUMNS)),
    }

    match &outcome.metrics {
        Some(metrics) => {
            cells.push(metrics.exploitation.label().to_string());
            cells.push(metrics.mission_impact.label().to_string());
        }
        None => cells.extend([String::new(), String::new()]),
    }

    match &outcome.result {
        DecisionResult::Decided(decision) => {
            cells.push(decision.exploitation.label().to_string());
            cells.push(decision.automatable.label().to_string());
            cells.push(decision.technical_impact.label().to_string());
            cells.push(decision.mission_impact.label().to_string());
            cells.push(decision.action.label().to_string());
            cells.push(String::new());
        }
        DecisionResult::RowInvalid(errors) => {
            cells.extend(std::iter::repeat(String::new()).take(5));
            cells.push(errors.to_string());
        }
    }

    cells
}
