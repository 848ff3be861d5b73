use std::sync::Arc;

use indicatif::ProgressBar;
use tracing::{debug, info};

use crate::decision::Evaluator;
use crate::errors::TriageError;
use crate::models::{DecisionResult, NormalizedMetrics, RawRow};
use crate::normalize::Normalizer;

/// Everything derived for one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowOutcome {
    /// Present only when normalization succeeded.
    pub metrics: Option<NormalizedMetrics>,
    pub result: DecisionResult,
}

pub fn process_row(normalizer: &Normalizer, evaluator: &Evaluator, row: &RawRow) -> RowOutcome {
    let normalized = normalizer.normalize(row);
    let metrics = normalized.as_ref().ok().copied();
    RowOutcome {
        metrics,
        result: evaluator.evaluate_row(normalized),
    }
}

/// Runs normalization and evaluation over a whole table.
///
/// Rows share nothing, so with more than one worker the table is cut into
/// contiguous chunks evaluated on blocking tasks and stitched back in input order.
pub struct BatchRunner {
    normalizer: Arc<Normalizer>,
    evaluator: Evaluator,
    workers: usize,
    progress: Option<ProgressBar>,
}

impl BatchRunner {
    pub fn new(normalizer: Normalizer, evaluator: Evaluator, workers: usize) -> Self {
        Self {
            normalizer: Arc::new(normalizer),
            evaluator,
            workers: workers.max(1),
            progress: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn run_sequential(&self, rows: &[RawRow]) -> Vec<RowOutcome> {
        let outcomes = evaluate_chunk(&self.normalizer, &self.evaluator, rows, self.progress.as_ref());
        log_outcomes(&outcomes);
        outcomes
    }

    pub async fn run(&self, rows: Arc<Vec<RawRow>>) -> Result<Vec<RowOutcome>, TriageError> {
        if self.workers == 1 || rows.len() < 2 {
            return Ok(self.run_sequential(&rows));
        }

        let chunk_size = rows.len().div_ceil(self.workers);
        debug!(
            workers = self.workers,
            chunk_size,
            rows = rows.len(),
            impact_rule = %self.evaluator.impact_rule(),
            "Dispatching row chunks"
        );

        let handles: Vec<_> = (0..rows.len())
            .step_by(chunk_size)
            .map(|start| {
                let end = (start + chunk_size).min(rows.len());
                let rows = Arc::clone(&rows);
                let normalizer = Arc::clone(&self.normalizer);
                let evaluator = self.evaluator;
                let progress = self.progress.clone();
                tokio::task::spawn_blocking(move || {
                    evaluate_chunk(&normalizer, &evaluator, &rows[start..end], progress.as_ref())
                })
            })
            .collect();

        let results = futures::future::join_all(handles).await;

        let mut outcomes = Vec::with_capacity(rows.len());
        for result in results {
            let chunk = result
                .map_err(|e| TriageError::Internal(format!("Row worker failed: {}", e)))?;
            outcomes.extend(chunk);
        }
        log_outcomes(&outcomes);
        Ok(outcomes)
    }
}

fn evaluate_chunk(
    normalizer: &Normalizer,
    evaluator: &Evaluator,
    rows: &[RawRow],
    progress: Option<&ProgressBar>,
) -> Vec<RowOutcome> {
    rows.iter()
        .map(|row| {
            let outcome = process_row(normalizer, evaluator, row);
            if let Some(bar) = progress {
                bar.inc(1);
            }
            outcome
        })
        .collect()
}

fn log_outcomes(outcomes: &[RowOutcome]) {
    let mut invalid = 0;
    for (index, outcome) in outcomes.iter().enumerate() {
        if let DecisionResult::RowInvalid(errors) = &outcome.result {
            invalid += 1;
            debug!(row = index + 1, errors = %errors, "Row failed validation");
        }
    }
    info!(rows = outcomes.len(), invalid, "Rows evaluated");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Action, Exploitation};

    fn rows(n: usize) -> Vec<RawRow> {
        (0..n)
            .map(|i| {
                let exploitation = match i % 4 {
                    0 => "active",
                    1 => "poc",
                    2 => "none",
                    _ => "maybe",
                };
                [
                    ("Exploitation", exploitation),
                    ("Mission & Well-being", "high"),
                    ("CVSS Vector", "CVSS:3.1/AV:N/AC:L/PR:N/UI:N/S:U/C:H/I:H/A:H"),
                ]
                .into_iter()
                .collect()
            })
            .collect()
    }

    #[test]
    fn test_process_row_keeps_metrics_for_valid_rows() {
        let outcome = process_row(&Normalizer::default(), &Evaluator::default(), &rows(1)[0]);
        assert_eq!(outcome.metrics.map(|m| m.exploitation), Some(Exploitation::Active));
        assert_eq!(outcome.result.action(), Some(Action::Act));
    }

    #[test]
    fn test_process_row_flags_invalid_rows() {
        let outcome = process_row(&Normalizer::default(), &Evaluator::default(), &rows(4)[3]);
        assert!(outcome.metrics.is_none());
        assert!(outcome.result.is_invalid());
    }

    #[test]
    fn test_sequential_preserves_order() {
        let runner = BatchRunner::new(Normalizer::default(), Evaluator::default(), 1);
        let outcomes = runner.run_sequential(&rows(8));
        let actions: Vec<Option<Action>> = outcomes.iter().map(|o| o.result.action()).collect();
        assert_eq!(actions[0], Some(Action::Act));
        assert_eq!(actions[1], Some(Action::Attend));
        assert_eq!(actions[2], Some(Action::Attend));
        assert_eq!(actions[3], None);
        assert_eq!(actions[4], Some(Action::Act));
    }

    #[tokio::test]
    async fn test_parallel_matches_sequential() {
        let input = rows(37);
        let sequential = BatchRunner::new(Normalizer::default(), Evaluator::default(), 1)
            .run_sequential(&input);
        let parallel = BatchRunner::new(Normalizer::default(), Evaluator::default(), 4)
            .run(Arc::new(input))
            .await
            .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[tokio::test]
    async fn test_more_workers_than_rows() {
        let outcomes = BatchRunner::new(Normalizer::default(), Evaluator::default(), 16)
            .run(Arc::new(rows(3)))
            .await
            .unwrap();
        assert_eq!(outcomes.len(), 3);
    }

    #[tokio::test]
    async fn test_progress_counts_every_row() {
        let bar = ProgressBar::hidden();
        let runner = BatchRunner::new(Normalizer::default(), Evaluator::default(), 3)
            .with_progress(bar.clone());
        runner.run(Arc::new(rows(10))).await.unwrap();
        assert_eq!(bar.position(), 10);
    }
}
