use std::path::Path;

use tracing::debug;

use crate::cli::commands::DecideArgs;
use crate::config::{self, TriageConfig};
use crate::errors::TriageError;
use crate::models::{Decision, RawRow};
use crate::normalize::Normalizer;
use crate::reporting::format_decision;

pub async fn handle_decide(args: DecideArgs) -> Result<(), TriageError> {
    let file_config = match &args.config {
        Some(path) => config::parse_config(Path::new(path)).await?,
        None => TriageConfig::default(),
    };
    let decision = decide_from_args(&args, &file_config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&decision)?);
    } else {
        print!("{}", format_decision(&decision));
    }
    Ok(())
}

/// Runs the flags through the same normalizer rows go through.
pub fn decide_from_args(args: &DecideArgs, file_config: &TriageConfig) -> Result<Decision, TriageError> {
    let normalizer = file_config.normalizer();
    let row = row_from_args(args, &normalizer);
    debug!(fields = row.fields().len(), "Built row from flags");

    let metrics = normalizer
        .normalize(&row)
        .map_err(|errors| TriageError::Input(errors.to_string()))?;
    Ok(file_config.evaluator().evaluate(&metrics))
}

fn row_from_args(args: &DecideArgs, normalizer: &Normalizer) -> RawRow {
    let columns = normalizer.columns();
    let header = |aliases: &[String]| aliases.first().cloned().unwrap_or_default();

    let mut fields = vec![
        (header(&columns.exploitation), args.exploitation.clone()),
        (header(&columns.mission_impact), args.mission.clone()),
    ];
    if let Some(a) = &args.automatable {
        fields.push((header(&columns.automatable), a.clone()));
    }
    if let Some(t) = &args.technical_impact {
        fields.push((header(&columns.technical_impact), t.clone()));
    }
    if let Some(v) = &args.vector {
        fields.push((header(&columns.cvss_vector), v.clone()));
    }
    RawRow::new(fields)
}
