use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::cli::commands::EvaluateArgs;
use crate::config::{self, OutputFormat, TriageConfig};
use crate::errors::TriageError;
use crate::io::{read_table, render_csv, render_json, write_report};
use crate::pipeline::BatchRunner;
use crate::reporting::{assemble_report, format_summary};
use crate::utils::formatting::{format_count, format_duration};

/// Settings for one evaluate run, CLI flags layered over the config file.
#[derive(Debug, Clone)]
pub struct EvaluateSettings {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: OutputFormat,
    pub input_delimiter: char,
    pub output_delimiter: char,
    pub bom: bool,
    pub workers: usize,
}

pub async fn handle_evaluate(args: EvaluateArgs, quiet: bool) -> Result<(), TriageError> {
    let started = Instant::now();
    info!(input = %args.input, "Evaluating vulnerabilities");

    let file_config = match &args.config {
        Some(path) => config::parse_config(Path::new(path)).await?,
        None => TriageConfig::default(),
    };
    let settings = build_settings(&args, &file_config)?;

    let table = read_table(&settings.input, settings.input_delimiter).await?;
    if table.is_empty() {
        warn!(input = %settings.input.display(), "No data to process");
        if !quiet {
            println!("No data to process in {}", settings.input.display());
        }
        return Ok(());
    }

    let rows = Arc::new(table.rows.clone());
    let mut runner = BatchRunner::new(
        file_config.normalizer(),
        file_config.evaluator(),
        settings.workers,
    );
    let progress = progress_bar(rows.len() as u64, quiet);
    if let Some(bar) = &progress {
        runner = runner.with_progress(bar.clone());
    }
    let outcomes = runner.run(rows).await?;
    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }

    let report = assemble_report(&table, &outcomes)?;
    let bytes = match settings.format {
        OutputFormat::Csv => render_csv(&report, settings.output_delimiter, settings.bom)?,
        OutputFormat::Json => render_json(&report, &settings.input)?,
    };
    write_report(&settings.output, &bytes).await?;

    info!(
        rows = report.summary.rows,
        invalid = report.summary.invalid,
        duration_ms = started.elapsed().as_millis() as u64,
        "Evaluation completed"
    );

    if !quiet {
        println!("{}", format_summary(&report.summary));
        println!(
            "{} {} rows evaluated, report saved to {} ({})",
            style("✔").green(),
            format_count(report.summary.rows),
            style(settings.output.display()).bold(),
            format_duration(started.elapsed().as_millis() as u64),
        );
        if report.summary.invalid > 0 {
            println!(
                "{} {} row(s) could not be evaluated, see the SSVC Errors column",
                style("!").yellow(),
                report.summary.invalid
            );
        }
    }

    Ok(())
}

pub fn build_settings(args: &EvaluateArgs, file_config: &TriageConfig) -> Result<EvaluateSettings, TriageError> {
    let input = PathBuf::from(&args.input);
    let is_csv = input
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(TriageError::Input(format!(
            "Expected a .csv input file, got {}",
            input.display()
        )));
    }

    let format = match &args.format {
        Some(f) => f.parse::<OutputFormat>().map_err(TriageError::Config)?,
        None => file_config.output_format(),
    };

    let workers = args.workers.unwrap_or_else(|| file_config.workers());
    if workers == 0 {
        return Err(TriageError::Config("Worker count must be at least 1".into()));
    }

    let output = match &args.output {
        Some(path) => PathBuf::from(path),
        None => default_output_path(&input, file_config.output_suffix(), format),
    };
    if output == input {
        return Err(TriageError::Config("Output path must differ from the input path".into()));
    }

    Ok(EvaluateSettings {
        input,
        output,
        format,
        input_delimiter: args.delimiter.unwrap_or_else(|| file_config.input_delimiter()),
        output_delimiter: file_config.output_delimiter(),
        bom: file_config.output_bom(),
        workers,
    })
}

/// `vulns.csv` becomes `vulns<suffix>.csv` (or `.json`) next to the input.
pub fn default_output_path(input: &Path, suffix: &str, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.{}", stem, suffix, format.extension()))
}

fn progress_bar(len: u64, quiet: bool) -> Option<ProgressBar> {
    if quiet {
        return None;
    }
    let bar = ProgressBar::new(len);
    let template = ProgressStyle::default_bar()
        .template("  {bar:30.cyan/dark_gray} {pos}/{len} rows | {elapsed}")
        .map(|s| s.progress_chars("█▓░"));
    match template {
        Ok(style) => bar.set_style(style),
        Err(e) => warn!(error = %e, "Invalid progress template, using default style"),
    }
    Some(bar)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(input: &str) -> EvaluateArgs {
        EvaluateArgs {
            input: input.to_string(),
            output: None,
            config: None,
            format: None,
            delimiter: None,
            workers: None,
        }
    }

    #[test]
    fn test_default_output_path() {
        let path = default_output_path(Path::new("data/vulns.csv"), "_ssvc_report", OutputFormat::Csv);
        assert_eq!(path, PathBuf::from("data/vulns_ssvc_report.csv"));
        let path = default_output_path(Path::new("vulns.CSV"), "_x", OutputFormat::Json);
        assert_eq!(path, PathBuf::from("vulns_x.json"));
    }

    #[test]
    fn test_rejects_non_csv_input() {
        let err = build_settings(&args("vulns.xlsx"), &TriageConfig::default()).unwrap_err();
        assert!(matches!(err, TriageError::Input(_)));
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = config::parse_config_str("output:\n  format: json\nbatch:\n  workers: 2\n").unwrap();
        let mut a = args("in.csv");
        a.format = Some("csv".into());
        a.workers = Some(8);
        a.delimiter = Some(';');
        let settings = build_settings(&a, &config).unwrap();
        assert_eq!(settings.format, OutputFormat::Csv);
        assert_eq!(settings.workers, 8);
        assert_eq!(settings.input_delimiter, ';');
        assert_eq!(settings.output, PathBuf::from("in_ssvc_report.csv"));
    }

    #[test]
    fn test_config_defaults_apply() {
        let config = config::parse_config_str("output:\n  format: json\n").unwrap();
        let settings = build_settings(&args("in.csv"), &config).unwrap();
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.output, PathBuf::from("in_ssvc_report.json"));
        assert_eq!(settings.output_delimiter, ';');
        assert!(settings.bom);
    }

    #[test]
    fn test_invalid_format_flag() {
        let mut a = args("in.csv");
        a.format = Some("xml".into());
        assert!(matches!(
            build_settings(&a, &TriageConfig::default()),
            Err(TriageError::Config(_))
        ));
    }

    #[test]
    fn test_zero_workers_flag() {
        let mut a = args("in.csv");
        a.workers = Some(0);
        assert!(build_settings(&a, &TriageConfig::default()).is_err());
    }
}
