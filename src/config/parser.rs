use std::collections::HashMap;
use std::path::Path;

use crate::errors::TriageError;
use crate::reporting::columns::derived_headers;
use super::schema::CONFIG_SCHEMA;
use super::types::TriageConfig;
use tracing::{debug, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

pub async fn parse_config(path: &Path) -> Result<TriageConfig, TriageError> {
    if !path.exists() {
        return Err(TriageError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(TriageError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config = parse_config_str(&content)?;
    debug!(path = %path.display(), "Loaded configuration");
    Ok(config)
}

pub fn parse_config_str(content: &str) -> Result<TriageConfig, TriageError> {
    // An empty file is a valid, all-defaults configuration.
    if content.trim().is_empty() {
        return Ok(TriageConfig::default());
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    validate_schema(&yaml)?;

    let config: TriageConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), TriageError> {
    let json_value = serde_json::to_value(yaml)
        .map_err(|e| TriageError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| TriageError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only: typed deserialization is the hard check.
        for e in errors {
            warn!(validation_error = %e, path = %e.instance_path, "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &TriageConfig) -> Result<(), TriageError> {
    let derived = derived_headers();
    let mut claimed: HashMap<String, &'static str> = HashMap::new();
    for (source, header) in config.column_aliases().iter() {
        if derived.iter().any(|d| d.eq_ignore_ascii_case(header.trim())) {
            return Err(TriageError::Config(format!(
                "Column '{}' for {} collides with a report column",
                header, source
            )));
        }
        let key = header.trim().to_lowercase();
        if let Some(other) = claimed.insert(key, source) {
            if other != source {
                return Err(TriageError::Config(format!(
                    "Conflicting columns: header '{}' is mapped to both {} and {}",
                    header, other, source
                )));
            }
        }
    }

    for (name, delimiter) in [
        ("input.delimiter", config.input_delimiter()),
        ("output.delimiter", config.output_delimiter()),
    ] {
        if !delimiter.is_ascii() || delimiter == '"' || delimiter == '\n' || delimiter == '\r' {
            return Err(TriageError::Config(format!(
                "{} must be a single ASCII character other than a quote or newline, got {:?}",
                name, delimiter
            )));
        }
    }

    if config.workers() == 0 {
        return Err(TriageError::Config("batch.workers must be at least 1".into()));
    }

    if config.output_suffix().trim().is_empty() {
        return Err(TriageError::Config("output.suffix must not be empty".into()));
    }

    if let Some(columns) = &config.columns {
        let empty_list = [
            &columns.exploitation,
            &columns.mission_impact,
            &columns.automatable,
            &columns.technical_impact,
            &columns.cvss_vector,
        ]
        .into_iter()
        .flatten()
        .any(|headers| headers.iter().any(|h| h.trim().is_empty()));
        if empty_list {
            warn!("Blank column alias in config is ignored");
        }
    }

    Ok(())
}
