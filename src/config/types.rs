use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::decision::{Evaluator, ImpactRule};
use crate::models::{Exploitation, MissionImpact};
use crate::normalize::{ColumnAliases, Normalizer, ValueAliases};

pub const DEFAULT_INPUT_DELIMITER: char = ',';
pub const DEFAULT_OUTPUT_DELIMITER: char = ';';
pub const DEFAULT_OUTPUT_SUFFIX: &str = "_ssvc_report";

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct TriageConfig {
    pub input: Option<InputConfig>,
    pub columns: Option<ColumnsConfig>,
    pub codes: Option<CodesConfig>,
    pub decision: Option<DecisionConfig>,
    pub output: Option<OutputConfig>,
    pub batch: Option<BatchConfig>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct InputConfig {
    pub delimiter: Option<char>,
}

/// Extra header aliases per source column, tried before the built-in ones.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ColumnsConfig {
    pub exploitation: Option<Vec<String>>,
    pub mission_impact: Option<Vec<String>>,
    pub automatable: Option<Vec<String>>,
    pub technical_impact: Option<Vec<String>>,
    pub cvss_vector: Option<Vec<String>>,
}

/// Extra value spellings, merged over the built-in ones.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodesConfig {
    pub exploitation: Option<BTreeMap<String, Exploitation>>,
    pub mission_impact: Option<BTreeMap<String, MissionImpact>>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DecisionConfig {
    pub technical_impact_rule: Option<ImpactRule>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OutputConfig {
    pub delimiter: Option<char>,
    pub format: Option<OutputFormat>,
    pub bom: Option<bool>,
    pub suffix: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn extension(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("Invalid output format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct BatchConfig {
    pub workers: Option<usize>,
}

impl TriageConfig {
    pub fn column_aliases(&self) -> ColumnAliases {
        let defaults = ColumnAliases::default();
        let Some(columns) = &self.columns else {
            return defaults;
        };
        ColumnAliases {
            exploitation: prepend(&columns.exploitation, defaults.exploitation),
            mission_impact: prepend(&columns.mission_impact, defaults.mission_impact),
            automatable: prepend(&columns.automatable, defaults.automatable),
            technical_impact: prepend(&columns.technical_impact, defaults.technical_impact),
            cvss_vector: prepend(&columns.cvss_vector, defaults.cvss_vector),
        }
    }

    pub fn normalizer(&self) -> Normalizer {
        let mut exploitation = ValueAliases::<Exploitation>::default();
        let mut mission_impact = ValueAliases::<MissionImpact>::default();
        if let Some(codes) = &self.codes {
            for (alias, value) in codes.exploitation.iter().flatten() {
                exploitation.insert(alias, *value);
            }
            for (alias, value) in codes.mission_impact.iter().flatten() {
                mission_impact.insert(alias, *value);
            }
        }
        Normalizer::new(self.column_aliases(), exploitation, mission_impact)
    }

    pub fn impact_rule(&self) -> ImpactRule {
        self.decision
            .as_ref()
            .and_then(|d| d.technical_impact_rule)
            .unwrap_or_default()
    }

    pub fn evaluator(&self) -> Evaluator {
        Evaluator::new(self.impact_rule())
    }

    pub fn input_delimiter(&self) -> char {
        self.input
            .as_ref()
            .and_then(|i| i.delimiter)
            .unwrap_or(DEFAULT_INPUT_DELIMITER)
    }

    pub fn output_delimiter(&self) -> char {
        self.output
            .as_ref()
            .and_then(|o| o.delimiter)
            .unwrap_or(DEFAULT_OUTPUT_DELIMITER)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.as_ref().and_then(|o| o.format).unwrap_or_default()
    }

    pub fn output_bom(&self) -> bool {
        self.output.as_ref().and_then(|o| o.bom).unwrap_or(true)
    }

    pub fn output_suffix(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.suffix.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_SUFFIX)
    }

    pub fn workers(&self) -> usize {
        self.batch.as_ref().and_then(|b| b.workers).unwrap_or(1)
    }
}

fn prepend(extra: &Option<Vec<String>>, defaults: Vec<String>) -> Vec<String> {
    let mut merged = extra.clone().unwrap_or_default();
    for header in defaults {
        if !merged.iter().any(|h| h.eq_ignore_ascii_case(&header)) {
            merged.push(header);
        }
    }
    merged
}
