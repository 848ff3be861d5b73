use super::types::TriageError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub exit_code: i32,
}

impl TriageError {
    /// Classify this error to pick the process exit code.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            TriageError::Config(_) => ErrorClassification {
                error_type: "ConfigError",
                exit_code: 2,
            },
            TriageError::Yaml(_) => ErrorClassification {
                error_type: "YamlError",
                exit_code: 2,
            },

            TriageError::Input(_) => ErrorClassification {
                error_type: "InputError",
                exit_code: 3,
            },
            TriageError::Csv(_) => ErrorClassification {
                error_type: "CsvError",
                exit_code: 3,
            },

            TriageError::Output(_) => ErrorClassification {
                error_type: "OutputError",
                exit_code: 4,
            },

            TriageError::Io(_) => ErrorClassification {
                error_type: "IoError",
                exit_code: 1,
            },
            TriageError::Json(_) => ErrorClassification {
                error_type: "JsonError",
                exit_code: 1,
            },
            TriageError::Internal(_) => ErrorClassification {
                error_type: "InternalError",
                exit_code: 1,
            },
        }
    }
}
