//! Output column headers, spelled with the same labels as the values.

use crate::models::{Metric, Vocabulary};

pub const ACTION_HEADER: &str = "SSVC Action";
pub const ERRORS_HEADER: &str = "SSVC Errors";

/// `Attack Vector (AV)` and friends, in vector order.
pub fn cvss_headers() -> Vec<String> {
    Metric::CVSS_BASE
        .iter()
        .map(|m| format!("{} ({})", m.label(), m.code()))
        .collect()
}

/// Normalized inputs that are not part of the CVSS vector. Suffixed so they
/// never shadow a source column of the same name.
pub fn input_headers() -> Vec<String> {
    [Metric::Exploitation, Metric::MissionImpact]
        .iter()
        .map(|m| format!("{} (Normalized)", m.label()))
        .collect()
}

pub fn decision_headers() -> Vec<String> {
    [
        Metric::Exploitation,
        Metric::Automatable,
        Metric::TechnicalImpact,
        Metric::MissionImpact,
    ]
    .iter()
    .map(|m| format!("SSVC {}", m.label()))
    .collect()
}

/// Every column appended after the source columns.
pub fn derived_headers() -> Vec<String> {
    let mut headers = cvss_headers();
    headers.extend(input_headers());
    headers.extend(decision_headers());
    headers.push(ACTION_HEADER.to_string());
    headers.push(ERRORS_HEADER.to_string());
    headers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_headers() {
        let headers = derived_headers();
        assert_eq!(headers.len(), 16);
        assert_eq!(headers[0], "Attack Vector (AV)");
        assert_eq!(headers[7], "Availability (A)");
        assert_eq!(headers[8], "Exploitation (Normalized)");
        assert_eq!(headers[9], "Mission & Well-being (Normalized)");
        assert_eq!(headers[10], "SSVC Exploitation");
        assert_eq!(headers[12], "SSVC Technical Impact");
        assert_eq!(headers[14], "SSVC Action");
        assert_eq!(headers[15], "SSVC Errors");
    }

    #[test]
    fn test_derived_headers_never_reuse_source_aliases() {
        let derived = derived_headers();
        let aliases = crate::normalize::ColumnAliases::default();
        for (_, header) in aliases.iter() {
            assert!(!derived.iter().any(|d| d.eq_ignore_ascii_case(header)), "{}", header);
        }
    }
}
