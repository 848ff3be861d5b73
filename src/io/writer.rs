use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::info;

use crate::errors::TriageError;
use crate::reporting::{Report, Summary};
use super::reader::ascii_delimiter;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn render_csv(report: &Report, delimiter: char, bom: bool) -> Result<Vec<u8>, TriageError> {
    let mut buffer = Vec::new();
    if bom {
        buffer.extend_from_slice(UTF8_BOM);
    }
    let mut writer = csv::WriterBuilder::new()
        .delimiter(ascii_delimiter(delimiter)?)
        .from_writer(buffer);
    writer.write_record(&report.headers)?;
    for row in &report.rows {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| TriageError::Output(format!("Failed to flush CSV output: {}", e)))
}

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: String,
    source: String,
    summary: &'a Summary,
    rows: Vec<Map<String, Value>>,
}

/// Rows become objects keyed by header, in column order. A header repeated
/// in the source keeps its last value.
pub fn render_json(report: &Report, source: &Path) -> Result<Vec<u8>, TriageError> {
    let rows = report
        .rows
        .iter()
        .map(|row| {
            report
                .headers
                .iter()
                .zip(row)
                .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                .collect::<Map<String, Value>>()
        })
        .collect();
    let document = JsonReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        source: source.display().to_string(),
        summary: &report.summary,
        rows,
    };
    let mut bytes = serde_json::to_vec_pretty(&document)?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub async fn write_report(path: &Path, bytes: &[u8]) -> Result<(), TriageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            return Err(TriageError::Output(format!(
                "Output directory does not exist: {}",
                parent.display()
            )));
        }
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| TriageError::Output(format!("Cannot write {}: {}", path.display(), e)))?;
    info!(path = %path.display(), bytes = bytes.len(), "Report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        Report {
            headers: vec!["ID".into(), "SSVC Action".into()],
            rows: vec![
                vec!["CVE-1".into(), "Act".into()],
                vec!["CVE-2; quoted".into(), "".into()],
            ],
            summary: Summary { rows: 2, decided: 1, invalid: 1, ..Default::default() },
        }
    }

    #[test]
    fn test_render_csv_with_bom_and_semicolons() {
        let bytes = render_csv(&report(), ';', true).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
        assert_eq!(text, "ID;SSVC Action\nCVE-1;Act\n\"CVE-2; quoted\";\n");
    }

    #[test]
    fn test_render_csv_without_bom() {
        let bytes = render_csv(&report(), ',', false).unwrap();
        assert!(bytes.starts_with(b"ID,SSVC Action"));
    }

    #[test]
    fn test_render_json_keeps_column_order() {
        let bytes = render_json(&report(), Path::new("in.csv")).unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["source"], "in.csv");
        assert_eq!(value["summary"]["invalid"], 1);
        let first = value["rows"][0].as_object().unwrap();
        let keys: Vec<&String> = first.keys().collect();
        assert_eq!(keys, vec!["ID", "SSVC Action"]);
        assert_eq!(first["SSVC Action"], "Act");
    }

    #[tokio::test]
    async fn test_write_report_missing_directory() {
        let err = write_report(Path::new("/nonexistent/dir/out.csv"), b"x").await.unwrap_err();
        assert!(matches!(err, TriageError::Output(_)));
    }

    #[tokio::test]
    async fn test_write_report() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("out.csv");
        write_report(&path, b"a;b\n").await.unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"a;b\n");
    }
}
