use std::path::Path;

use tracing::{debug, warn};

use crate::errors::TriageError;
use crate::models::RawRow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// A delimited table as read from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl Table {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub async fn read_table(path: &Path, delimiter: char) -> Result<Table, TriageError> {
    if !path.exists() {
        return Err(TriageError::Input(format!("Input file not found: {}", path.display())));
    }
    let bytes = tokio::fs::read(path).await?;
    let table = parse_table(&bytes, delimiter)?;
    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "Read input table"
    );
    Ok(table)
}

/// Parse delimited text. Headers are trimmed, invalid UTF-8 is replaced
/// rather than rejected, and short records leave trailing columns absent.
pub fn parse_table(bytes: &[u8], delimiter: char) -> Result<Table, TriageError> {
    let delimiter = ascii_delimiter(delimiter)?;
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.byte_records().enumerate() {
        let record = record?;
        if record.len() > headers.len() {
            warn!(
                row = index + 1,
                fields = record.len(),
                columns = headers.len(),
                "Record has more fields than the header, extra fields dropped"
            );
        }
        let row = headers
            .iter()
            .zip(record.iter())
            .map(|(header, value)| (header.clone(), String::from_utf8_lossy(value).into_owned()))
            .collect::<Vec<_>>();
        rows.push(RawRow::new(row));
    }

    Ok(Table { headers, rows })
}

pub(crate) fn ascii_delimiter(delimiter: char) -> Result<u8, TriageError> {
    u8::try_from(delimiter)
        .ok()
        .filter(|b| b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r')
        .ok_or_else(|| TriageError::Config(format!("Invalid delimiter: {:?}", delimiter)))
}
