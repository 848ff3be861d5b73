use serde::{Deserialize, Serialize};

/// One record of the source table: column name to raw cell value, in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Raw value of a column matched case-insensitively on the trimmed header.
    /// Blank cells count as absent.
    pub fn get(&self, column: &str) -> Option<&str> {
        let column = column.trim();
        self.fields
            .iter()
            .find(|(name, _)| name.trim().eq_ignore_ascii_case(column))
            .map(|(_, value)| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// First non-blank value among the given column aliases.
    pub fn get_any<S: AsRef<str>>(&self, aliases: &[S]) -> Option<&str> {
        aliases.iter().find_map(|alias| self.get(alias.as_ref()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_ignores_header_case_and_padding() {
        let row: RawRow = [(" Nature Exploit ", "internet")].into_iter().collect();
        assert_eq!(row.get("nature exploit"), Some("internet"));
        assert_eq!(row.get("NATURE EXPLOIT"), Some("internet"));
    }

    #[test]
    fn test_blank_cell_is_absent() {
        let row: RawRow = [("Exploitation", "   ")].into_iter().collect();
        assert_eq!(row.get("Exploitation"), None);
    }

    #[test]
    fn test_get_any_skips_blank_aliases() {
        let row: RawRow = [("Exploitation", ""), ("Nature Exploit", "active")]
            .into_iter()
            .collect();
        assert_eq!(row.get_any(&["Exploitation", "Nature Exploit"]), Some("active"));
        assert_eq!(row.get_any(&["Missing"]), None);
    }
}
