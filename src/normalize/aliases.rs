use std::collections::HashMap;

use crate::models::{Exploitation, MissionImpact, Vocabulary};

/// Header names under which each source column may appear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnAliases {
    pub exploitation: Vec<String>,
    pub mission_impact: Vec<String>,
    pub automatable: Vec<String>,
    pub technical_impact: Vec<String>,
    pub cvss_vector: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            exploitation: strings(&["Exploitation", "Nature Exploit", "exploit_maturity"]),
            mission_impact: strings(&["Mission & Well-being", "Criticité", "system_context"]),
            automatable: strings(&["Automatable"]),
            technical_impact: strings(&["Technical Impact"]),
            cvss_vector: strings(&["CVSS Vector", "CVSS 3 Vecteur", "cvss_vector"]),
        }
    }
}

impl ColumnAliases {
    /// Every (source, header) pair, used to detect headers claimed twice.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("exploitation", &self.exploitation),
            ("mission_impact", &self.mission_impact),
            ("automatable", &self.automatable),
            ("technical_impact", &self.technical_impact),
            ("cvss_vector", &self.cvss_vector),
        ]
        .into_iter()
        .flat_map(|(source, headers)| headers.iter().map(move |h| (source, h.as_str())))
    }
}

/// Extra spellings accepted for a vocabulary on top of its codes and labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueAliases<V> {
    map: HashMap<String, V>,
}

impl<V: Vocabulary> ValueAliases<V> {
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    pub fn insert(&mut self, alias: &str, value: V) {
        self.map.insert(fold(alias), value);
    }

    /// Canonical code or label first, then the alias table.
    pub fn resolve(&self, raw: &str) -> Option<V> {
        V::parse(raw).or_else(|| self.map.get(&fold(raw)).copied())
    }
}

impl Default for ValueAliases<Exploitation> {
    fn default() -> Self {
        let mut aliases = Self::empty();
        for alias in ["internet", "existant", "attacked", "functional", "high", "critical"] {
            aliases.insert(alias, Exploitation::Active);
        }
        for alias in ["proof of concept", "proof-of-concept", "available"] {
            aliases.insert(alias, Exploitation::Poc);
        }
        for alias in ["non prouvé", "unproven"] {
            aliases.insert(alias, Exploitation::None);
        }
        aliases
    }
}

impl Default for ValueAliases<MissionImpact> {
    fn default() -> Self {
        let mut aliases = Self::empty();
        aliases.insert("x", MissionImpact::Medium);
        for alias in ["xx", "xxx", "xxxx"] {
            aliases.insert(alias, MissionImpact::High);
        }
        aliases
    }
}

fn fold(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exploitation_defaults() {
        let aliases = ValueAliases::<Exploitation>::default();
        assert_eq!(aliases.resolve("Internet"), Some(Exploitation::Active));
        assert_eq!(aliases.resolve("Proof of Concept"), Some(Exploitation::Poc));
        assert_eq!(aliases.resolve("NON PROUVÉ"), Some(Exploitation::None));
        assert_eq!(aliases.resolve("active"), Some(Exploitation::Active));
        assert_eq!(aliases.resolve("maybe"), None);
    }

    #[test]
    fn test_severity_words_mean_active_exploitation() {
        let aliases = ValueAliases::<Exploitation>::default();
        assert_eq!(aliases.resolve("High"), Some(Exploitation::Active));
        assert_eq!(aliases.resolve(" CRITICAL "), Some(Exploitation::Active));
    }

    #[test]
    fn test_mission_defaults() {
        let aliases = ValueAliases::<MissionImpact>::default();
        assert_eq!(aliases.resolve("X"), Some(MissionImpact::Medium));
        assert_eq!(aliases.resolve("xxxx"), Some(MissionImpact::High));
        assert_eq!(aliases.resolve("Low"), Some(MissionImpact::Low));
        assert_eq!(aliases.resolve("xxxxx"), None);
    }

    #[test]
    fn test_insert_overrides_default() {
        let mut aliases = ValueAliases::<MissionImpact>::default();
        aliases.insert("X", MissionImpact::Low);
        assert_eq!(aliases.resolve("x"), Some(MissionImpact::Low));
    }

    #[test]
    fn test_column_alias_iteration() {
        let columns = ColumnAliases::default();
        let pairs: Vec<_> = columns.iter().collect();
        assert!(pairs.contains(&("cvss_vector", "CVSS 3 Vecteur")));
        assert!(pairs.contains(&("mission_impact", "Criticité")));
    }
}
