//! Resolution of long-form department and concentration names to the
//! department codes that actually occur in the course data.

use std::collections::{BTreeSet, HashMap};

use syllabus_core::config::AliasConfig;

/// Lookup tables captured at build time.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    config: AliasConfig,
    /// Lowercased long department name (`computer science`) to code tokens.
    long_names: HashMap<String, BTreeSet<String>>,
    present: BTreeSet<String>,
}

impl AliasTable {
    pub fn new(config: AliasConfig) -> Self {
        Self {
            config,
            long_names: HashMap::new(),
            present: BTreeSet::new(),
        }
    }

    /// Record one course's department code and long department name.
    pub(crate) fn observe(&mut self, code_department: &str, long_name: &str) {
        self.present.insert(code_department.to_string());
        let key = long_name.trim().to_lowercase();
        if !key.is_empty() {
            self.long_names
                .entry(key)
                .or_default()
                .insert(code_department.to_string());
        }
    }

    /// Department codes present in the data.
    pub fn present(&self) -> &BTreeSet<String> {
        &self.present
    }

    /// Resolve `name` to present department codes.
    ///
    /// Tried in order: a code itself, the configured alias table, then long
    /// department names seen in the data. Codes absent from the data are dropped.
    pub fn resolve(&self, name: &str) -> BTreeSet<String> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return BTreeSet::new();
        }

        let upper = trimmed.to_uppercase();
        if self.present.contains(&upper) {
            return BTreeSet::from([upper]);
        }

        if let Some(codes) = self.config.codes_for(trimmed) {
            let found: BTreeSet<String> = codes
                .iter()
                .map(|c| c.to_uppercase())
                .filter(|c| self.present.contains(c))
                .collect();
            if !found.is_empty() {
                return found;
            }
        }

        self.long_names
            .get(&trimmed.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> AliasTable {
        let mut t = AliasTable::new(AliasConfig::default());
        t.observe("GOV", "Government");
        t.observe("HIST", "History");
        t.observe("ECON", "Economics");
        t.observe("COMPSCI", "Computer Science");
        t.observe("ESPP", "Environmental Science and Public Policy");
        t
    }

    #[test]
    fn interdisciplinary_alias_keeps_only_present_codes() {
        // SOC is in the alias entry but absent from the data.
        let codes = table().resolve("Social Studies");
        assert_eq!(
            codes,
            BTreeSet::from(["ECON".to_string(), "GOV".to_string(), "HIST".to_string()])
        );
    }

    #[test]
    fn code_resolves_to_itself() {
        assert_eq!(table().resolve("compsci"), BTreeSet::from(["COMPSCI".to_string()]));
    }

    #[test]
    fn long_name_from_data() {
        assert_eq!(
            table().resolve("environmental science and public policy"),
            BTreeSet::from(["ESPP".to_string()])
        );
    }

    #[test]
    fn unknown_is_empty() {
        assert!(table().resolve("Astrology").is_empty());
    }
}
