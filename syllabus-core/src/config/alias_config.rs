use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Concentration-name to department-code table.
///
/// Interdisciplinary programs map to several codes. A TOML `[aliases.concentrations]`
/// table replaces the defaults entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AliasConfig {
    pub concentrations: BTreeMap<String, Vec<String>>,
}

impl AliasConfig {
    /// Codes listed for `name`, matched case-insensitively.
    pub fn codes_for(&self, name: &str) -> Option<&[String]> {
        let needle = name.trim();
        self.concentrations
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(needle))
            .map(|(_, v)| v.as_slice())
    }
}

impl Default for AliasConfig {
    fn default() -> Self {
        Self {
            concentrations: defaults::DEFAULT_CONCENTRATION_ALIASES
                .iter()
                .map(|(name, codes)| {
                    (
                        (*name).to_string(),
                        codes.iter().map(|c| (*c).to_string()).collect(),
                    )
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn social_studies_spans_four_departments() {
        let aliases = AliasConfig::default();
        let codes = aliases.codes_for("social studies").unwrap();
        assert_eq!(codes, ["GOV", "HIST", "SOC", "ECON"]);
    }

    #[test]
    fn unknown_name_is_none() {
        assert!(AliasConfig::default().codes_for("Underwater Basketry").is_none());
    }
}
