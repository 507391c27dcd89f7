//! Course-code normalization.
//!
//! Canonical form is an uppercase department token, one space, and an
//! alphanumeric number: `"math  131"`, `"Math131"` and `"MATH 131"` all
//! normalize to `"MATH 131"`.

use std::sync::LazyLock;

use regex::Regex;

static RE_GLUED: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z&\-]*)(\d[0-9A-Z]*)$").ok());

static RE_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([A-Z][A-Z&\-]*) (\d+)([A-Z]*)$").ok());

/// A code split into department, leading integer and trailing letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCode {
    pub department: String,
    pub number: u32,
    pub suffix: String,
}

/// Collapse whitespace, uppercase, and separate a glued department prefix.
/// Returns `None` for blank input.
pub fn normalize_code(raw: &str) -> Option<String> {
    let collapsed = raw
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    if collapsed.is_empty() {
        return None;
    }
    if !collapsed.contains(' ') {
        if let Some(caps) = RE_GLUED.as_ref().and_then(|re| re.captures(&collapsed)) {
            return Some(format!("{} {}", &caps[1], &caps[2]));
        }
    }
    Some(collapsed)
}

/// Parse a normalized code. `None` when there is no numeric part.
pub fn parse_code(code: &str) -> Option<ParsedCode> {
    let caps = RE_CODE.as_ref()?.captures(code)?;
    let number = caps[2].parse().ok()?;
    Some(ParsedCode {
        department: caps[1].to_string(),
        number,
        suffix: caps[3].to_string(),
    })
}

/// Lowercase alphanumeric tokens of `text`.
pub fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_case() {
        assert_eq!(normalize_code("math  131").as_deref(), Some("MATH 131"));
        assert_eq!(normalize_code("  Math\t21a ").as_deref(), Some("MATH 21A"));
    }

    #[test]
    fn splits_glued_prefix() {
        assert_eq!(normalize_code("cs50").as_deref(), Some("CS 50"));
        assert_eq!(normalize_code("COMPSCI181").as_deref(), Some("COMPSCI 181"));
    }

    #[test]
    fn blank_is_none() {
        assert_eq!(normalize_code("   "), None);
    }

    #[test]
    fn parses_number_and_suffix() {
        let parsed = parse_code("ECON 1010A").unwrap();
        assert_eq!(parsed.department, "ECON");
        assert_eq!(parsed.number, 1010);
        assert_eq!(parsed.suffix, "A");
    }

    #[test]
    fn unnumbered_code_does_not_parse() {
        assert!(parse_code("FRSEMR").is_none());
        assert!(parse_code("MATH ABC").is_none());
    }
}
