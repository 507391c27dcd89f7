//! Course-code mentions such as `MATH 21a`, `cs50` or `COMPSCI 181`.

use std::sync::LazyLock;

use regex::Regex;
use syllabus_core::Confidence;

use super::departments::canonical_department;
use super::{Extraction, Spans};

static RE_CODE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\b([A-Za-z]{2,})\s*(\d{1,4})([A-Za-z]{0,2})\b").ok());

static RE_LEVEL_AFTER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[\s-]*(level|levels)\b").ok());

static RE_RANGE_AFTER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^\s*(-|–|—|to|through)\s*\d").ok());

/// Uppercase words that are never department prefixes.
const NOT_DEPARTMENTS: &[&str] = &[
    "ABOUT", "AND", "AT", "FALL", "FOR", "IN", "LEVEL", "OR", "OVER", "SPRING", "SUMMER",
    "THE", "TOP", "UNDER", "WINTER",
];

const UPPERCASE_CONFIDENCE: f64 = 0.9;
const KEYWORD_CONFIDENCE: f64 = 0.85;

fn looks_like_year(number: &str) -> bool {
    number.len() == 4 && (number.starts_with("19") || number.starts_with("20"))
}

/// Extract course codes from `raw`, claiming their spans.
///
/// A prefix is accepted when it is written in capitals (`MATH 21a`) or is a
/// known department keyword in any case (`math 21a`, `cs50`). Decade
/// shorthand (`math 130s`), level phrases (`math 100-level`) and range
/// starts (`math 130 to 139`) are not codes.
/// Offsets in `spans` refer to `raw`, which must share byte offsets with the
/// lowercased query.
pub fn extract(raw: &str, spans: &mut Spans) -> Extraction<String> {
    let mut out = Extraction::empty();
    let Some(re) = RE_CODE.as_ref() else {
        return out;
    };

    for caps in re.captures_iter(raw) {
        let (Some(whole), Some(prefix), Some(number), Some(suffix)) =
            (caps.get(0), caps.get(1), caps.get(2), caps.get(3))
        else {
            continue;
        };
        if spans.overlaps(&whole.range()) || looks_like_year(number.as_str()) {
            continue;
        }

        let suffix = suffix.as_str();
        let num: u32 = match number.as_str().parse() {
            Ok(n) => n,
            Err(_) => continue,
        };
        if suffix.eq_ignore_ascii_case("s") && num % 10 == 0 {
            continue;
        }
        let rest = &raw[whole.end()..];
        if RE_LEVEL_AFTER.as_ref().is_some_and(|r| r.is_match(rest))
            || RE_RANGE_AFTER.as_ref().is_some_and(|r| r.is_match(rest))
        {
            continue;
        }

        let prefix_text = prefix.as_str();
        let is_upper = prefix_text.chars().all(|c| c.is_ascii_uppercase());
        let (department, confidence) = match canonical_department(prefix_text) {
            Some(code) if is_upper => (code.to_string(), UPPERCASE_CONFIDENCE),
            Some(code) => (code.to_string(), KEYWORD_CONFIDENCE),
            None if is_upper && !NOT_DEPARTMENTS.contains(&prefix_text) => {
                (prefix_text.to_string(), UPPERCASE_CONFIDENCE)
            }
            None => continue,
        };

        spans.claim(whole.range());
        let code = format!("{} {}{}", department, number.as_str(), suffix.to_uppercase());
        if !out.values.contains(&code) {
            out.values.push(code);
        }
        out.confidence = out.confidence.or(Confidence::new(confidence));
    }
    out
}
