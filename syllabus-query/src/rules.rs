//! Compiled `(pattern, value, confidence)` rule tables.
//!
//! Tables are plain `const` data; compilation happens once per table behind a
//! `LazyLock`. A pattern that fails to compile is logged and skipped, the rest
//! of the table still applies.

use regex::Regex;
use tracing::warn;

/// One compiled rule.
#[derive(Debug)]
pub struct Rule<T> {
    pub regex: Regex,
    pub value: T,
    pub confidence: f64,
}

/// Compile a rule table, skipping invalid patterns.
pub fn compile<T: Clone>(table: &[(&str, T, f64)]) -> Vec<Rule<T>> {
    table
        .iter()
        .filter_map(|(pattern, value, confidence)| match Regex::new(pattern) {
            Ok(regex) => Some(Rule {
                regex,
                value: value.clone(),
                confidence: *confidence,
            }),
            Err(e) => {
                warn!(pattern = *pattern, error = %e, "invalid rule pattern skipped");
                None
            }
        })
        .collect()
}

/// Compile bare patterns (value-less rules).
pub fn compile_patterns(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|p| match Regex::new(p) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(pattern = *p, error = %e, "invalid pattern skipped");
                None
            }
        })
        .collect()
}

/// Rules whose pattern occurs anywhere in `text`, in table order.
pub fn fired<'a, T>(rules: &'a [Rule<T>], text: &'a str) -> impl Iterator<Item = &'a Rule<T>> {
    rules.iter().filter(move |r| r.regex.is_match(text))
}

/// Every distinct value that fired, in first-fired order, with the highest
/// confidence among its rules.
pub fn best_per_value<T: Clone + PartialEq>(rules: &[Rule<T>], text: &str) -> Vec<(T, f64)> {
    let mut out: Vec<(T, f64)> = Vec::new();
    for rule in fired(rules, text) {
        match out.iter_mut().find(|(v, _)| *v == rule.value) {
            Some((_, c)) => *c = c.max(rule.confidence),
            None => out.push((rule.value.clone(), rule.confidence)),
        }
    }
    out
}

/// Whether any of `patterns` occurs in `text`.
pub fn any_match(patterns: &[Regex], text: &str) -> bool {
    patterns.iter().any(|re| re.is_match(text))
}
