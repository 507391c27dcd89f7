//! Course-level ranges.
//!
//! Three shapes normalize to inclusive `(low, high)` pairs: decade shorthand
//! (`130s`), N-level (`100-level`), and explicit ranges (`130 to 139`).
//! Bare numbers that could be levels or course numbers get low confidence.

use std::sync::LazyLock;

use syllabus_core::{Confidence, LevelRange, Penalty};

use super::{Extraction, Spans};
use crate::rules::{compile, compile_patterns, Rule};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Decade,
    NLevel,
    Range,
}

const LEVEL_TABLE: &[(&str, Shape, f64)] = &[
    (r"\b(\d{2,4})\s*(?:-|–|—|to|through)\s*(\d{2,4})\b", Shape::Range, 0.95),
    (r"\bbetween\s+(\d{2,4})\s+and\s+(\d{2,4})\b", Shape::Range, 0.95),
    (r"\b(\d{2,4})s\b", Shape::Decade, 0.9),
    (r"\b(\d{2,4})[\s-]?levels?\b", Shape::NLevel, 0.9),
    (r"\blevels?\s+(\d{2,4})\b", Shape::NLevel, 0.8),
];

static LEVEL_RULES: LazyLock<Vec<Rule<Shape>>> = LazyLock::new(|| compile(LEVEL_TABLE));

static BARE_NUMBER: LazyLock<Vec<regex::Regex>> =
    LazyLock::new(|| compile_patterns(&[r"\b(\d{2,3})\b"]));

/// Units after a number that make it a quantity, not a level.
static QUANTITY_AFTER: LazyLock<Vec<regex::Regex>> = LazyLock::new(|| {
    compile_patterns(&[
        r"^(\.\d+)?\s*(%|(hours?|hrs?|minutes?|percent|stars?|students?|credits?|years?|people|pages?)\b)",
        r"^(\.\d+)?\s*(-|–|—|to)\s*\d+(\.\d+)?\s*(%|(hours?|hrs?|minutes?|percent|stars?|students?|credits?|years?|people|pages?)\b)",
    ])
});

const LEVEL_WORDS: &[&str] = &["level", "levels", "hundred"];
const CONTEXT_WINDOW: usize = 15;

const BARE_LEVEL_HUNDREDS: f64 = 0.8;
const BARE_LEVEL_DECADE: f64 = 0.75;
const BARE_LEVEL_EXACT: f64 = 0.5;
const BARE_AMBIGUOUS: f64 = 0.45;

fn looks_like_year(n: u32) -> bool {
    (1900..=2099).contains(&n)
}

/// Map a level number to its band: `100` → 100–199, `130` → 130–139,
/// otherwise the enclosing decade at reduced confidence.
fn level_band(n: u32, confidence: Confidence) -> (LevelRange, Confidence) {
    if n % 100 == 0 {
        (LevelRange::hundreds_from(n), confidence)
    } else if n % 10 == 0 {
        (LevelRange::decade_of(n), confidence)
    } else {
        (
            LevelRange::decade_of(n),
            confidence.penalize(Penalty::AdjustedToDecade),
        )
    }
}

fn has_level_word_nearby(lower: &str, start: usize, end: usize) -> bool {
    let before_start = start.saturating_sub(CONTEXT_WINDOW);
    let before = lower.get(before_start..start).unwrap_or("");
    let after_end = (end + CONTEXT_WINDOW).min(lower.len());
    let after = lower.get(end..after_end).unwrap_or("");
    LEVEL_WORDS
        .iter()
        .any(|w| before.contains(w) || after.contains(w))
}

pub fn extract(lower: &str, spans: &mut Spans) -> Extraction<LevelRange> {
    let mut out = Extraction::empty();
    let push = |out: &mut Extraction<LevelRange>, range: LevelRange, c: Confidence| {
        if !out.values.contains(&range) {
            out.values.push(range);
        }
        out.confidence = out.confidence.or(c);
    };

    for rule in LEVEL_RULES.iter() {
        for caps in rule.regex.captures_iter(lower) {
            let Some(whole) = caps.get(0) else { continue };
            if spans.overlaps(&whole.range()) {
                continue;
            }
            let first: Option<u32> = caps.get(1).and_then(|m| m.as_str().parse().ok());
            let Some(first) = first else { continue };
            let base = Confidence::new(rule.confidence);

            match rule.value {
                Shape::Range => {
                    let second: Option<u32> = caps.get(2).and_then(|m| m.as_str().parse().ok());
                    let Some(second) = second else { continue };
                    let rest = &lower[whole.end()..];
                    if looks_like_year(first)
                        || looks_like_year(second)
                        || QUANTITY_AFTER.iter().any(|re| re.is_match(rest))
                    {
                        continue;
                    }
                    spans.claim(whole.range());
                    push(&mut out, LevelRange::new(first, second), base);
                }
                Shape::Decade => {
                    if looks_like_year(first) {
                        continue;
                    }
                    spans.claim(whole.range());
                    if first % 10 == 0 {
                        push(&mut out, LevelRange::decade_of(first), base);
                    } else {
                        push(
                            &mut out,
                            LevelRange::decade_of(first),
                            base.penalize(Penalty::AdjustedToDecade),
                        );
                    }
                }
                Shape::NLevel => {
                    spans.claim(whole.range());
                    let (range, c) = level_band(first, base);
                    push(&mut out, range, c);
                }
            }
        }
    }

    for re in BARE_NUMBER.iter() {
        for caps in re.captures_iter(lower) {
            let Some(m) = caps.get(1) else { continue };
            if spans.overlaps(&m.range()) {
                continue;
            }
            let Ok(n) = m.as_str().parse::<u32>() else { continue };
            if n < 10 || QUANTITY_AFTER.iter().any(|q| q.is_match(&lower[m.end()..])) {
                continue;
            }
            spans.claim(m.range());

            if has_level_word_nearby(lower, m.start(), m.end()) {
                let (range, c) = if n % 100 == 0 {
                    (LevelRange::hundreds_from(n), Confidence::new(BARE_LEVEL_HUNDREDS))
                } else if n % 10 == 0 {
                    (LevelRange::decade_of(n), Confidence::new(BARE_LEVEL_DECADE))
                } else {
                    (LevelRange::new(n, n), Confidence::new(BARE_LEVEL_EXACT))
                };
                push(&mut out, range, c);
            } else {
                push(&mut out, LevelRange::new(n, n), Confidence::new(BARE_AMBIGUOUS));
                out.notes
                    .push(format!("Ambiguous number {n} read as a course number"));
            }
        }
    }

    out.values.sort();
    if out.values.len() > 1 {
        out.confidence = out.confidence.penalize(Penalty::MultipleValues);
    }
    out
}
