//! Courses a turn refers to: codes named in the query, otherwise the codes
//! the last assistant turn mentioned.

use std::collections::BTreeSet;

use syllabus_core::Confidence;

use super::{codes, Extraction, Spans};

const EXPLICIT_CONFIDENCE: f64 = 0.9;
const CARRIED_CONFIDENCE: f64 = 0.7;

/// Normalized codes mentioned in free text, such as an assistant turn.
pub fn codes_in(text: &str) -> BTreeSet<String> {
    codes::extract(text, &mut Spans::default())
        .values
        .into_iter()
        .collect()
}

pub fn extract(query_codes: &BTreeSet<String>, last_assistant_codes: &BTreeSet<String>) -> Extraction<String> {
    let mut out = Extraction::empty();
    if !query_codes.is_empty() {
        out.values = query_codes.iter().cloned().collect();
        out.confidence = Confidence::new(EXPLICIT_CONFIDENCE);
    } else if !last_assistant_codes.is_empty() {
        out.values = last_assistant_codes.iter().cloned().collect();
        out.confidence = Confidence::new(CARRIED_CONFIDENCE);
    }
    out
}
