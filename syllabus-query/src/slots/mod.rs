//! Slot extractors. Each is a pure function from text to values plus a
//! confidence, independent of the interpreter's control flow.

pub mod aspects;
pub mod codes;
pub mod constraints;
pub mod departments;
pub mod levels;
pub mod preferences;
pub mod referenced;
pub mod terms;

use std::ops::Range;

use syllabus_core::Confidence;

/// Values found for one slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction<T> {
    pub values: Vec<T>,
    pub confidence: Confidence,
    /// Caveats to surface as `needs_verification`.
    pub notes: Vec<String>,
}

impl<T> Extraction<T> {
    pub fn empty() -> Self {
        Self {
            values: Vec::new(),
            confidence: Confidence::NONE,
            notes: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<T> Default for Extraction<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Byte ranges of the query already claimed by an earlier extractor.
#[derive(Debug, Clone, Default)]
pub struct Spans(Vec<Range<usize>>);

impl Spans {
    pub fn claim(&mut self, range: Range<usize>) {
        self.0.push(range);
    }

    pub fn overlaps(&self, range: &Range<usize>) -> bool {
        self.0
            .iter()
            .any(|r| r.start < range.end && range.start < r.end)
    }
}
