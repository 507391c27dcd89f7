//! Confidence values and the named policy used to combine and degrade them.
//!
//! Every stage expresses reliability as a [`Confidence`] in `[0.0, 1.0]`.
//! Combination is either AND-like ([`Confidence::and`], the minimum) or
//! OR-like ([`Confidence::or`], the maximum). Degradation always goes through
//! a named [`Penalty`] so each factor can be found and tested by name.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Mul;

/// Confidence score clamped to [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// Nothing was inferred.
    pub const NONE: Confidence = Confidence(0.0);
    /// Fully certain.
    pub const FULL: Confidence = Confidence(1.0);
    /// Values at or above this are treated as reliable.
    pub const HIGH: f64 = 0.8;
    /// Values below this are flagged for verification.
    pub const LOW: f64 = 0.5;

    /// Create a new Confidence, clamping to [0.0, 1.0]. NaN becomes 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::NONE;
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// AND-like combination: both signals must hold, so the weaker one bounds the result.
    pub fn and(self, other: Confidence) -> Confidence {
        Self(self.0.min(other.0))
    }

    /// OR-like combination: any signal suffices, so the stronger one wins.
    pub fn or(self, other: Confidence) -> Confidence {
        Self(self.0.max(other.0))
    }

    /// Apply a named penalty.
    pub fn penalize(self, penalty: Penalty) -> Confidence {
        Self::new(self.0 * penalty.factor())
    }

    /// Apply the same penalty `times` times (e.g. once per missing code).
    pub fn penalize_n(self, penalty: Penalty, times: usize) -> Confidence {
        (0..times).fold(self, |c, _| c.penalize(penalty))
    }

    pub fn is_high(self) -> bool {
        self.0 >= Self::HIGH
    }

    pub fn is_low(self) -> bool {
        self.0 < Self::LOW
    }

    /// Round to three decimals so serialized records are stable across platforms.
    pub fn rounded(self) -> f64 {
        (self.0 * 1000.0).round() / 1000.0
    }
}

impl Default for Confidence {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(c: Confidence) -> Self {
        c.0
    }
}

impl Mul<f64> for Confidence {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

/// OR-combine an iterator of confidences. Empty input yields [`Confidence::NONE`].
pub fn any_of<I: IntoIterator<Item = Confidence>>(values: I) -> Confidence {
    values.into_iter().fold(Confidence::NONE, Confidence::or)
}

/// AND-combine an iterator of confidences. Empty input yields [`Confidence::NONE`].
pub fn all_of<I: IntoIterator<Item = Confidence>>(values: I) -> Confidence {
    let mut iter = values.into_iter();
    match iter.next() {
        Some(first) => iter.fold(first, Confidence::and),
        None => Confidence::NONE,
    }
}

/// Named degradation factors. Each is a multiplier in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Penalty {
    /// Field copied forward from the previous turn's intent.
    Inherited(f64),
    /// An explicitly mentioned course code was not found in the index.
    MissingExplicitCode,
    /// A course referenced from the conversation was not found in the index.
    MissingReferencedCode,
    /// A value was snapped to the nearest decade band.
    AdjustedToDecade,
    /// Several plausible values competed for one slot.
    MultipleValues,
    /// The student's concentration stood in for a missing department.
    ConcentrationSubstitute,
    /// A recommendation constraint had to be relaxed.
    Relaxed,
    /// Candidates came from a fallback source.
    Fallback,
}

impl Penalty {
    pub fn factor(self) -> f64 {
        match self {
            Self::Inherited(factor) => factor.clamp(0.0, 1.0),
            Self::MissingExplicitCode => 0.9,
            Self::MissingReferencedCode => 0.8,
            Self::AdjustedToDecade => 0.8,
            Self::MultipleValues => 0.9,
            Self::ConcentrationSubstitute => 0.8,
            Self::Relaxed => 0.85,
            Self::Fallback => 0.7,
        }
    }
}
