use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Student profile supplied by the caller. Read-only to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudentProfile {
    pub concentration: Option<String>,
    pub year: Option<String>,
    /// Course codes as the student entered them; normalized at use.
    pub courses_taken: BTreeSet<String>,
    pub interests: BTreeSet<String>,
}

impl StudentProfile {
    pub fn with_concentration(mut self, concentration: impl Into<String>) -> Self {
        self.concentration = Some(concentration.into());
        self
    }

    pub fn with_taken<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.courses_taken.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests.extend(interests.into_iter().map(Into::into));
        self
    }
}
