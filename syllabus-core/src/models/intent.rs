use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::confidence::Confidence;
use crate::constants::{INTEREST_PREFIX, PREF_EASY, PREF_HARD, SCHEMA_VERSION};

/// What the student is trying to do in this turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentKind {
    Recommendation,
    CourseInfo,
    Requirements,
    Comparison,
    SchedulePlanning,
    General,
}

impl IntentKind {
    /// All variants for iteration, in classification order.
    pub const ALL: [IntentKind; 6] = [
        Self::Recommendation,
        Self::CourseInfo,
        Self::Requirements,
        Self::Comparison,
        Self::SchedulePlanning,
        Self::General,
    ];

    /// Tie-break rank: higher wins when two kinds score the same.
    pub fn specificity(self) -> u8 {
        match self {
            Self::Comparison => 5,
            Self::CourseInfo => 4,
            Self::Requirements => 3,
            Self::SchedulePlanning => 2,
            Self::Recommendation => 1,
            Self::General => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recommendation => "recommendation",
            Self::CourseInfo => "course_info",
            Self::Requirements => "requirements",
            Self::Comparison => "comparison",
            Self::SchedulePlanning => "schedule_planning",
            Self::General => "general",
        }
    }
}

impl fmt::Display for IntentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys of the per-field confidence map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentField {
    Intent,
    IsFollowup,
    Departments,
    LevelRanges,
    CourseCodes,
    Terms,
    Constraints,
    Preferences,
    ReferencedCodes,
}

impl IntentField {
    pub const ALL: [IntentField; 9] = [
        Self::Intent,
        Self::IsFollowup,
        Self::Departments,
        Self::LevelRanges,
        Self::CourseCodes,
        Self::Terms,
        Self::Constraints,
        Self::Preferences,
        Self::ReferencedCodes,
    ];
}

/// Inclusive course-number band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LevelRange {
    pub low: u32,
    pub high: u32,
}

impl LevelRange {
    /// Build a range, swapping the bounds if given in reverse.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// The decade band containing `n` (`136` → `130–139`).
    pub fn decade_of(n: u32) -> Self {
        let base = (n / 10) * 10;
        Self::new(base, base + 9)
    }

    /// The hundred band starting at `n` (`100` → `100–199`).
    pub fn hundreds_from(n: u32) -> Self {
        Self::new(n, n + 99)
    }

    pub fn contains(&self, n: u32) -> bool {
        self.low <= n && n <= self.high
    }

    /// Widen by one decade on each side, flooring at zero.
    pub fn widened(&self) -> Self {
        Self::new(self.low.saturating_sub(10), self.high + 10)
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.low == self.high {
            write!(f, "{}", self.low)
        } else {
            write!(f, "{}-{}", self.low, self.high)
        }
    }
}

/// Numeric constraints on workload and rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Constraints {
    pub max_hours: Option<f64>,
    pub min_score: Option<f64>,
}

impl Constraints {
    pub fn is_empty(&self) -> bool {
        self.max_hours.is_none() && self.min_score.is_none()
    }
}

/// Caveats an interpretation attaches to itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reflection {
    pub missing: Vec<String>,
    pub ambiguous: Vec<String>,
    pub needs_verification: Vec<String>,
}

impl Reflection {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.ambiguous.is_empty() && self.needs_verification.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Moderate,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestLevel {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relevance {
    Career,
    Personal,
    Degree,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    Lecture,
    Seminar,
    Project,
}

impl Format {
    /// Description keywords that signal this format.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Lecture => &["lecture", "lectures"],
            Self::Seminar => &["seminar", "discussion", "discussions"],
            Self::Project => &["project", "projects", "lab", "labs", "hands-on"],
        }
    }
}

/// Softer signals about what kind of course would satisfy the student.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SemanticAspects {
    pub difficulty: Option<Difficulty>,
    pub interest_level: Option<InterestLevel>,
    pub relevance: Option<Relevance>,
    pub format: Option<Format>,
}

/// Structured interpretation of one user turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryIntent {
    pub schema_version: u32,
    pub raw_text: String,
    pub intent_kind: IntentKind,
    pub departments: BTreeSet<String>,
    pub level_ranges: Vec<LevelRange>,
    pub course_codes: BTreeSet<String>,
    pub terms: BTreeSet<String>,
    pub constraints: Constraints,
    pub preferences: BTreeSet<String>,
    pub is_followup: bool,
    pub referenced_codes: BTreeSet<String>,
    pub confidence: BTreeMap<IntentField, f64>,
    pub reflection: Reflection,
    #[serde(default)]
    pub aspects: SemanticAspects,
    #[serde(default)]
    pub implicit_preferences: BTreeSet<String>,
}

impl QueryIntent {
    /// An empty `general` intent for `raw_text`, every field at zero confidence.
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            raw_text: raw_text.into(),
            intent_kind: IntentKind::General,
            departments: BTreeSet::new(),
            level_ranges: Vec::new(),
            course_codes: BTreeSet::new(),
            terms: BTreeSet::new(),
            constraints: Constraints::default(),
            preferences: BTreeSet::new(),
            is_followup: false,
            referenced_codes: BTreeSet::new(),
            confidence: IntentField::ALL.iter().map(|f| (*f, 0.0)).collect(),
            reflection: Reflection::default(),
            aspects: SemanticAspects::default(),
            implicit_preferences: BTreeSet::new(),
        }
    }

    /// Confidence recorded for `field` (zero when absent).
    pub fn confidence_of(&self, field: IntentField) -> Confidence {
        Confidence::new(self.confidence.get(&field).copied().unwrap_or(0.0))
    }

    pub fn set_confidence(&mut self, field: IntentField, value: Confidence) {
        self.confidence.insert(field, value.rounded());
    }

    pub fn prefers_easy(&self) -> bool {
        self.preferences.contains(PREF_EASY)
    }

    pub fn prefers_hard(&self) -> bool {
        self.preferences.contains(PREF_HARD)
    }

    /// Subjects from `interest:` preferences.
    pub fn interests(&self) -> impl Iterator<Item = &str> {
        self.preferences
            .iter()
            .filter_map(|p| p.strip_prefix(INTEREST_PREFIX))
    }

    /// Whether the field holds at least one value.
    pub fn is_populated(&self, field: IntentField) -> bool {
        match field {
            IntentField::Intent | IntentField::IsFollowup => true,
            IntentField::Departments => !self.departments.is_empty(),
            IntentField::LevelRanges => !self.level_ranges.is_empty(),
            IntentField::CourseCodes => !self.course_codes.is_empty(),
            IntentField::Terms => !self.terms.is_empty(),
            IntentField::Constraints => !self.constraints.is_empty(),
            IntentField::Preferences => !self.preferences.is_empty(),
            IntentField::ReferencedCodes => !self.referenced_codes.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decade_and_hundreds() {
        assert_eq!(LevelRange::decade_of(136), LevelRange::new(130, 139));
        assert_eq!(LevelRange::hundreds_from(100), LevelRange::new(100, 199));
        assert_eq!(LevelRange::new(139, 130), LevelRange::new(130, 139));
    }

    #[test]
    fn widened_floors_at_zero() {
        assert_eq!(LevelRange::new(5, 9).widened(), LevelRange::new(0, 19));
    }

    #[test]
    fn new_intent_has_entry_for_every_field() {
        let intent = QueryIntent::new("hello");
        for field in IntentField::ALL {
            assert!(intent.confidence.contains_key(&field));
        }
    }

    #[test]
    fn intent_round_trips_through_json() {
        let mut intent = QueryIntent::new("easy math");
        intent.departments.insert("MATH".into());
        intent.set_confidence(IntentField::Departments, Confidence::new(0.9));
        let json = serde_json::to_string(&intent).unwrap();
        let back: QueryIntent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, intent);
    }
}
