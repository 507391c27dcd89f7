//! Candidate sources, tried in priority order until one yields courses.

use std::cell::OnceCell;
use std::collections::{BTreeSet, HashSet};
use std::fmt;

use syllabus_core::{Confidence, Course, IntentField, LevelRange, Penalty, QueryIntent, StudentProfile};
use syllabus_index::{parse_code, CourseIndex};
use tracing::debug;

use crate::relaxation::Filters;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSource {
    /// Stated departments, across the stated levels or all levels.
    Department,
    /// Stated levels inside the student's concentration.
    Concentration,
    /// Lexical and semantic rankings of the query text.
    Text,
    /// Next level up in the concentration, or its introductory courses.
    Profile,
}

impl fmt::Display for CandidateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Department => "department",
            Self::Concentration => "concentration",
            Self::Text => "text",
            Self::Profile => "profile",
        })
    }
}

#[derive(Debug, Clone)]
pub struct Candidates {
    pub courses: Vec<Course>,
    pub source: CandidateSource,
    pub confidence: Confidence,
}

/// Normalized codes from the profile's taken list.
pub fn taken_codes(profile: &StudentProfile) -> BTreeSet<String> {
    profile
        .courses_taken
        .iter()
        .filter_map(|c| syllabus_index::normalize_code(c))
        .collect()
}

/// Department codes the student's concentration spans.
pub fn concentration_codes(index: &CourseIndex, profile: &StudentProfile) -> BTreeSet<String> {
    profile
        .concentration
        .as_deref()
        .map(|c| index.by_department_alias(c))
        .unwrap_or_default()
}

/// Shared state for one recommendation pass.
pub struct CandidateGenerator<'a> {
    pub index: &'a CourseIndex,
    pub intent: &'a QueryIntent,
    pub taken: &'a BTreeSet<String>,
    pub concentration: &'a BTreeSet<String>,
    /// Text rankings, fetched at most once per pass.
    text: OnceCell<Vec<Course>>,
    fetch_text: Box<dyn Fn() -> Vec<Course> + 'a>,
}

impl<'a> CandidateGenerator<'a> {
    pub fn new(
        index: &'a CourseIndex,
        intent: &'a QueryIntent,
        taken: &'a BTreeSet<String>,
        concentration: &'a BTreeSet<String>,
        fetch_text: impl Fn() -> Vec<Course> + 'a,
    ) -> Self {
        Self {
            index,
            intent,
            taken,
            concentration,
            text: OnceCell::new(),
            fetch_text: Box::new(fetch_text),
        }
    }

    fn text(&self) -> &[Course] {
        self.text.get_or_init(|| (self.fetch_text)())
    }

    /// First source whose filtered courses are non-empty.
    pub fn generate(&self, filters: &Filters) -> Option<Candidates> {
        if !filters.apply {
            let courses = self.exclude_taken(self.text().iter());
            return (!courses.is_empty()).then(|| Candidates {
                courses,
                source: CandidateSource::Text,
                confidence: self.text_confidence(),
            });
        }

        let sources = [
            CandidateSource::Department,
            CandidateSource::Concentration,
            CandidateSource::Text,
            CandidateSource::Profile,
        ];
        sources.into_iter().find_map(|source| {
            let (raw, confidence) = self.lookup(source, filters)?;
            let courses = self.filter(raw, filters);
            debug!(%source, candidates = courses.len(), "candidate source tried");
            (!courses.is_empty()).then_some(Candidates {
                courses,
                source,
                confidence,
            })
        })
    }

    fn lookup(&self, source: CandidateSource, filters: &Filters) -> Option<(Vec<&Course>, Confidence)> {
        let intent = self.intent;
        let departments = intent.confidence_of(IntentField::Departments);
        let levels = intent.confidence_of(IntentField::LevelRanges);
        match source {
            CandidateSource::Department => {
                if intent.departments.is_empty() {
                    return None;
                }
                if filters.levels.is_empty() {
                    let courses = intent
                        .departments
                        .iter()
                        .flat_map(|d| self.index.by_department(d))
                        .collect();
                    Some((courses, departments))
                } else {
                    let courses = self.in_ranges(intent.departments.iter(), &filters.levels);
                    Some((courses, departments.and(levels)))
                }
            }
            CandidateSource::Concentration => {
                if !intent.departments.is_empty()
                    || filters.levels.is_empty()
                    || self.concentration.is_empty()
                {
                    return None;
                }
                let courses = self.in_ranges(self.concentration.iter(), &filters.levels);
                Some((courses, levels.penalize(Penalty::ConcentrationSubstitute)))
            }
            CandidateSource::Text => {
                let text = self.text();
                if text.is_empty() {
                    return None;
                }
                Some((text.iter().collect(), self.text_confidence()))
            }
            CandidateSource::Profile => {
                if self.concentration.is_empty() {
                    return None;
                }
                let band = self.next_band();
                let courses = self.in_ranges(self.concentration.iter(), &[band]);
                let confidence = Confidence::FULL
                    .penalize(Penalty::Fallback)
                    .penalize(Penalty::Fallback);
                Some((courses, confidence))
            }
        }
    }

    fn text_confidence(&self) -> Confidence {
        self.intent
            .confidence_of(IntentField::Intent)
            .penalize(Penalty::Fallback)
    }

    fn in_ranges<'d>(
        &self,
        departments: impl Iterator<Item = &'d String>,
        ranges: &[LevelRange],
    ) -> Vec<&'a Course> {
        departments
            .flat_map(|d| {
                ranges
                    .iter()
                    .flat_map(move |r| self.index.by_level_range(d, r.low, r.high))
            })
            .collect()
    }

    /// One decade past the highest taken course in the concentration, spanning
    /// a hundred numbers; `0-99` when nothing there was taken.
    fn next_band(&self) -> LevelRange {
        let highest = self
            .taken
            .iter()
            .filter_map(|code| parse_code(code))
            .filter(|p| self.concentration.contains(&p.department))
            .map(|p| p.number)
            .max();
        match highest {
            Some(n) => {
                let next = (n / 10 + 1) * 10;
                LevelRange::new(next, next + 99)
            }
            None => LevelRange::new(0, 99),
        }
    }

    fn exclude_taken<'c>(&self, courses: impl Iterator<Item = &'c Course>) -> Vec<Course> {
        let mut seen = HashSet::new();
        courses
            .filter(|c| !self.taken.contains(&c.code))
            .filter(|c| seen.insert(c.course_id))
            .cloned()
            .collect()
    }

    /// Hard filters on workload and rating (missing data passes), then a soft
    /// term filter that is dropped when it would remove everything.
    fn filter(&self, raw: Vec<&Course>, filters: &Filters) -> Vec<Course> {
        let kept: Vec<Course> = self.exclude_taken(raw.into_iter().filter(|c| {
            let hours_ok = match (filters.max_hours, c.mean_weekly_hours) {
                (Some(max), Some(h)) => h <= max,
                _ => true,
            };
            let score_ok = match (filters.min_score, c.overall_rating) {
                (Some(min), Some(r)) => r >= min,
                _ => true,
            };
            hours_ok && score_ok
        }));

        let terms = &self.intent.terms;
        if terms.is_empty() {
            return kept;
        }
        let in_term: Vec<Course> = kept
            .iter()
            .filter(|c| terms.iter().any(|t| c.matches_term(t)))
            .cloned()
            .collect();
        if in_term.is_empty() {
            kept
        } else {
            in_term
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::config::AliasConfig;

    fn course(id: u64, code: &str, term: &str, hours: Option<f64>) -> Course {
        Course {
            course_id: id,
            code: code.into(),
            department: String::new(),
            title: String::new(),
            term: term.into(),
            instructors: Vec::new(),
            description: String::new(),
            requirements_text: String::new(),
            mean_weekly_hours: hours,
            overall_rating: Some(4.0),
            student_comments: Vec::new(),
        }
    }

    fn index() -> CourseIndex {
        CourseIndex::from_courses(
            vec![
                course(1, "MATH 21A", "Fall 2025", Some(9.0)),
                course(2, "MATH 131", "Fall 2025", Some(11.0)),
                course(3, "MATH 137", "Spring 2026", Some(12.0)),
                course(4, "MATH 154", "Fall 2025", None),
                course(5, "STAT 110", "Fall 2025", Some(12.0)),
            ],
            AliasConfig::default(),
        )
        .unwrap()
    }

    fn codes(c: &Candidates) -> Vec<&str> {
        c.courses.iter().map(|c| c.code.as_str()).collect()
    }

    #[test]
    fn department_source_applies_hard_filters() {
        let index = index();
        let mut intent = QueryIntent::new("math");
        intent.departments.insert("MATH".into());
        intent.constraints.max_hours = Some(10.0);
        let (taken, conc) = (BTreeSet::new(), BTreeSet::new());
        let gen = CandidateGenerator::new(&index, &intent, &taken, &conc, Vec::new);
        let c = gen.generate(&Filters::from_intent(&intent)).unwrap();
        assert_eq!(c.source, CandidateSource::Department);
        assert_eq!(codes(&c), vec!["MATH 21A", "MATH 154"]);
    }

    #[test]
    fn term_filter_is_soft() {
        let index = index();
        let mut intent = QueryIntent::new("stat in the spring");
        intent.departments.insert("STAT".into());
        intent.terms.insert("Spring".into());
        let (taken, conc) = (BTreeSet::new(), BTreeSet::new());
        let gen = CandidateGenerator::new(&index, &intent, &taken, &conc, Vec::new);
        let c = gen.generate(&Filters::from_intent(&intent)).unwrap();
        assert_eq!(codes(&c), vec!["STAT 110"]);
    }

    #[test]
    fn profile_source_moves_up_a_decade() {
        let index = index();
        let intent = QueryIntent::new("what should I take");
        let taken: BTreeSet<String> = ["MATH 112".to_string()].into();
        let conc: BTreeSet<String> = ["MATH".to_string()].into();
        let gen = CandidateGenerator::new(&index, &intent, &taken, &conc, Vec::new);
        let c = gen.generate(&Filters::from_intent(&intent)).unwrap();
        assert_eq!(c.source, CandidateSource::Profile);
        assert_eq!(codes(&c), vec!["MATH 131", "MATH 137", "MATH 154"]);
    }

    #[test]
    fn profile_source_starts_introductory() {
        let index = index();
        let intent = QueryIntent::new("what should I take");
        let taken = BTreeSet::new();
        let conc: BTreeSet<String> = ["MATH".to_string()].into();
        let gen = CandidateGenerator::new(&index, &intent, &taken, &conc, Vec::new);
        let c = gen.generate(&Filters::from_intent(&intent)).unwrap();
        assert_eq!(codes(&c), vec!["MATH 21A"]);
    }

    #[test]
    fn taken_courses_never_survive() {
        let index = index();
        let mut intent = QueryIntent::new("stat");
        intent.departments.insert("STAT".into());
        let taken: BTreeSet<String> = ["STAT 110".to_string()].into();
        let conc = BTreeSet::new();
        let gen = CandidateGenerator::new(&index, &intent, &taken, &conc, Vec::new);
        assert!(gen.generate(&Filters::from_intent(&intent)).is_none());
    }

    #[test]
    fn text_is_fetched_once() {
        let index = index();
        let intent = QueryIntent::new("topology");
        let (taken, conc) = (BTreeSet::new(), BTreeSet::new());
        let calls = std::cell::Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            vec![course(2, "MATH 131", "Fall 2025", Some(11.0))]
        };
        let gen = CandidateGenerator::new(&index, &intent, &taken, &conc, fetch);
        let filters = Filters::from_intent(&intent);
        assert_eq!(gen.generate(&filters).unwrap().source, CandidateSource::Text);
        gen.generate(&filters);
        assert_eq!(calls.get(), 1);
    }
}
