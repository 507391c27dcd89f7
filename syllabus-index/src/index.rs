//! CourseIndex: the immutable course table and its lookup structures.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use syllabus_core::config::AliasConfig;
use syllabus_core::errors::IndexError;
use syllabus_core::models::Concentration;
use syllabus_core::Course;
use tracing::{debug, info, warn};

use crate::alias::AliasTable;
use crate::normalize::{normalize_code, parse_code, tokens};
use crate::record::CourseRecord;

/// Serialized catalog: rows plus the concentration table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub courses: Vec<CourseRecord>,
    pub concentrations: Vec<Concentration>,
}

/// Counters reported once at build time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub rows: usize,
    pub indexed: usize,
    pub skipped: usize,
    /// Indexed courses whose code has no numeric part, absent from level lookups.
    pub unleveled: usize,
}

/// Normalized course table with lookups by code, department level and term.
///
/// Built once; all lookups take `&self` and allocate only their result.
#[derive(Debug)]
pub struct CourseIndex {
    courses: Vec<Course>,
    by_id: HashMap<u64, usize>,
    /// Normalized code to every offering, in insertion order.
    by_code: HashMap<String, Vec<usize>>,
    /// Department code to number to offerings.
    by_level: HashMap<String, BTreeMap<u32, Vec<usize>>>,
    by_department: HashMap<String, Vec<usize>>,
    /// Lowercased term token to postings (ascending).
    term_tokens: HashMap<String, Vec<usize>>,
    aliases: AliasTable,
    concentrations: Vec<Concentration>,
    stats: BuildStats,
}

impl CourseIndex {
    /// Build from raw rows.
    ///
    /// Malformed rows and duplicate ids are skipped and logged. Fails only
    /// when no usable course remains.
    pub fn build(
        records: Vec<CourseRecord>,
        aliases: AliasConfig,
        concentrations: Vec<Concentration>,
    ) -> Result<Self, IndexError> {
        let rows = records.len();

        // Validation is independent per row; collect keeps row order.
        let converted: Vec<Result<Course, IndexError>> = records
            .into_par_iter()
            .enumerate()
            .map(|(row, record)| record.into_course(row))
            .collect();

        let mut index = Self {
            courses: Vec::with_capacity(rows),
            by_id: HashMap::with_capacity(rows),
            by_code: HashMap::new(),
            by_level: HashMap::new(),
            by_department: HashMap::new(),
            term_tokens: HashMap::new(),
            aliases: AliasTable::new(aliases),
            concentrations,
            stats: BuildStats {
                rows,
                ..Default::default()
            },
        };

        for (row, result) in converted.into_iter().enumerate() {
            match result {
                Ok(course) => {
                    if index.by_id.contains_key(&course.course_id) {
                        warn!(row, course_id = course.course_id, "duplicate course_id, row skipped");
                        index.stats.skipped += 1;
                        continue;
                    }
                    index.insert(course);
                }
                Err(e) => {
                    warn!(row, error = %e, "row skipped");
                    index.stats.skipped += 1;
                }
            }
        }

        index.stats.indexed = index.courses.len();
        if index.courses.is_empty() {
            return Err(IndexError::EmptyCatalog {
                rows,
                skipped: index.stats.skipped,
            });
        }

        info!(
            rows,
            indexed = index.stats.indexed,
            skipped = index.stats.skipped,
            unleveled = index.stats.unleveled,
            departments = index.by_department.len(),
            "course index built"
        );
        Ok(index)
    }

    /// Build from a deserialized [`Catalog`].
    pub fn from_catalog(catalog: Catalog, aliases: AliasConfig) -> Result<Self, IndexError> {
        Self::build(catalog.courses, aliases, catalog.concentrations)
    }

    /// Build from already-validated courses.
    pub fn from_courses(courses: Vec<Course>, aliases: AliasConfig) -> Result<Self, IndexError> {
        Self::build(
            courses.into_iter().map(CourseRecord::from).collect(),
            aliases,
            Vec::new(),
        )
    }

    fn insert(&mut self, course: Course) {
        let idx = self.courses.len();
        self.by_id.insert(course.course_id, idx);
        self.by_code.entry(course.code.clone()).or_default().push(idx);

        match parse_code(&course.code) {
            Some(parsed) => {
                self.aliases.observe(&parsed.department, &course.department);
                self.by_department
                    .entry(parsed.department.clone())
                    .or_default()
                    .push(idx);
                self.by_level
                    .entry(parsed.department)
                    .or_default()
                    .entry(parsed.number)
                    .or_default()
                    .push(idx);
            }
            None => {
                let dept = course.code_department().to_string();
                debug!(code = %course.code, "code has no number, excluded from level lookups");
                self.aliases.observe(&dept, &course.department);
                self.by_department.entry(dept).or_default().push(idx);
                self.stats.unleveled += 1;
            }
        }

        let mut seen = HashSet::new();
        for token in tokens(&course.term) {
            if seen.insert(token.clone()) {
                self.term_tokens.entry(token).or_default().push(idx);
            }
        }

        self.courses.push(course);
    }

    fn collect(&self, positions: impl IntoIterator<Item = usize>) -> Vec<&Course> {
        positions.into_iter().map(|i| &self.courses[i]).collect()
    }

    /// First offering of `code` after normalization (`"math  131"` finds `MATH 131`).
    pub fn by_code(&self, code: &str) -> Option<&Course> {
        let key = normalize_code(code)?;
        self.by_code
            .get(&key)
            .and_then(|v| v.first())
            .map(|&i| &self.courses[i])
    }

    /// Every offering of `code`, in insertion order.
    pub fn offerings(&self, code: &str) -> Vec<&Course> {
        normalize_code(code)
            .and_then(|key| self.by_code.get(&key))
            .map(|v| self.collect(v.iter().copied()))
            .unwrap_or_default()
    }

    pub fn by_id(&self, course_id: u64) -> Option<&Course> {
        self.by_id.get(&course_id).map(|&i| &self.courses[i])
    }

    /// Courses of `department` numbered within `[low, high]`, across all terms.
    /// Ordered by number, then insertion.
    pub fn by_level_range(&self, department: &str, low: u32, high: u32) -> Vec<&Course> {
        if low > high {
            return Vec::new();
        }
        let dept = department.trim().to_uppercase();
        match self.by_level.get(&dept) {
            Some(numbers) => self.collect(
                numbers
                    .range(low..=high)
                    .flat_map(|(_, v)| v.iter().copied()),
            ),
            None => Vec::new(),
        }
    }

    /// Courses whose stored term contains every token of `term`,
    /// case-insensitively. `"Fall"` matches `"Fall 2025"` and `"2025 Fall"`.
    pub fn by_term(&self, term: &str) -> Vec<&Course> {
        let mut wanted: Vec<String> = tokens(term).collect();
        wanted.sort();
        wanted.dedup();
        if wanted.is_empty() {
            return Vec::new();
        }

        let mut postings: Vec<&Vec<usize>> = Vec::with_capacity(wanted.len());
        for token in &wanted {
            match self.term_tokens.get(token) {
                Some(p) => postings.push(p),
                None => return Vec::new(),
            }
        }
        postings.sort_by_key(|p| p.len());

        let Some((first, rest)) = postings.split_first() else {
            return Vec::new();
        };
        let hits = first
            .iter()
            .copied()
            .filter(|i| rest.iter().all(|p| p.binary_search(i).is_ok()));
        self.collect(hits)
    }

    /// Every course of a department code, in insertion order.
    pub fn by_department(&self, department: &str) -> Vec<&Course> {
        self.by_department
            .get(&department.trim().to_uppercase())
            .map(|v| self.collect(v.iter().copied()))
            .unwrap_or_default()
    }

    /// Resolve a department or concentration name to codes present in the data.
    /// Interdisciplinary names may resolve to several codes.
    pub fn by_department_alias(&self, name: &str) -> BTreeSet<String> {
        self.aliases.resolve(name)
    }

    pub fn has_department(&self, code: &str) -> bool {
        self.aliases.present().contains(&code.trim().to_uppercase())
    }

    /// Department codes present in the data, sorted.
    pub fn departments(&self) -> &BTreeSet<String> {
        self.aliases.present()
    }

    /// Concentration entry by name, case-insensitively.
    pub fn concentration(&self, name: &str) -> Option<&Concentration> {
        let needle = name.trim();
        self.concentrations
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(needle))
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn stats(&self) -> BuildStats {
        self.stats
    }
}
