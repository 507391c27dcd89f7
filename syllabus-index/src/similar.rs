//! Reference similarity provider: same department, nearby numbers, best rated first.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use syllabus_core::errors::BackendError;
use syllabus_core::traits::ISimilarCourses;
use syllabus_core::{Course, LevelRange};

use crate::index::CourseIndex;
use crate::normalize::{normalize_code, parse_code};

/// Neighbors from the same decade band, then the same hundred band.
pub struct SameLevelSimilarity {
    index: Arc<CourseIndex>,
}

impl SameLevelSimilarity {
    pub fn new(index: Arc<CourseIndex>) -> Self {
        Self { index }
    }
}

fn by_rating_desc(a: &&Course, b: &&Course) -> Ordering {
    match (a.overall_rating, b.overall_rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl ISimilarCourses for SameLevelSimilarity {
    fn similar_to(&self, code: &str, top_k: usize) -> Result<Vec<Course>, BackendError> {
        let Some(code) = normalize_code(code) else {
            return Ok(Vec::new());
        };
        let Some(parsed) = parse_code(&code) else {
            return Ok(Vec::new());
        };

        let decade = LevelRange::decade_of(parsed.number);
        let hundred_base = (parsed.number / 100) * 100;
        let bands = [decade, LevelRange::new(hundred_base, hundred_base + 99)];

        let mut seen: HashSet<&str> = HashSet::from([code.as_str()]);
        let mut out: Vec<Course> = Vec::new();
        for band in bands {
            let mut pool = self
                .index
                .by_level_range(&parsed.department, band.low, band.high);
            pool.sort_by(by_rating_desc);
            for course in pool {
                if out.len() >= top_k {
                    return Ok(out);
                }
                if seen.insert(course.code.as_str()) {
                    out.push(course.clone());
                }
            }
        }
        Ok(out)
    }

    fn name(&self) -> &str {
        "same-level"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::config::AliasConfig;

    fn course(id: u64, code: &str, rating: Option<f64>) -> Course {
        Course {
            course_id: id,
            code: code.into(),
            department: "MATH".into(),
            title: code.into(),
            term: "Fall 2025".into(),
            instructors: vec![],
            description: String::new(),
            requirements_text: String::new(),
            mean_weekly_hours: None,
            overall_rating: rating,
            student_comments: vec![],
        }
    }

    fn provider() -> SameLevelSimilarity {
        let index = CourseIndex::from_courses(
            vec![
                course(1, "MATH 131", Some(4.2)),
                course(2, "MATH 132", Some(4.0)),
                course(3, "MATH 137", Some(4.4)),
                course(4, "MATH 112", Some(4.1)),
                course(5, "MATH 136", None),
                course(6, "MATH 21A", Some(3.7)),
            ],
            AliasConfig::default(),
        )
        .unwrap();
        SameLevelSimilarity::new(Arc::new(index))
    }

    #[test]
    fn same_decade_first_best_rated() {
        let codes: Vec<String> = provider()
            .similar_to("math 131", 3)
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert_eq!(codes, vec!["MATH 137", "MATH 132", "MATH 136"]);
    }

    #[test]
    fn falls_back_to_hundred_band() {
        let codes: Vec<String> = provider()
            .similar_to("MATH 131", 10)
            .unwrap()
            .into_iter()
            .map(|c| c.code)
            .collect();
        assert!(codes.contains(&"MATH 112".to_string()));
        assert!(!codes.contains(&"MATH 131".to_string()));
        assert!(!codes.contains(&"MATH 21A".to_string()));
    }

    #[test]
    fn unknown_code_is_empty() {
        assert!(provider().similar_to("FRSEMR", 3).unwrap().is_empty());
    }
}
