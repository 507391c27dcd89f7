//! Reference lexical ranker: weighted token overlap over course text.
//!
//! Stands in for a BM25 service. Code and title hits weigh more than
//! description hits so that `"COMPSCI 181"` or `"machine learning"` lead.

use std::collections::HashSet;
use std::sync::Arc;

use syllabus_core::errors::BackendError;
use syllabus_core::traits::ILexicalRanker;
use syllabus_core::Course;

use crate::index::CourseIndex;
use crate::normalize::tokens;

const CODE_WEIGHT: f64 = 4.0;
const TITLE_WEIGHT: f64 = 3.0;
const DEPARTMENT_WEIGHT: f64 = 2.0;
const DESCRIPTION_WEIGHT: f64 = 1.0;

const STOPWORDS: &[&str] = &[
    "a", "an", "and", "are", "about", "any", "can", "class", "classes", "course", "courses",
    "do", "for", "good", "i", "in", "is", "it", "me", "of", "on", "or", "some", "something",
    "take", "that", "the", "to", "what", "which", "with", "you",
];

/// Token-overlap ranker over a shared [`CourseIndex`].
pub struct KeywordRanker {
    index: Arc<CourseIndex>,
}

impl KeywordRanker {
    pub fn new(index: Arc<CourseIndex>) -> Self {
        Self { index }
    }

    fn score(course: &Course, query: &HashSet<String>) -> f64 {
        let field = |text: &str, weight: f64| -> f64 {
            let present: HashSet<String> = tokens(text).collect();
            query.iter().filter(|t| present.contains(*t)).count() as f64 * weight
        };
        field(&course.code, CODE_WEIGHT)
            + field(&course.title, TITLE_WEIGHT)
            + field(&course.department, DEPARTMENT_WEIGHT)
            + field(&course.description, DESCRIPTION_WEIGHT)
    }
}

impl ILexicalRanker for KeywordRanker {
    fn rank(&self, query: &str, top_k: usize) -> Result<Vec<Course>, BackendError> {
        let terms: HashSet<String> = tokens(query)
            .filter(|t| !STOPWORDS.contains(&t.as_str()))
            .collect();
        if terms.is_empty() || top_k == 0 {
            return Ok(Vec::new());
        }

        let mut scored: Vec<(f64, &Course)> = self
            .index
            .courses()
            .iter()
            .map(|c| (Self::score(c, &terms), c))
            .filter(|(s, _)| *s > 0.0)
            .collect();

        // Stable: equal scores keep catalog order.
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        Ok(scored
            .into_iter()
            .take(top_k)
            .map(|(_, c)| c.clone())
            .collect())
    }

    fn name(&self) -> &str {
        "keyword"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_core::config::AliasConfig;

    fn course(id: u64, code: &str, title: &str, description: &str) -> Course {
        Course {
            course_id: id,
            code: code.into(),
            department: code.split(' ').next().unwrap_or_default().into(),
            title: title.into(),
            term: "Fall 2025".into(),
            instructors: vec![],
            description: description.into(),
            requirements_text: String::new(),
            mean_weekly_hours: None,
            overall_rating: None,
            student_comments: vec![],
        }
    }

    fn ranker() -> KeywordRanker {
        let index = CourseIndex::from_courses(
            vec![
                course(1, "COMPSCI 181", "Machine Learning", "neural networks and learning"),
                course(2, "STAT 110", "Probability", "random variables"),
                course(3, "COMPSCI 182", "Artificial Intelligence", "search and learning"),
            ],
            AliasConfig::default(),
        )
        .unwrap();
        KeywordRanker::new(Arc::new(index))
    }

    #[test]
    fn title_hit_outranks_description_hit() {
        let ranked = ranker().rank("machine learning", 10).unwrap();
        assert_eq!(ranked[0].course_id, 1);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn stopword_only_query_is_empty() {
        assert!(ranker().rank("what is a good course", 10).unwrap().is_empty());
    }

    #[test]
    fn respects_top_k() {
        assert_eq!(ranker().rank("learning", 1).unwrap().len(), 1);
    }
}
