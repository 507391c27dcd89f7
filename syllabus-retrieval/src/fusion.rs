//! Precedence fusion of strategy buckets.
//!
//! The first non-empty source in the order explicit > structured > text >
//! level > term seeds the working set, where "text" is the lexical and
//! semantic lists merged with Reciprocal Rank Fusion. Explicit results are
//! always unioned in first. Sources are never merged otherwise.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use syllabus_core::{Bucket, Course};

/// Where the working set came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Seed {
    Bucket(Bucket),
    /// Lexical and semantic lists merged with RRF.
    Text,
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bucket(b) => write!(f, "{b}"),
            Self::Text => f.write_str("lexical+semantic"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fusion {
    /// Deduplicated candidates in seed order, explicit first.
    pub candidates: Vec<Course>,
    pub seed: Option<Seed>,
}

/// Reciprocal Rank Fusion: `score = Σ 1/(k + rank)` with 1-based ranks.
///
/// Courses are keyed by `course_id`. Equal scores keep first-appearance
/// order, so the output is deterministic.
pub fn rrf(lists: &[&[Course]], k: u32) -> Vec<Course> {
    let mut order: Vec<&Course> = Vec::new();
    let mut scores: HashMap<u64, f64> = HashMap::new();

    for list in lists {
        for (i, course) in list.iter().enumerate() {
            let contribution = 1.0 / (f64::from(k) + (i + 1) as f64);
            let entry = scores.entry(course.course_id).or_insert_with(|| {
                order.push(course);
                0.0
            });
            *entry += contribution;
        }
    }

    let mut fused: Vec<(&Course, f64)> = order
        .into_iter()
        .map(|c| (c, scores.get(&c.course_id).copied().unwrap_or(0.0)))
        .collect();
    fused.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    fused.into_iter().map(|(c, _)| c.clone()).collect()
}

fn bucket<'a>(buckets: &'a BTreeMap<Bucket, Vec<Course>>, b: Bucket) -> &'a [Course] {
    buckets.get(&b).map(Vec::as_slice).unwrap_or(&[])
}

pub fn fuse(buckets: &BTreeMap<Bucket, Vec<Course>>, rrf_k: u32) -> Fusion {
    let explicit = bucket(buckets, Bucket::Explicit);
    let text = rrf(
        &[bucket(buckets, Bucket::Lexical), bucket(buckets, Bucket::Semantic)],
        rrf_k,
    );

    let sources: [(Seed, &[Course]); 5] = [
        (Seed::Bucket(Bucket::Explicit), explicit),
        (Seed::Bucket(Bucket::Structured), bucket(buckets, Bucket::Structured)),
        (Seed::Text, text.as_slice()),
        (Seed::Bucket(Bucket::Level), bucket(buckets, Bucket::Level)),
        (Seed::Bucket(Bucket::Term), bucket(buckets, Bucket::Term)),
    ];
    let seeded = sources.into_iter().find(|(_, courses)| !courses.is_empty());

    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    let seed_courses: &[Course] = seeded.map(|(_, c)| c).unwrap_or(&[]);
    for course in explicit.iter().chain(seed_courses) {
        if seen.insert(course.course_id) {
            candidates.push(course.clone());
        }
    }

    Fusion {
        candidates,
        seed: seeded.map(|(s, _)| s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: u64) -> Course {
        Course {
            course_id: id,
            code: format!("MATH {id}"),
            department: "Mathematics".into(),
            title: String::new(),
            term: "Fall 2025".into(),
            instructors: Vec::new(),
            description: String::new(),
            requirements_text: String::new(),
            mean_weekly_hours: None,
            overall_rating: None,
            student_comments: Vec::new(),
        }
    }

    fn ids(courses: &[Course]) -> Vec<u64> {
        courses.iter().map(|c| c.course_id).collect()
    }

    #[test]
    fn rrf_rewards_agreement() {
        let lexical = vec![course(1), course(2), course(3)];
        let semantic = vec![course(3), course(4)];
        assert_eq!(ids(&rrf(&[&lexical, &semantic], 60)), vec![3, 1, 2, 4]);
    }

    #[test]
    fn rrf_ties_keep_first_appearance() {
        let a = vec![course(1)];
        let b = vec![course(2)];
        assert_eq!(ids(&rrf(&[&a, &b], 60)), vec![1, 2]);
    }

    #[test]
    fn structured_beats_text_and_level() {
        let mut buckets = BTreeMap::new();
        buckets.insert(Bucket::Structured, vec![course(5)]);
        buckets.insert(Bucket::Lexical, vec![course(6)]);
        buckets.insert(Bucket::Level, vec![course(5), course(7)]);
        let f = fuse(&buckets, 60);
        assert_eq!(f.seed, Some(Seed::Bucket(Bucket::Structured)));
        assert_eq!(ids(&f.candidates), vec![5]);
    }

    #[test]
    fn explicit_seeds_when_present() {
        let mut buckets = BTreeMap::new();
        buckets.insert(Bucket::Explicit, vec![course(1), course(2)]);
        buckets.insert(Bucket::Structured, vec![course(3)]);
        let f = fuse(&buckets, 60);
        assert_eq!(f.seed, Some(Seed::Bucket(Bucket::Explicit)));
        assert_eq!(ids(&f.candidates), vec![1, 2]);
    }

    #[test]
    fn falls_through_to_term() {
        let mut buckets = BTreeMap::new();
        buckets.insert(Bucket::Structured, Vec::new());
        buckets.insert(Bucket::Term, vec![course(9), course(9)]);
        let f = fuse(&buckets, 60);
        assert_eq!(f.seed, Some(Seed::Bucket(Bucket::Term)));
        assert_eq!(ids(&f.candidates), vec![9]);
    }

    #[test]
    fn nothing_anywhere() {
        let f = fuse(&BTreeMap::new(), 60);
        assert_eq!(f.seed, None);
        assert!(f.candidates.is_empty());
    }
}
