//! Point-based recommendation score.
//!
//! Rating is worth up to 50 points, workload up to 30, a concentration match
//! 10, and semantic-aspect matches add small bonuses.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use syllabus_core::models::Difficulty;
use syllabus_core::{Course, QueryIntent, StudentProfile};

pub const RATING_POINTS_PER_STAR: f64 = 10.0;
pub const WORKLOAD_POINTS: f64 = 30.0;
pub const CONCENTRATION_POINTS: f64 = 10.0;
pub const DIFFICULTY_BONUS: f64 = 5.0;
pub const FORMAT_BONUS: f64 = 3.0;
pub const INTEREST_BONUS: f64 = 4.0;

/// Hours a neutral request is happiest with.
const NEUTRAL_PEAK_HOURS: f64 = 10.0;

#[derive(Debug, Clone)]
pub struct ScoredCourse {
    pub course: Course,
    pub score: f64,
}

/// Workload points: rises as hours fall for "easy", rises with hours for
/// "hard", peaks at ten hours otherwise.
pub fn workload_points(hours: f64, intent: &QueryIntent) -> f64 {
    let hours = hours.max(0.0);
    match (intent.prefers_easy(), intent.prefers_hard()) {
        (true, false) => (WORKLOAD_POINTS - hours).max(0.0),
        (false, true) => hours.min(WORKLOAD_POINTS),
        _ => (WORKLOAD_POINTS - (NEUTRAL_PEAK_HOURS - hours).abs() * 3.0).max(0.0),
    }
}

fn difficulty_matches(difficulty: Difficulty, hours: f64) -> bool {
    match difficulty {
        Difficulty::Easy => hours <= 8.0,
        Difficulty::Moderate => hours > 8.0 && hours < 15.0,
        Difficulty::Hard => hours >= 15.0,
    }
}

fn aspect_bonus(course: &Course, intent: &QueryIntent, interests: &[String]) -> f64 {
    let text = format!("{} {}", course.title, course.description).to_lowercase();
    let mut bonus = 0.0;

    if let (Some(difficulty), Some(hours)) = (intent.aspects.difficulty, course.mean_weekly_hours) {
        if difficulty_matches(difficulty, hours) {
            bonus += DIFFICULTY_BONUS;
        }
    }
    if let Some(format) = intent.aspects.format {
        if format.keywords().iter().any(|k| text.contains(k)) {
            bonus += FORMAT_BONUS;
        }
    }
    if interests.iter().any(|i| text.contains(i.as_str())) {
        bonus += INTEREST_BONUS;
    }
    bonus
}

/// Score, sort descending (stable) and drop repeated codes, keeping the
/// best-scored offering of each.
pub fn rank(
    candidates: Vec<Course>,
    intent: &QueryIntent,
    profile: &StudentProfile,
    concentration: &BTreeSet<String>,
) -> Vec<ScoredCourse> {
    let interests: Vec<String> = intent
        .interests()
        .map(str::to_string)
        .chain(profile.interests.iter().cloned())
        .map(|i| i.to_lowercase())
        .filter(|i| !i.is_empty())
        .collect();

    let mut scored: Vec<ScoredCourse> = candidates
        .into_iter()
        .map(|course| {
            let mut score = course
                .overall_rating
                .map(|r| r.clamp(0.0, 5.0) * RATING_POINTS_PER_STAR)
                .unwrap_or(0.0);
            if let Some(hours) = course.mean_weekly_hours {
                score += workload_points(hours, intent);
            }
            if concentration.contains(course.code_department()) {
                score += CONCENTRATION_POINTS;
            }
            score += aspect_bonus(&course, intent, &interests);
            ScoredCourse { course, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    let mut seen = HashSet::new();
    scored.retain(|s| seen.insert(s.course.code.clone()));
    scored
}
