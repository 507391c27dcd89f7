//! Composite course score.
//!
//! `rating_weight · rating/5 + preference_weight · workload_fit`, plus a flat
//! concentration bonus and a flat bonus for courses without workload data.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use syllabus_core::config::RetrievalConfig;
use syllabus_core::{Course, QueryIntent};

#[derive(Debug, Clone)]
pub struct ScorerWeights {
    pub rating: f64,
    pub preference: f64,
    pub concentration_bonus: f64,
    pub missing_data_bonus: f64,
    pub saturation_hours: f64,
}

impl From<&RetrievalConfig> for ScorerWeights {
    fn from(config: &RetrievalConfig) -> Self {
        Self {
            rating: config.rating_weight,
            preference: config.preference_weight,
            concentration_bonus: config.concentration_bonus,
            missing_data_bonus: config.missing_data_bonus,
            saturation_hours: config.workload_saturation_hours,
        }
    }
}

impl Default for ScorerWeights {
    fn default() -> Self {
        Self::from(&RetrievalConfig::default())
    }
}

#[derive(Debug, Clone)]
pub struct ScoredCourse {
    pub course: Course,
    pub score: f64,
}

/// How well `hours` matches the requested workload direction, in `[0, 1]`.
/// No direction means no contribution.
pub fn workload_fit(hours: f64, intent: &QueryIntent, saturation: f64) -> f64 {
    let load = hours.clamp(0.0, saturation) / saturation;
    match (intent.prefers_easy(), intent.prefers_hard()) {
        (true, false) => 1.0 - load,
        (false, true) => load,
        _ => 0.0,
    }
}

/// Score and sort descending. The sort is stable.
pub fn score(
    candidates: Vec<Course>,
    intent: &QueryIntent,
    concentration_codes: &BTreeSet<String>,
    weights: &ScorerWeights,
) -> Vec<ScoredCourse> {
    let mut scored: Vec<ScoredCourse> = candidates
        .into_iter()
        .map(|course| {
            let f_rating = course
                .overall_rating
                .map(|r| r.clamp(0.0, 5.0) / 5.0)
                .unwrap_or(0.0);

            let f_workload = course
                .mean_weekly_hours
                .map(|h| workload_fit(h, intent, weights.saturation_hours))
                .unwrap_or(0.0);

            let mut score = weights.rating * f_rating + weights.preference * f_workload;
            if concentration_codes.contains(course.code_department()) {
                score += weights.concentration_bonus;
            }
            if course.mean_weekly_hours.is_none() {
                score += weights.missing_data_bonus;
            }
            ScoredCourse { course, score }
        })
        .collect();

    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored
}
