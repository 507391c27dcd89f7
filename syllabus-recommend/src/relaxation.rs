//! Fixed relaxation ladder, tried in order when no source yields candidates.

use std::fmt;

use syllabus_core::config::RecommendationConfig;
use syllabus_core::{LevelRange, QueryIntent};

/// The filters candidate sources apply. Terms are a soft filter and are
/// never relaxed.
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub levels: Vec<LevelRange>,
    pub max_hours: Option<f64>,
    pub min_score: Option<f64>,
    /// Off for the final unfiltered text fallback.
    pub apply: bool,
}

impl Filters {
    pub fn from_intent(intent: &QueryIntent) -> Self {
        Self {
            levels: intent.level_ranges.clone(),
            max_hours: intent.constraints.max_hours,
            min_score: intent.constraints.min_score,
            apply: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relaxation {
    LoosenHours,
    LoosenScore,
    DropConstraints,
    WidenLevels,
    UnfilteredText,
}

impl Relaxation {
    pub const LADDER: [Relaxation; 5] = [
        Self::LoosenHours,
        Self::LoosenScore,
        Self::DropConstraints,
        Self::WidenLevels,
        Self::UnfilteredText,
    ];

    /// Relaxed filters, or `None` when the step would change nothing.
    pub fn apply(self, filters: &Filters, config: &RecommendationConfig) -> Option<Filters> {
        let mut next = filters.clone();
        match self {
            Self::LoosenHours => {
                next.max_hours = Some(filters.max_hours? * config.relax_hours_factor);
            }
            Self::LoosenScore => {
                let loosened = (filters.min_score? * config.relax_score_factor)
                    .max(config.relax_score_floor);
                if Some(loosened) >= filters.min_score {
                    return None;
                }
                next.min_score = Some(loosened);
            }
            Self::DropConstraints => {
                if filters.max_hours.is_none() && filters.min_score.is_none() {
                    return None;
                }
                next.max_hours = None;
                next.min_score = None;
            }
            Self::WidenLevels => {
                if filters.levels.is_empty() {
                    return None;
                }
                next.levels = filters.levels.iter().map(LevelRange::widened).collect();
            }
            Self::UnfilteredText => {
                next.apply = false;
            }
        }
        Some(next)
    }
}

impl fmt::Display for Relaxation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LoosenHours => "loosened the workload limit",
            Self::LoosenScore => "lowered the minimum rating",
            Self::DropConstraints => "dropped workload and rating limits",
            Self::WidenLevels => "widened the course levels by a decade",
            Self::UnfilteredText => "searched course text without filters",
        })
    }
}
