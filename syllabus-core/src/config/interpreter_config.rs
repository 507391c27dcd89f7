use serde::{Deserialize, Serialize};

use super::defaults;

/// QueryInterpreter policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// `max_hours` implied by "easy"/"chill"/"manageable" with no explicit number.
    pub easy_max_hours: f64,
    /// `min_score` implied by "well-rated"/"popular" with no explicit number.
    pub well_rated_min_score: f64,
    /// Multiplier applied to fields copied from the previous turn.
    pub inheritance_penalty: f64,
    /// Confidence of the `general` fallback when no cue fires.
    pub default_intent_confidence: f64,
    /// Intent confidence below this is flagged in reflection.
    pub low_intent_confidence: f64,
    pub extreme_max_hours: f64,
    pub extreme_min_score: f64,
    /// How many trailing turns of history are considered.
    pub recent_turns: usize,
    /// Season meant by "this semester".
    pub current_season: String,
    /// Season meant by "next semester".
    pub next_season: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            easy_max_hours: defaults::DEFAULT_EASY_MAX_HOURS,
            well_rated_min_score: defaults::DEFAULT_WELL_RATED_MIN_SCORE,
            inheritance_penalty: defaults::DEFAULT_INHERITANCE_PENALTY,
            default_intent_confidence: defaults::DEFAULT_INTENT_CONFIDENCE,
            low_intent_confidence: defaults::DEFAULT_LOW_INTENT_CONFIDENCE,
            extreme_max_hours: defaults::DEFAULT_EXTREME_MAX_HOURS,
            extreme_min_score: defaults::DEFAULT_EXTREME_MIN_SCORE,
            recent_turns: defaults::DEFAULT_RECENT_TURNS,
            current_season: defaults::DEFAULT_CURRENT_SEASON.to_string(),
            next_season: defaults::DEFAULT_NEXT_SEASON.to_string(),
        }
    }
}
