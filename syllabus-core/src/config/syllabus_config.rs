//! Top-level configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AliasConfig, InterpreterConfig, RecommendationConfig, RetrievalConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SYLLABUS_*`)
/// 2. TOML file passed to [`SyllabusConfig::load`]
/// 3. Compiled defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SyllabusConfig {
    pub interpreter: InterpreterConfig,
    pub retrieval: RetrievalConfig,
    pub recommendation: RecommendationConfig,
    pub aliases: AliasConfig,
}

impl SyllabusConfig {
    /// Load configuration: defaults, then `path` if given, then env overrides.
    /// The result is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        Self::apply_env_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let unit_fields = [
            ("interpreter.inheritance_penalty", self.interpreter.inheritance_penalty),
            (
                "interpreter.default_intent_confidence",
                self.interpreter.default_intent_confidence,
            ),
            ("interpreter.low_intent_confidence", self.interpreter.low_intent_confidence),
            ("retrieval.lexical_confidence", self.retrieval.lexical_confidence),
            ("retrieval.semantic_confidence", self.retrieval.semantic_confidence),
            ("recommendation.relax_score_factor", self.recommendation.relax_score_factor),
            ("recommendation.low_confidence", self.recommendation.low_confidence),
        ];
        for (field, value) in unit_fields {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(field, "must be between 0.0 and 1.0"));
            }
        }

        let rating_fields = [
            ("interpreter.well_rated_min_score", self.interpreter.well_rated_min_score),
            ("interpreter.extreme_min_score", self.interpreter.extreme_min_score),
            ("recommendation.relax_score_floor", self.recommendation.relax_score_floor),
        ];
        for (field, value) in rating_fields {
            if !(0.0..=5.0).contains(&value) {
                return Err(invalid(field, "must be between 0.0 and 5.0"));
            }
        }

        if self.interpreter.easy_max_hours <= 0.0 {
            return Err(invalid("interpreter.easy_max_hours", "must be greater than 0"));
        }
        if self.retrieval.workload_saturation_hours <= 0.0 {
            return Err(invalid(
                "retrieval.workload_saturation_hours",
                "must be greater than 0",
            ));
        }
        if self.recommendation.relax_hours_factor < 1.0 {
            return Err(invalid(
                "recommendation.relax_hours_factor",
                "must be at least 1.0",
            ));
        }
        if self.retrieval.result_cap == 0 {
            return Err(invalid("retrieval.result_cap", "must be greater than 0"));
        }
        if self.retrieval.backend_timeout_ms == 0 {
            return Err(invalid("retrieval.backend_timeout_ms", "must be greater than 0"));
        }
        if self.recommendation.backend_timeout_ms == 0 {
            return Err(invalid(
                "recommendation.backend_timeout_ms",
                "must be greater than 0",
            ));
        }
        if self.recommendation.top_n == 0 {
            return Err(invalid("recommendation.top_n", "must be greater than 0"));
        }
        if self.recommendation.cache_capacity == 0 {
            return Err(invalid("recommendation.cache_capacity", "must be greater than 0"));
        }
        Ok(())
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Unparseable values are ignored and the previous layer wins.
    fn apply_env_overrides(config: &mut SyllabusConfig) {
        if let Ok(val) = std::env::var("SYLLABUS_RESULT_CAP") {
            if let Ok(v) = val.parse::<usize>() {
                config.retrieval.result_cap = v;
            }
        }
        if let Ok(val) = std::env::var("SYLLABUS_BACKEND_TIMEOUT_MS") {
            if let Ok(v) = val.parse::<u64>() {
                config.retrieval.backend_timeout_ms = v;
                config.recommendation.backend_timeout_ms = v;
            }
        }
        if let Ok(val) = std::env::var("SYLLABUS_CACHE_CAPACITY") {
            if let Ok(v) = val.parse::<u64>() {
                config.recommendation.cache_capacity = v;
            }
        }
        if let Ok(val) = std::env::var("SYLLABUS_EASY_MAX_HOURS") {
            if let Ok(v) = val.parse::<f64>() {
                config.interpreter.easy_max_hours = v;
            }
        }
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::ValidationFailed {
        field: field.to_string(),
        message: message.to_string(),
    }
}
