//! Tests for the Syllabus configuration system.

use std::sync::Mutex;

use syllabus_core::config::SyllabusConfig;
use syllabus_core::errors::ConfigError;

/// Serializes tests that modify environment variables.
static ENV_MUTEX: Mutex<()> = Mutex::new(());

fn clear_syllabus_env_vars() {
    for key in [
        "SYLLABUS_RESULT_CAP",
        "SYLLABUS_BACKEND_TIMEOUT_MS",
        "SYLLABUS_CACHE_CAPACITY",
        "SYLLABUS_EASY_MAX_HOURS",
    ] {
        std::env::remove_var(key);
    }
}

#[test]
fn defaults_are_valid() {
    let config = SyllabusConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.retrieval.result_cap, 10);
    assert_eq!(config.retrieval.rrf_k, 60);
    assert_eq!(config.recommendation.top_n, 5);
    assert!(config.recommendation.cache_ttl_secs.is_none());
}

#[test]
fn policy_easy_defaults_to_ten_hours() {
    assert_eq!(SyllabusConfig::default().interpreter.easy_max_hours, 10.0);
}

#[test]
fn policy_well_rated_defaults_to_four() {
    assert_eq!(SyllabusConfig::default().interpreter.well_rated_min_score, 4.0);
}

#[test]
fn partial_toml_keeps_other_defaults() {
    let config = SyllabusConfig::from_toml(
        r#"
[retrieval]
result_cap = 25

[interpreter]
easy_max_hours = 8.0
"#,
    )
    .unwrap();
    assert_eq!(config.retrieval.result_cap, 25);
    assert_eq!(config.retrieval.backend_timeout_ms, 1_500);
    assert_eq!(config.interpreter.easy_max_hours, 8.0);
    assert_eq!(config.interpreter.inheritance_penalty, 0.7);
}

#[test]
fn alias_table_is_data() {
    let config = SyllabusConfig::from_toml(
        r#"
[aliases.concentrations]
"Environmental Science" = ["ESPP", "EPS"]
"#,
    )
    .unwrap();
    assert_eq!(
        config.aliases.codes_for("environmental science").unwrap(),
        ["ESPP", "EPS"]
    );
    assert!(config.aliases.codes_for("Mathematics").is_none());
}

#[test]
fn invalid_toml_is_parse_error() {
    let err = SyllabusConfig::from_toml("[retrieval\nresult_cap = ").unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn out_of_range_penalty_fails_validation() {
    let config = SyllabusConfig::from_toml(
        r#"
[interpreter]
inheritance_penalty = 1.4
"#,
    )
    .unwrap();
    match config.validate() {
        Err(ConfigError::ValidationFailed { field, .. }) => {
            assert_eq!(field, "interpreter.inheritance_penalty");
        }
        other => panic!("expected validation failure, got {other:?}"),
    }
}

#[test]
fn load_missing_file_is_file_not_found() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_syllabus_env_vars();
    let dir = tempfile::TempDir::new().unwrap();
    let err = SyllabusConfig::load(Some(&dir.path().join("nope.toml"))).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound { .. }));
}

#[test]
fn env_overrides_file() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_syllabus_env_vars();

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("syllabus.toml");
    std::fs::write(
        &path,
        r#"
[retrieval]
result_cap = 15
backend_timeout_ms = 900
"#,
    )
    .unwrap();

    std::env::set_var("SYLLABUS_RESULT_CAP", "30");
    std::env::set_var("SYLLABUS_EASY_MAX_HOURS", "not-a-number");

    let config = SyllabusConfig::load(Some(&path)).unwrap();
    assert_eq!(config.retrieval.result_cap, 30);
    assert_eq!(config.retrieval.backend_timeout_ms, 900);
    // Unparseable env values leave the previous layer in place.
    assert_eq!(config.interpreter.easy_max_hours, 10.0);

    clear_syllabus_env_vars();
}

#[test]
fn env_value_is_validated() {
    let _lock = ENV_MUTEX.lock().unwrap();
    clear_syllabus_env_vars();
    std::env::set_var("SYLLABUS_RESULT_CAP", "0");
    let err = SyllabusConfig::load(None).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
    clear_syllabus_env_vars();
}
