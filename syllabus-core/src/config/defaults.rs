// Single source of truth for all default values.

// --- Interpreter ---
// Qualitative phrase thresholds are policy, not correctness constraints.
pub const DEFAULT_EASY_MAX_HOURS: f64 = 10.0;
pub const DEFAULT_WELL_RATED_MIN_SCORE: f64 = 4.0;
pub const DEFAULT_INHERITANCE_PENALTY: f64 = 0.7;
pub const DEFAULT_INTENT_CONFIDENCE: f64 = 0.3;
pub const DEFAULT_LOW_INTENT_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_EXTREME_MAX_HOURS: f64 = 5.0;
pub const DEFAULT_EXTREME_MIN_SCORE: f64 = 4.5;
pub const DEFAULT_RECENT_TURNS: usize = 4;
pub const DEFAULT_CURRENT_SEASON: &str = "Fall";
pub const DEFAULT_NEXT_SEASON: &str = "Spring";

// --- Retrieval ---
pub const DEFAULT_RESULT_CAP: usize = 10;
pub const DEFAULT_BACKEND_TIMEOUT_MS: u64 = 1_500;
pub const DEFAULT_LEXICAL_TOP_K: usize = 20;
pub const DEFAULT_SEMANTIC_TOP_K: usize = 20;
pub const DEFAULT_RRF_K: u32 = 60;
pub const DEFAULT_RATING_WEIGHT: f64 = 0.5;
pub const DEFAULT_PREFERENCE_WEIGHT: f64 = 0.3;
pub const DEFAULT_CONCENTRATION_BONUS: f64 = 0.2;
pub const DEFAULT_MISSING_DATA_BONUS: f64 = 0.05;
pub const DEFAULT_WORKLOAD_SATURATION_HOURS: f64 = 20.0;
pub const DEFAULT_LEXICAL_CONFIDENCE: f64 = 0.6;
pub const DEFAULT_SEMANTIC_CONFIDENCE: f64 = 0.7;
pub const DEFAULT_PARALLEL_STRATEGIES: bool = true;

// --- Recommendation ---
pub const DEFAULT_TOP_N: usize = 5;
pub const DEFAULT_DERIVED_LIST_LEN: usize = 3;
pub const DEFAULT_ALTERNATIVES_FOR_TOP: usize = 3;
pub const DEFAULT_ALTERNATIVES_PER_COURSE: usize = 3;
pub const DEFAULT_RELAX_HOURS_FACTOR: f64 = 1.5;
pub const DEFAULT_RELAX_SCORE_FACTOR: f64 = 0.8;
pub const DEFAULT_RELAX_SCORE_FLOOR: f64 = 3.0;
pub const DEFAULT_MIN_RESULTS: usize = 3;
pub const DEFAULT_LOW_CONFIDENCE: f64 = 0.5;
pub const DEFAULT_CACHE_CAPACITY: u64 = 1_000;

// --- Aliases ---
/// Concentration names and the department codes they span.
pub const DEFAULT_CONCENTRATION_ALIASES: &[(&str, &[&str])] = &[
    ("Mathematics", &["MATH"]),
    ("Computer Science", &["COMPSCI"]),
    ("Economics", &["ECON"]),
    ("History", &["HIST"]),
    ("English", &["ENG"]),
    ("Chemistry", &["CHEM"]),
    ("Physics", &["PHYSICS"]),
    ("Psychology", &["PSY"]),
    ("Government", &["GOV"]),
    ("Sociology", &["SOC"]),
    ("Applied Mathematics", &["APMTH", "MATH"]),
    ("Statistics", &["STAT"]),
    ("Social Studies", &["GOV", "HIST", "SOC", "ECON"]),
    ("History and Literature", &["HIST", "ENG"]),
    ("Neuroscience", &["NEURO", "PSY", "MCB"]),
];
