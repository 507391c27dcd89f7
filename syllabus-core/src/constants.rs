/// Schema version stamped on every record that crosses a crate boundary.
pub const SCHEMA_VERSION: u32 = 1;

/// Preference tag for a lighter workload.
pub const PREF_EASY: &str = "easy";

/// Preference tag for a heavier, more rigorous workload.
pub const PREF_HARD: &str = "hard";

/// Prefix for free-form subject interests (`interest:machine learning`).
pub const INTEREST_PREFIX: &str = "interest:";
