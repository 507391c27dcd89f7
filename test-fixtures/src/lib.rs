//! Golden course catalog and ingestion samples shared by every crate's tests.
//!
//! Fixtures are plain JSON; each crate deserializes them into its own types.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

/// Golden catalog: `{ "courses": [...], "concentrations": [...] }`.
pub const GOLDEN_CATALOG: &str = "golden/catalog.json";

/// Raw rows with missing codes, duplicate ids and unnumbered codes.
pub const MALFORMED_ROWS: &str = "golden/malformed_rows.json";

/// The `test-fixtures` directory, found by walking up from the calling
/// crate's manifest directory.
fn fixtures_root() -> PathBuf {
    let start = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    Path::new(&start)
        .ancestors()
        .map(|dir| dir.join("test-fixtures"))
        .find(|dir| dir.join("golden").is_dir())
        .unwrap_or_else(|| panic!("no test-fixtures/golden above {start}"))
}

/// Absolute path of a fixture.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Read and deserialize a fixture. Panics with the path on any failure.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("cannot parse {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn golden_files_exist() {
        for f in [GOLDEN_CATALOG, MALFORMED_ROWS] {
            assert!(fixture_path(f).is_file(), "missing fixture {f}");
        }
    }

    #[test]
    fn catalog_has_unique_ids() {
        let catalog: serde_json::Value = load_fixture(GOLDEN_CATALOG);
        let courses = catalog["courses"].as_array().unwrap();
        assert_eq!(courses.len(), 32);
        let mut ids: Vec<u64> = courses
            .iter()
            .map(|c| c["course_id"].as_u64().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), courses.len());
    }

    #[test]
    fn catalog_lists_concentrations() {
        let catalog: serde_json::Value = load_fixture(GOLDEN_CATALOG);
        assert_eq!(catalog["concentrations"].as_array().unwrap().len(), 4);
    }
}
