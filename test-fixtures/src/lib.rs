//! Test fixtures shared across the Sleuth workspace: dataset files, path
//! helpers and mock embedding providers.

pub mod mocks;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

pub use mocks::{FailingProvider, KeywordProvider, RecordingProvider};

/// Relative path of the bundled personalities dataset.
pub const PERSONALITIES_CSV: &str = "datasets/personalities.csv";

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    if path.ends_with("test-fixtures") {
        return path;
    }
    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).exists()
}

/// Read a fixture file as a string.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn read_fixture(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let content = read_fixture(relative_path);
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {relative_path}: {e}"))
}
