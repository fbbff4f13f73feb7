//! Test fixture loading utilities

use std::path::PathBuf;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a query document fixture
pub fn load_document(name: &str) -> String {
    let path = fixture_path(&format!("documents/{}", name));
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}

/// Load a query document fixture as parsed JSON
#[allow(dead_code)]
pub fn load_json(name: &str) -> serde_json::Value {
    serde_json::from_str(&load_document(name))
        .unwrap_or_else(|e| panic!("Fixture {} is not JSON: {}", name, e))
}
