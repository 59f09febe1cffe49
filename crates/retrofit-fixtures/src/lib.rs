//! Test fixture loader for retrofitting sample data and golden scenarios.
//!
//! Raw text fixtures (vector, lexicon and morph files) are addressed by path;
//! golden scenarios are JSON and deserialize into [`GoldenScenario`].

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures").join("retrofit")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Check that a fixture file exists.
pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

/// Get the absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all golden scenario files.
pub fn list_golden() -> Vec<PathBuf> {
    let dir = fixtures_root().join("golden");
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            path.extension().is_some_and(|ext| ext == "json").then_some(path)
        })
        .collect();
    files.sort();
    files
}

/// A self-contained retrofitting case with its expected output.
///
/// Vectors are used as given (no normalization).
#[derive(Debug, Clone, Deserialize)]
pub struct GoldenScenario {
    pub description: String,
    pub vectors: BTreeMap<String, Vec<f64>>,
    #[serde(default)]
    pub lexicon: Option<BTreeMap<String, Vec<String>>>,
    /// Pattern label → `[source, target]` pairs, used verbatim (no reverse
    /// patterns are added).
    #[serde(default)]
    pub alignment: Option<BTreeMap<String, Vec<(String, String)>>>,
    pub iterations: usize,
    pub expected: BTreeMap<String, Vec<f64>>,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_tolerance() -> f64 {
    1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn raw_fixture_files_exist() {
        for f in [
            "vectors.txt",
            "vectors_malformed.txt",
            "vectors_header.txt",
            "lexicon.txt",
            "catvar_morph.txt",
            "alignment.json",
            "alignment_flat.json",
        ] {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn golden_scenarios_parse() {
        let files = list_golden();
        assert!(files.len() >= 4, "expected golden scenarios, found {}", files.len());
        for path in files {
            let name = path.file_name().unwrap().to_string_lossy().into_owned();
            let scenario: GoldenScenario = load_fixture(&format!("golden/{name}"));
            assert!(!scenario.expected.is_empty(), "{name} has no expectations");
            assert!(
                scenario.lexicon.is_some() || scenario.alignment.is_some(),
                "{name} has no knowledge source"
            );
        }
    }
}
