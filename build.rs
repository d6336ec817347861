//! Build script: validates the built-in model catalog at compile time.

use std::collections::HashSet;
use std::path::PathBuf;

fn main() {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR set by Cargo");
    let catalog_path: PathBuf = [&manifest_dir, "config", "models.json"].iter().collect();
    println!("cargo:rerun-if-changed={}", catalog_path.display());

    let json = std::fs::read_to_string(&catalog_path).unwrap_or_else(|e| {
        panic!(
            "Failed to read {}: {}. models.json must exist and be valid.",
            catalog_path.display(),
            e
        )
    });
    #[derive(serde::Deserialize)]
    #[allow(dead_code)]
    struct CatalogEntry {
        model_name: String,
        organization: String,
        model_string_for_api: String,
        context_length: u64,
    }
    let entries: Vec<CatalogEntry> = serde_json::from_str(&json).unwrap_or_else(|e| {
        panic!(
            "models.json is invalid: {}. Fix the file and rebuild.",
            e
        )
    });
    let mut seen = HashSet::new();
    for entry in &entries {
        if entry.model_string_for_api.trim().is_empty() {
            panic!("models.json: entry '{}' has an empty model_string_for_api", entry.model_name);
        }
        if !seen.insert(entry.model_string_for_api.as_str()) {
            panic!(
                "models.json: duplicate model_string_for_api '{}'",
                entry.model_string_for_api
            );
        }
    }
}
