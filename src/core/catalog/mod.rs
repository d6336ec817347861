//! Model catalog: built-in list, user override file, lookup.

mod descriptor;

pub use descriptor::{CatalogError, ModelDescriptor, parse_catalog};

use std::env;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::core::paths;

/// Built-in catalog, validated by build.rs.
const BUILTIN_CATALOG: &str = include_str!("../../../config/models.json");

/// The embedded catalog shipped with the binary.
pub fn builtin() -> Vec<ModelDescriptor> {
    // build.rs guarantees the embedded file is valid; a failure here means the
    // validation rules drifted apart.
    parse_catalog(BUILTIN_CATALOG).unwrap_or_else(|e| {
        log::error!("Built-in catalog failed validation: {}", e);
        Vec::new()
    })
}

/// Path of the user catalog: `AIML_CATALOG` if set, else `<config_dir>/models.json`.
pub fn user_catalog_path() -> Option<PathBuf> {
    if let Ok(p) = env::var("AIML_CATALOG")
        && !p.trim().is_empty()
    {
        return Some(PathBuf::from(p));
    }
    paths::config_dir().map(|d| d.join("models.json"))
}

/// Load the user catalog if one exists, otherwise the built-in catalog.
pub fn load() -> Result<Vec<ModelDescriptor>, CatalogError> {
    let Some(path) = user_catalog_path() else {
        return Ok(builtin());
    };
    match fs::read_to_string(&path) {
        Ok(json) => {
            log::debug!("Loading catalog from {}", path.display());
            parse_catalog(&json)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(builtin()),
        Err(e) => Err(CatalogError::Io {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

/// Find a model by its API identifier.
pub fn find<'a>(models: &'a [ModelDescriptor], id: &str) -> Option<&'a ModelDescriptor> {
    models.iter().find(|m| m.model_string_for_api == id)
}

/// Format context length as human-readable (e.g. "128k", "1.0M").
pub fn format_context(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 1_000 {
        format!("{}k", n / 1_000)
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_non_empty_and_contains_default_model() {
        let models = builtin();
        assert!(!models.is_empty());
        assert!(find(&models, crate::core::config::DEFAULT_MODEL).is_some());
    }

    #[test]
    fn find_missing_returns_none() {
        let models = builtin();
        assert!(find(&models, "no-such-model").is_none());
    }

    #[test]
    fn format_context_units() {
        assert_eq!(format_context(512), "512");
        assert_eq!(format_context(128_000), "128k");
        assert_eq!(format_context(1_000_000), "1.0M");
    }
}
