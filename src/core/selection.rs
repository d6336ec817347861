//! Persistence of the selected model (its `model_string_for_api`).

#[cfg(test)]
use std::cell::RefCell;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::core::catalog::{self, ModelDescriptor};
use crate::core::config::DEFAULT_MODEL;
use crate::core::paths;
use crate::core::search;

/// Storage port for the selected model identifier.
pub trait SelectionStore {
    /// The persisted identifier, if any.
    fn load(&self) -> Option<String>;
    fn save(&self, model_id: &str) -> io::Result<()>;
}

/// One-line file in the config directory.
#[derive(Debug, Clone)]
pub struct FileSelectionStore {
    path: Option<PathBuf>,
}

impl FileSelectionStore {
    #[cfg(test)]
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

impl Default for FileSelectionStore {
    /// `<config_dir>/selected_model`.
    fn default() -> Self {
        Self {
            path: paths::config_dir().map(|d| d.join("selected_model")),
        }
    }
}

impl SelectionStore for FileSelectionStore {
    fn load(&self) -> Option<String> {
        let path = self.path.as_ref()?;
        fs::read_to_string(path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn save(&self, model_id: &str) -> io::Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No config directory"))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, model_id)
    }
}

/// In-memory store.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySelectionStore {
    value: RefCell<Option<String>>,
}

#[cfg(test)]
impl SelectionStore for MemorySelectionStore {
    fn load(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn save(&self, model_id: &str) -> io::Result<()> {
        *self.value.borrow_mut() = Some(model_id.to_string());
        Ok(())
    }
}

/// Where the active model identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    Selection,
    Environment,
    Default,
}

impl fmt::Display for ModelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ModelSource::Selection => "from saved selection",
            ModelSource::Environment => "from AIML_MODEL",
            ModelSource::Default => "default",
        })
    }
}

/// Resolve the active model: saved selection, then `env_model`, then the default.
pub fn resolve_model_with(
    store: &dyn SelectionStore,
    env_model: Option<String>,
) -> (String, ModelSource) {
    if let Some(id) = store.load() {
        return (id, ModelSource::Selection);
    }
    if let Some(id) = env_model.filter(|s| !s.trim().is_empty()) {
        return (id.trim().to_string(), ModelSource::Environment);
    }
    (DEFAULT_MODEL.to_string(), ModelSource::Default)
}

/// Resolve the active model using `AIML_MODEL` from the environment.
pub fn resolve_model(store: &dyn SelectionStore) -> (String, ModelSource) {
    resolve_model_with(store, env::var("AIML_MODEL").ok())
}

#[derive(Debug, thiserror::Error)]
pub enum SelectError {
    #[error("unknown model '{id}'{}", suggestion_suffix(.suggestions))]
    UnknownModel { id: String, suggestions: Vec<String> },
    #[error("failed to save selection: {0}")]
    Io(#[from] io::Error),
}

fn suggestion_suffix(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Maximum number of close matches offered for an unknown identifier.
const MAX_SUGGESTIONS: usize = 3;

/// Validate `model_id` against the catalog and persist it.
pub fn select<'a>(
    store: &dyn SelectionStore,
    models: &'a [ModelDescriptor],
    model_id: &str,
) -> Result<&'a ModelDescriptor, SelectError> {
    let Some(model) = catalog::find(models, model_id.trim()) else {
        let suggestions = search::rank(models, model_id)
            .into_iter()
            .filter(|s| !s.priority.is_zero())
            .take(MAX_SUGGESTIONS)
            .map(|s| s.model.model_string_for_api.clone())
            .collect();
        return Err(SelectError::UnknownModel {
            id: model_id.to_string(),
            suggestions,
        });
    };
    store.save(&model.model_string_for_api)?;
    log::info!("Selected model {}", model.model_string_for_api);
    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn models() -> Vec<ModelDescriptor> {
        vec![
            ModelDescriptor::new("GPT-4o", "OpenAI", "gpt-4o", 128_000),
            ModelDescriptor::new("GPT-4o Mini", "OpenAI", "gpt-4o-mini", 128_000),
        ]
    }

    #[test]
    fn resolve_prefers_saved_selection() {
        let store = MemorySelectionStore::default();
        store.save("gpt-4o").unwrap();
        assert_eq!(
            resolve_model_with(&store, Some("env-model".into())),
            ("gpt-4o".to_string(), ModelSource::Selection)
        );
    }

    #[test]
    fn resolve_falls_back_to_env_then_default() {
        let store = MemorySelectionStore::default();
        assert_eq!(
            resolve_model_with(&store, Some(" env-model ".into())),
            ("env-model".to_string(), ModelSource::Environment)
        );
        assert_eq!(
            resolve_model_with(&store, Some("".into())),
            (DEFAULT_MODEL.to_string(), ModelSource::Default)
        );
    }

    #[test]
    fn select_known_model_persists() {
        let store = MemorySelectionStore::default();
        let catalog = models();
        let m = select(&store, &catalog, "gpt-4o-mini").unwrap();
        assert_eq!(m.model_name, "GPT-4o Mini");
        assert_eq!(store.load().as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn select_unknown_model_suggests_and_does_not_persist() {
        let store = MemorySelectionStore::default();
        let catalog = models();
        let err = select(&store, &catalog, "gpt4").unwrap_err();
        match &err {
            SelectError::UnknownModel { suggestions, .. } => {
                assert!(suggestions.contains(&"gpt-4o".to_string()));
            }
            other => panic!("expected UnknownModel, got {:?}", other),
        }
        assert!(err.to_string().contains("did you mean"));
        assert_eq!(store.load(), None);
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSelectionStore::at(dir.path().join("sub").join("selected_model"));
        assert_eq!(store.load(), None);
        store.save("gpt-4o").unwrap();
        assert_eq!(store.load().as_deref(), Some("gpt-4o"));
    }
}
