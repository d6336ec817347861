//! Centralized path helpers for config, cache, and data directories.

use std::path::PathBuf;

use crate::core::app;

/// Project directories (config, cache, data) from the standard platform locations.
pub fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("io", app::VENDOR, app::NAME)
}

/// Config directory (~/.config/aiml-chat/). `AIML_CHAT_CONFIG_DIR` overrides it.
pub fn config_dir() -> Option<PathBuf> {
    if let Some(p) = env_override("AIML_CHAT_CONFIG_DIR") {
        return Some(p);
    }
    project_dirs().map(|d| d.config_dir().to_path_buf())
}

/// Cache directory (~/.cache/aiml-chat/).
pub fn cache_dir() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().to_path_buf())
}

/// Data directory for chat history (~/.local/share/aiml-chat/). `AIML_CHAT_DATA_DIR` overrides it.
pub fn data_dir() -> Option<PathBuf> {
    if let Some(p) = env_override("AIML_CHAT_DATA_DIR") {
        return Some(p);
    }
    project_dirs().map(|d| d.data_dir().to_path_buf())
}

fn env_override(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .map(PathBuf::from)
}
