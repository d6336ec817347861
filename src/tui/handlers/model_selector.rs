//! Handler for the model selector popup: live ranked search over the catalog.

use crossterm::event::{KeyCode, KeyModifiers};

use crate::core::catalog::ModelDescriptor;
use crate::core::search;
use crate::core::selection;

use super::super::app::{App, ModelSelectorState};

/// Action to apply after handling a model selector key.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum ModelSelectorAction {
    Close,
    Select(String),
    /// No action; keep the selector open.
    Keep,
}

/// Handle key when model selector is open. Returns action to apply; caller applies to app.
pub(crate) fn handle_model_selector_key(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    selector: &mut ModelSelectorState,
    catalog: &[ModelDescriptor],
) -> ModelSelectorAction {
    let query_changed = match key_code {
        KeyCode::Backspace => selector.query.pop().is_some(),
        KeyCode::Char(c) if !key_modifiers.contains(KeyModifiers::CONTROL) => {
            selector.query.push(c);
            true
        }
        _ => false,
    };
    if query_changed {
        selector.selected_index = 0;
        selector.error = None;
    }

    let ranked = search::rank(catalog, &selector.query);
    match key_code {
        KeyCode::Esc => ModelSelectorAction::Close,
        KeyCode::Up => {
            selector.selected_index = selector.selected_index.saturating_sub(1);
            ModelSelectorAction::Keep
        }
        KeyCode::Down => {
            if !ranked.is_empty() {
                selector.selected_index = (selector.selected_index + 1).min(ranked.len() - 1);
            }
            ModelSelectorAction::Keep
        }
        KeyCode::Enter => match ranked.get(selector.selected_index) {
            Some(s) => ModelSelectorAction::Select(s.model.model_string_for_api.clone()),
            None => ModelSelectorAction::Keep,
        },
        _ => ModelSelectorAction::Keep,
    }
}

/// Apply a key to the open model selector.
pub(super) fn handle_model_selector(key_code: KeyCode, modifiers: KeyModifiers, app: &mut App) {
    let Some(selector) = app.model_selector.as_mut() else {
        return;
    };
    match handle_model_selector_key(key_code, modifiers, selector, &app.catalog) {
        ModelSelectorAction::Close => app.model_selector = None,
        ModelSelectorAction::Select(id) => {
            let saved = selection::select(&*app.selection, &app.catalog, &id).map(|_| ());
            match saved {
                Ok(()) => {
                    app.set_model(id);
                    app.model_selector = None;
                }
                Err(e) => selector.error = Some(e.to_string()),
            }
        }
        ModelSelectorAction::Keep => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::selection::SelectionStore;
    use crate::tui::app::test_support::{app, catalog};

    fn type_str(selector: &mut ModelSelectorState, catalog: &[ModelDescriptor], s: &str) {
        for c in s.chars() {
            handle_model_selector_key(KeyCode::Char(c), KeyModifiers::empty(), selector, catalog);
        }
    }

    #[test]
    fn enter_selects_top_ranked_model() {
        let catalog = catalog();
        let mut selector = ModelSelectorState::default();
        type_str(&mut selector, &catalog, "gpt mini");
        assert_eq!(
            handle_model_selector_key(KeyCode::Enter, KeyModifiers::empty(), &mut selector, &catalog),
            ModelSelectorAction::Select("gpt-4o-mini".into())
        );
    }

    #[test]
    fn typing_resets_selection_and_down_is_clamped() {
        let catalog = catalog();
        let mut selector = ModelSelectorState::default();
        for _ in 0..5 {
            handle_model_selector_key(KeyCode::Down, KeyModifiers::empty(), &mut selector, &catalog);
        }
        assert_eq!(selector.selected_index, 2);
        type_str(&mut selector, &catalog, "g");
        assert_eq!(selector.selected_index, 0);
    }

    #[test]
    fn no_match_keeps_selector_open() {
        let catalog = catalog();
        let mut selector = ModelSelectorState::default();
        type_str(&mut selector, &catalog, "zzz");
        assert_eq!(
            handle_model_selector_key(KeyCode::Enter, KeyModifiers::empty(), &mut selector, &catalog),
            ModelSelectorAction::Keep
        );
    }

    #[test]
    fn selecting_persists_and_closes() {
        let mut app = app();
        app.model_selector = Some(ModelSelectorState::default());
        for c in "gemma".chars() {
            handle_model_selector(KeyCode::Char(c), KeyModifiers::empty(), &mut app);
        }
        handle_model_selector(KeyCode::Enter, KeyModifiers::empty(), &mut app);
        assert!(app.model_selector.is_none());
        assert_eq!(app.model_id, "google/gemma-2-27b-it");
        assert_eq!(app.model_name, "Gemma 2 27B");
        assert_eq!(
            app.selection.load().as_deref(),
            Some("google/gemma-2-27b-it")
        );
    }

    #[test]
    fn esc_closes() {
        let mut app = app();
        app.model_selector = Some(ModelSelectorState::default());
        handle_model_selector(KeyCode::Esc, KeyModifiers::empty(), &mut app);
        assert!(app.model_selector.is_none());
        assert_eq!(app.model_id, "gpt-4o");
    }
}
