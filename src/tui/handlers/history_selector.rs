//! Handler for history selector popup (Alt+H).

use crossterm::event::{KeyCode, KeyModifiers};

use crate::core::history::{ChatSession, filter_sessions};

use super::super::app::{App, HistorySelectorState};
use super::{PendingChat, abandon_pending};

/// Action to apply after handling a history selector key.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum HistorySelectorAction {
    Close,
    Load { id: String },
    Delete { id: String },
    Rename { id: String, new_label: String },
    /// No action; keep the selector open.
    Keep,
}

/// Handle key when history selector is open.
pub(crate) fn handle_history_selector_key(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    selector: &mut HistorySelectorState,
    sessions: &[ChatSession],
) -> HistorySelectorAction {
    // When renaming, keys go to rename input
    if let Some((_, ref mut input)) = selector.renaming {
        match key_code {
            KeyCode::Esc => selector.renaming = None,
            KeyCode::Enter => {
                if let Some((id, new_label)) = selector.renaming.take() {
                    return HistorySelectorAction::Rename { id, new_label };
                }
            }
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Char(c) if !key_modifiers.contains(KeyModifiers::CONTROL) => {
                input.push(c);
            }
            _ => {}
        }
        return HistorySelectorAction::Keep;
    }

    let is_ctrl = key_modifiers.contains(KeyModifiers::CONTROL);
    match key_code {
        KeyCode::Backspace => {
            selector.filter.pop();
            selector.selected_index = 0;
        }
        KeyCode::Char(c) if !is_ctrl => {
            selector.filter.push(c);
            selector.selected_index = 0;
        }
        _ => {}
    }

    let filtered = filter_sessions(sessions, &selector.filter);
    let current = filtered.get(selector.selected_index);
    match key_code {
        KeyCode::Esc => HistorySelectorAction::Close,
        KeyCode::Char('r') if is_ctrl => {
            if let Some(s) = current {
                selector.renaming = Some((s.id.clone(), s.label.clone()));
            }
            HistorySelectorAction::Keep
        }
        KeyCode::Delete => current.map_or(HistorySelectorAction::Keep, |s| {
            HistorySelectorAction::Delete { id: s.id.clone() }
        }),
        KeyCode::Char('d') if is_ctrl => current.map_or(HistorySelectorAction::Keep, |s| {
            HistorySelectorAction::Delete { id: s.id.clone() }
        }),
        KeyCode::Up => {
            selector.selected_index = selector.selected_index.saturating_sub(1);
            HistorySelectorAction::Keep
        }
        KeyCode::Down => {
            if !filtered.is_empty() {
                selector.selected_index = (selector.selected_index + 1).min(filtered.len() - 1);
            }
            HistorySelectorAction::Keep
        }
        KeyCode::Enter => current.map_or(HistorySelectorAction::Keep, |s| {
            HistorySelectorAction::Load { id: s.id.clone() }
        }),
        _ => HistorySelectorAction::Keep,
    }
}

/// Apply a key to the open history selector.
///
/// Loading a session, or deleting the one on screen, abandons the request in flight.
pub(super) fn handle_history_selector(
    key_code: KeyCode,
    modifiers: KeyModifiers,
    app: &mut App,
    pending_chat: &mut Option<PendingChat>,
) {
    let Some(selector) = app.history_selector.as_mut() else {
        return;
    };
    let action =
        handle_history_selector_key(key_code, modifiers, selector, app.history.sessions());
    match action {
        HistorySelectorAction::Close => app.history_selector = None,
        HistorySelectorAction::Load { id } => {
            abandon_pending(pending_chat);
            app.load_session(&id);
            app.history_selector = None;
        }
        HistorySelectorAction::Delete { id } => {
            selector.error = None;
            match app.history.delete(&id) {
                Ok(_) => {
                    let remaining = filter_sessions(app.history.sessions(), &selector.filter).len();
                    selector.selected_index =
                        selector.selected_index.min(remaining.saturating_sub(1));
                    if app.session_id.as_deref() == Some(id.as_str()) {
                        abandon_pending(pending_chat);
                        app.new_chat();
                    }
                }
                Err(e) => selector.error = Some(format!("Delete failed: {}", e)),
            }
        }
        HistorySelectorAction::Rename { id, new_label } => {
            selector.error = None;
            if let Err(e) = app.history.rename(&id, &new_label) {
                selector.error = Some(format!("Rename failed: {}", e));
            }
        }
        HistorySelectorAction::Keep => {}
    }
}
