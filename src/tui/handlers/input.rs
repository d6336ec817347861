//! Handler for main input (chat input, scroll).

use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::core::config::Config;

use super::super::app::App;
use super::super::constants;
use super::chat_spawn;
use super::{HandleResult, PendingChat};

/// Handle main input keys (when no popup is open).
pub(crate) fn handle_main_input(
    key_code: KeyCode,
    key_modifiers: KeyModifiers,
    app: &mut App,
    config: &Arc<Config>,
    pending_chat: &mut Option<PendingChat>,
    rt: &Arc<Runtime>,
) -> HandleResult {
    match (key_code, key_modifiers) {
        (KeyCode::Enter, _) => {
            if let Some(prompt) = take_prompt(app, pending_chat.is_some()) {
                app.push_user(&prompt);
                *pending_chat = Some(chat_spawn::spawn_chat(
                    rt,
                    Arc::clone(config),
                    app.model_id.clone(),
                    app.conversation.clone(),
                ));
            }
        }
        (KeyCode::Backspace, _) => {
            app.input.pop();
        }
        (KeyCode::Up, _) => app.scroll_up(constants::SCROLL_LINES_SMALL),
        (KeyCode::Down, _) => app.scroll_down(constants::SCROLL_LINES_SMALL),
        (KeyCode::PageUp, _) => app.scroll_up(constants::SCROLL_LINES_PAGE),
        (KeyCode::PageDown, _) => app.scroll_down(constants::SCROLL_LINES_PAGE),
        (KeyCode::Char(c), mods) => {
            // Ignore Alt+key: user likely intended a shortcut (e.g. Alt+H)
            if !mods.contains(KeyModifiers::ALT) {
                app.input.push(c);
            }
        }
        _ => {}
    }
    HandleResult::Continue
}

/// Take the trimmed input for sending; None while a request is in flight or input is blank.
fn take_prompt(app: &mut App, busy: bool) -> Option<String> {
    if busy || app.is_waiting {
        return None;
    }
    let prompt = app.input.trim().to_string();
    if prompt.is_empty() {
        return None;
    }
    app.input.clear();
    Some(prompt)
}
