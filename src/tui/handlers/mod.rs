//! Event handlers for the TUI keyboard input.

mod chat_spawn;
mod history_selector;
mod input;
mod model_selector;

use crossterm::event::{KeyEvent, KeyEventKind};
use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::config::Config;
use crate::core::llm;

use super::app::{App, HistorySelectorState, ModelSelectorState};
use super::shortcuts::Shortcut;

/// Receiver for a chat request in progress.
pub struct PendingChat {
    pub result_rx: mpsc::Receiver<Result<String, llm::ChatError>>,
    /// Token to cancel the in-flight request.
    pub cancel_token: CancellationToken,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandleResult {
    Continue,
    Break,
}

/// True when Esc would start Option+key (escape_pending) rather than close/cancel.
pub(crate) fn would_esc_start_meta_sequence(
    key: &KeyEvent,
    app: &App,
    pending_chat: &Option<PendingChat>,
) -> bool {
    Shortcut::is_escape(key)
        && app.model_selector.is_none()
        && app.history_selector.is_none()
        && pending_chat.is_none()
}

/// Context for key event handling. Bundles mutable state to reduce parameter count.
pub struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub config: &'a Arc<Config>,
    pub pending_chat: &'a mut Option<PendingChat>,
    pub rt: &'a Arc<Runtime>,
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, ctx: HandleKeyContext<'_>) -> HandleResult {
    let HandleKeyContext {
        app,
        config,
        pending_chat,
        rt,
    } = ctx;

    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    // Esc+key sequence (Option as Meta on Mac terminals)
    let escape_pending = std::mem::take(&mut app.escape_pending);
    if let Some(shortcut) = Shortcut::match_key(&key, escape_pending) {
        return handle_shortcut(shortcut, app, pending_chat);
    }

    if app.history_selector.is_some() {
        history_selector::handle_history_selector(key.code, key.modifiers, app, pending_chat);
        return HandleResult::Continue;
    }

    if app.model_selector.is_some() {
        model_selector::handle_model_selector(key.code, key.modifiers, app);
        return HandleResult::Continue;
    }

    if Shortcut::is_escape(&key) {
        match pending_chat.as_ref() {
            Some(pc) => pc.cancel_token.cancel(),
            None => app.escape_pending = true,
        }
        return HandleResult::Continue;
    }

    input::handle_main_input(key.code, key.modifiers, app, config, pending_chat, rt)
}

/// Cancel the request in flight and drop its channel, so its reply never reaches
/// the chat that replaces the current one.
pub(crate) fn abandon_pending(pending_chat: &mut Option<PendingChat>) {
    if let Some(pc) = pending_chat.take() {
        log::debug!("Abandoning in-flight chat request");
        pc.cancel_token.cancel();
    }
}

fn handle_shortcut(
    shortcut: Shortcut,
    app: &mut App,
    pending_chat: &mut Option<PendingChat>,
) -> HandleResult {
    match shortcut {
        Shortcut::Quit => return HandleResult::Break,
        Shortcut::History => {
            app.model_selector = None;
            app.history_selector = Some(HistorySelectorState::default());
        }
        Shortcut::ModelSelector => {
            app.history_selector = None;
            app.model_selector = Some(ModelSelectorState::default());
        }
        Shortcut::NewChat => {
            abandon_pending(pending_chat);
            app.model_selector = None;
            app.history_selector = None;
            app.new_chat();
        }
    }
    HandleResult::Continue
}
