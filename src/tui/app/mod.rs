//! TUI application state: transcript, input, scroll, popups, and the stores behind them.

mod messages;

use ratatui::widgets::ListState;

use crate::core::catalog::{self, ModelDescriptor};
use crate::core::history::{ChatHistory, HistoryPersistence};
use crate::core::message::ChatMessage;
use crate::core::selection::SelectionStore;

/// Entries displayed in the transcript.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayMessage {
    User(String),
    Assistant(String),
    /// Request in flight.
    Thinking,
    /// Failed or cancelled request; not part of the conversation sent upstream.
    Notice(String),
}

/// State for the model selector popup (Alt+M).
#[derive(Default)]
pub struct ModelSelectorState {
    /// Raw query; ranked against the catalog on every draw and keystroke.
    pub query: String,
    pub selected_index: usize,
    pub list_state: ListState,
    pub error: Option<String>,
}

/// State for the history selector popup (Alt+H).
#[derive(Default)]
pub struct HistorySelectorState {
    pub filter: String,
    pub selected_index: usize,
    pub list_state: ListState,
    /// When renaming: (session_id, new_label_input).
    pub renaming: Option<(String, String)>,
    /// Error from delete/rename.
    pub error: Option<String>,
}

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ScrollPosition {
    Line(usize),
    #[default]
    Bottom,
}

pub struct App {
    pub(crate) messages: Vec<DisplayMessage>,
    /// Conversation sent upstream (user/assistant turns only).
    pub(crate) conversation: Vec<ChatMessage>,
    /// User input in the text field.
    pub(crate) input: String,
    pub(crate) scroll: ScrollPosition,
    pub(crate) last_max_scroll: usize,
    /// Model ID used for chat requests.
    pub model_id: String,
    /// Display name for the header (falls back to the ID for models not in the catalog).
    pub model_name: String,
    pub catalog: Vec<ModelDescriptor>,
    pub(crate) selection: Box<dyn SelectionStore>,
    pub(crate) history: ChatHistory<Box<dyn HistoryPersistence>>,
    /// Current session; None = new unsaved chat.
    pub(crate) session_id: Option<String>,
    pub model_selector: Option<ModelSelectorState>,
    pub history_selector: Option<HistorySelectorState>,
    /// Esc was pressed; next key = Option+key (Mac terminals with "Use option as meta").
    pub(crate) escape_pending: bool,
    /// True while a chat request is in flight.
    pub(crate) is_waiting: bool,
    /// Last save error, shown in the header until the next successful save.
    pub(crate) save_error: Option<String>,
}

impl App {
    pub fn new(
        model_id: String,
        catalog: Vec<ModelDescriptor>,
        selection: Box<dyn SelectionStore>,
        history: ChatHistory<Box<dyn HistoryPersistence>>,
    ) -> Self {
        let model_name = display_name(&catalog, &model_id);
        Self {
            messages: vec![],
            conversation: vec![],
            input: String::new(),
            scroll: ScrollPosition::default(),
            last_max_scroll: 0,
            model_id,
            model_name,
            catalog,
            selection,
            history,
            session_id: None,
            model_selector: None,
            history_selector: None,
            escape_pending: false,
            is_waiting: false,
            save_error: None,
        }
    }

    /// Label of the current session, if saved.
    pub(crate) fn session_label(&self) -> Option<&str> {
        let id = self.session_id.as_deref()?;
        self.history.get(id).map(|s| s.label.as_str())
    }

    /// Switch the active model (already validated and persisted).
    pub(crate) fn set_model(&mut self, model_id: String) {
        self.model_name = display_name(&self.catalog, &model_id);
        self.model_id = model_id;
    }

    /// Reset to a new empty chat.
    pub(crate) fn new_chat(&mut self) {
        self.messages.clear();
        self.conversation.clear();
        self.session_id = None;
        self.scroll = ScrollPosition::default();
        self.last_max_scroll = 0;
        self.is_waiting = false;
    }

    /// Load a stored session into the transcript. Returns false for unknown IDs.
    pub(crate) fn load_session(&mut self, id: &str) -> bool {
        let Some(session) = self.history.get(id) else {
            return false;
        };
        let conversation = session.messages.clone();
        self.new_chat();
        self.messages = conversation.iter().map(DisplayMessage::from).collect();
        self.conversation = conversation;
        self.session_id = Some(id.to_string());
        self.scroll = ScrollPosition::Bottom;
        true
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line((pos + n).min(self.last_max_scroll));
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }
}

fn display_name(catalog: &[ModelDescriptor], model_id: &str) -> String {
    catalog::find(catalog, model_id)
        .map(|m| m.model_name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| model_id.to_string())
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::core::catalog::ModelDescriptor;
    use crate::core::history::{ChatHistory, HistoryPersistence, MemoryPersistence};
    use crate::core::selection::MemorySelectionStore;

    use super::App;

    pub(crate) fn catalog() -> Vec<ModelDescriptor> {
        vec![
            ModelDescriptor::new("GPT-4o", "OpenAI", "gpt-4o", 128_000),
            ModelDescriptor::new("GPT-4o Mini", "OpenAI", "gpt-4o-mini", 128_000),
            ModelDescriptor::new("Gemma 2 27B", "Google", "google/gemma-2-27b-it", 8_192),
        ]
    }

    pub(crate) fn app() -> App {
        let persistence: Box<dyn HistoryPersistence> = Box::new(MemoryPersistence::default());
        App::new(
            "gpt-4o".to_string(),
            catalog(),
            Box::new(MemorySelectionStore::default()),
            ChatHistory::open(persistence, 0),
        )
    }
}
