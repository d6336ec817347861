//! Transcript updates: user input, thinking marker, completion results.

use crate::core::llm::ChatError;
use crate::core::message::{ChatMessage, Role};

use super::{App, DisplayMessage, ScrollPosition};

impl From<&ChatMessage> for DisplayMessage {
    fn from(m: &ChatMessage) -> Self {
        match m.role {
            Role::User | Role::System => DisplayMessage::User(m.content.clone()),
            Role::Assistant => DisplayMessage::Assistant(m.content.clone()),
        }
    }
}

impl App {
    /// Record a user prompt and show the thinking marker.
    pub(crate) fn push_user(&mut self, text: &str) {
        self.messages.push(DisplayMessage::User(text.to_string()));
        self.messages.push(DisplayMessage::Thinking);
        self.conversation.push(ChatMessage::user(text));
        self.scroll = ScrollPosition::Bottom;
        self.is_waiting = true;
    }

    fn clear_thinking(&mut self) {
        self.messages
            .retain(|m| !matches!(m, DisplayMessage::Thinking));
        self.is_waiting = false;
    }

    /// Apply a finished request: append the reply and save the session, or show
    /// the error and drop the unanswered prompt from the conversation.
    pub(crate) fn apply_chat_result(&mut self, result: Result<String, ChatError>) {
        self.clear_thinking();
        self.scroll = ScrollPosition::Bottom;
        match result {
            Ok(reply) => {
                self.messages.push(DisplayMessage::Assistant(reply.clone()));
                self.conversation.push(ChatMessage::assistant(reply));
                self.save_session();
            }
            Err(e) => {
                if let Some(ChatMessage {
                    role: Role::User,
                    content,
                }) = self.conversation.last().cloned()
                {
                    self.conversation.pop();
                    if self.input.is_empty() {
                        self.input = content;
                    }
                }
                let notice = match e {
                    ChatError::Cancelled => "Request cancelled".to_string(),
                    e => format!("Error: {}", e),
                };
                log::warn!("Chat request failed: {}", notice);
                self.messages.push(DisplayMessage::Notice(notice));
            }
        }
    }

    /// Persist the conversation to its session (creating one on first save).
    pub(crate) fn save_session(&mut self) {
        if self.conversation.is_empty() {
            return;
        }
        match self
            .history
            .record_exchange(self.session_id.as_deref(), &self.conversation)
        {
            Ok(id) => {
                self.session_id = Some(id);
                self.save_error = None;
            }
            Err(e) => {
                log::warn!("Failed to save chat history: {}", e);
                self.save_error = Some(e.to_string());
            }
        }
    }
}
