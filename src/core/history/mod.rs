//! Chat session history: an explicit state store over a persistence port.

mod storage;

#[cfg(test)]
pub use storage::MemoryPersistence;
pub use storage::{HistoryPersistence, JsonFilePersistence};

use std::io;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::message::ChatMessage;

/// Labels shorter than this are rebuilt from more messages.
pub const LABEL_MIN_LEN: usize = 15;
/// Labels longer than this are truncated with "...".
pub const LABEL_MAX_LEN: usize = 30;

const UNTITLED: &str = "New chat";

/// A stored conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub label: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: u64,
    pub updated_at: u64,
}

/// Build a sidebar label from the conversation.
///
/// Starts with the first message and appends following ones (space
/// separated) while shorter than [`LABEL_MIN_LEN`] characters, then truncates
/// to [`LABEL_MAX_LEN`] characters plus `...`.
pub fn generate_label(messages: &[ChatMessage]) -> String {
    let mut parts = messages.iter().map(|m| m.content.trim().replace('\n', " "));
    let Some(mut label) = parts.next() else {
        return UNTITLED.to_string();
    };
    for next in parts {
        if label.chars().count() >= LABEL_MIN_LEN {
            break;
        }
        label.push(' ');
        label.push_str(&next);
    }
    let label = label.trim();
    if label.is_empty() {
        return UNTITLED.to_string();
    }
    if label.chars().count() > LABEL_MAX_LEN {
        let truncated: String = label.chars().take(LABEL_MAX_LEN).collect();
        format!("{}...", truncated)
    } else {
        label.to_string()
    }
}

fn now_secs() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_else(|e| {
            log::warn!("System time before UNIX epoch: {}", e);
            0
        })
}

/// In-memory list of sessions (newest first) kept in sync with its persistence.
pub struct ChatHistory<P: HistoryPersistence> {
    persistence: P,
    sessions: Vec<ChatSession>,
    /// 0 = unlimited.
    max_sessions: usize,
}

impl<P: HistoryPersistence> ChatHistory<P> {
    /// Load sessions from `persistence`. Unreadable or corrupt data is logged
    /// and the store starts empty; the next save replaces it.
    pub fn open(persistence: P, max_sessions: u32) -> Self {
        let sessions = persistence.load().unwrap_or_else(|e| {
            log::warn!("Chat history is unreadable, starting empty: {}", e);
            Vec::new()
        });
        Self {
            persistence,
            sessions,
            max_sessions: max_sessions as usize,
        }
    }

    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn get(&self, id: &str) -> Option<&ChatSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    #[cfg(test)]
    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Store the messages of a finished exchange. Returns the session ID.
    ///
    /// With no `session_id` (or an unknown one) a new session is created at
    /// the front with a generated label. An existing session gets the new
    /// messages, and its label is regenerated while it is still short.
    pub fn record_exchange(
        &mut self,
        session_id: Option<&str>,
        messages: &[ChatMessage],
    ) -> io::Result<String> {
        if messages.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Cannot save empty conversation",
            ));
        }
        let now = now_secs();

        let existing = session_id.and_then(|id| self.sessions.iter_mut().find(|s| s.id == id));
        let id = match existing {
            Some(session) => {
                session.messages = messages.to_vec();
                session.updated_at = now;
                if session.label.chars().count() < LABEL_MIN_LEN {
                    session.label = generate_label(&session.messages);
                }
                session.id.clone()
            }
            None => {
                let session = ChatSession {
                    id: Uuid::new_v4().to_string(),
                    label: generate_label(messages),
                    messages: messages.to_vec(),
                    created_at: now,
                    updated_at: now,
                };
                let id = session.id.clone();
                self.sessions.insert(0, session);
                id
            }
        };

        self.prune();
        self.persist()?;
        Ok(id)
    }

    /// Rename a session. The label is trimmed and must not be empty.
    pub fn rename(&mut self, id: &str, label: &str) -> io::Result<()> {
        let label = label.trim();
        if label.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "Label cannot be empty",
            ));
        }
        let session = self
            .sessions
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No such conversation"))?;
        session.label = label.to_string();
        self.persist()
    }

    /// Delete a session. Returns false when the ID is unknown.
    pub fn delete(&mut self, id: &str) -> io::Result<bool> {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        if self.sessions.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Sessions whose label, ID, or message content contains `query` (case-insensitive).
    pub fn filter(&self, query: &str) -> Vec<&ChatSession> {
        filter_sessions(&self.sessions, query)
    }

    /// Drop the least recently updated sessions beyond the limit.
    fn prune(&mut self) {
        if self.max_sessions == 0 || self.sessions.len() <= self.max_sessions {
            return;
        }
        let mut by_age: Vec<(u64, String)> = self
            .sessions
            .iter()
            .map(|s| (s.updated_at, s.id.clone()))
            .collect();
        by_age.sort();
        let excess = self.sessions.len() - self.max_sessions;
        let doomed: Vec<String> = by_age.into_iter().take(excess).map(|(_, id)| id).collect();
        log::info!("Pruning {} old conversation(s)", doomed.len());
        self.sessions.retain(|s| !doomed.contains(&s.id));
    }

    fn persist(&self) -> io::Result<()> {
        self.persistence.save(&self.sessions)
    }
}

/// Filter sessions by label, id, or message content (case-insensitive).
pub fn filter_sessions<'a>(sessions: &'a [ChatSession], query: &str) -> Vec<&'a ChatSession> {
    if query.is_empty() {
        return sessions.iter().collect();
    }
    let q = query.to_lowercase();
    sessions
        .iter()
        .filter(|s| {
            s.label.to_lowercase().contains(&q)
                || s.id.to_lowercase().contains(&q)
                || s
                    .messages
                    .iter()
                    .any(|m| m.content.to_lowercase().contains(&q))
        })
        .collect()
}

#[cfg(test)]
mod tests;
