//! Persistence port for chat sessions, with a JSON file and an in-memory backend.

#[cfg(test)]
use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::paths;

use super::ChatSession;

/// Load/save the full list of chat sessions.
pub trait HistoryPersistence {
    fn load(&self) -> io::Result<Vec<ChatSession>>;
    fn save(&self, sessions: &[ChatSession]) -> io::Result<()>;
}

impl<T: HistoryPersistence + ?Sized> HistoryPersistence for Box<T> {
    fn load(&self) -> io::Result<Vec<ChatSession>> {
        (**self).load()
    }

    fn save(&self, sessions: &[ChatSession]) -> io::Result<()> {
        (**self).save(sessions)
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    sessions: Vec<ChatSession>,
}

/// `chat_history.json` in the data directory. Writes go through a temp file + rename.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: Option<PathBuf>,
}

impl JsonFilePersistence {
    #[cfg(test)]
    pub fn at(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }
}

impl Default for JsonFilePersistence {
    fn default() -> Self {
        Self {
            path: paths::data_dir().map(|d| d.join("chat_history.json")),
        }
    }
}

impl HistoryPersistence for JsonFilePersistence {
    /// Empty when there is no data dir or no file yet (first run).
    /// Propagates IO errors (permission, disk) and JSON parse errors.
    fn load(&self) -> io::Result<Vec<ChatSession>> {
        let Some(path) = self.path.as_ref() else {
            return Ok(vec![]);
        };
        let data = match fs::read_to_string(path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => return Err(e),
        };
        let file: HistoryFile = serde_json::from_str(&data)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;
        Ok(file.sessions)
    }

    fn save(&self, sessions: &[ChatSession]) -> io::Result<()> {
        let path = self
            .path
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No data directory"))?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = HistoryFile {
            sessions: sessions.to_vec(),
        };
        let json = serde_json::to_string_pretty(&file)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, json)?;
        fs::rename(tmp, path)?;
        Ok(())
    }
}

/// Sessions kept in memory only.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    sessions: RefCell<Vec<ChatSession>>,
}

#[cfg(test)]
impl MemoryPersistence {
    pub fn with_sessions(sessions: Vec<ChatSession>) -> Self {
        Self {
            sessions: RefCell::new(sessions),
        }
    }

    pub fn snapshot(&self) -> Vec<ChatSession> {
        self.sessions.borrow().clone()
    }
}

#[cfg(test)]
impl HistoryPersistence for MemoryPersistence {
    fn load(&self) -> io::Result<Vec<ChatSession>> {
        Ok(self.sessions.borrow().clone())
    }

    fn save(&self, sessions: &[ChatSession]) -> io::Result<()> {
        *self.sessions.borrow_mut() = sessions.to_vec();
        Ok(())
    }
}
