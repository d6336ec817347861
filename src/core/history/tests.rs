//! History module tests.

use std::io;

use crate::core::message::ChatMessage;

use super::{
    ChatHistory, ChatSession, HistoryPersistence, JsonFilePersistence, MemoryPersistence,
    filter_sessions, generate_label,
};

fn exchange(user: &str, assistant: &str) -> Vec<ChatMessage> {
    vec![ChatMessage::user(user), ChatMessage::assistant(assistant)]
}

fn session(id: &str, label: &str, updated_at: u64) -> ChatSession {
    ChatSession {
        id: id.to_string(),
        label: label.to_string(),
        messages: exchange("q", "a"),
        created_at: updated_at,
        updated_at,
    }
}

#[test]
fn label_from_long_first_message_is_truncated() {
    let label = generate_label(&exchange(
        "Explain the difference between sparse and dense models",
        "Sure",
    ));
    assert_eq!(label, "Explain the difference between...");
    assert_eq!(label.chars().count(), 33);
}

#[test]
fn label_combines_short_messages() {
    let label = generate_label(&exchange("Hi", "Hello! How can I help you today?"));
    assert_eq!(label, "Hi Hello! How can I help you t...");
}

#[test]
fn label_stops_once_long_enough() {
    let messages = vec![
        ChatMessage::user("Hello there"),
        ChatMessage::assistant("Hi"),
        ChatMessage::user("third"),
    ];
    assert_eq!(generate_label(&messages), "Hello there Hi third");
}

#[test]
fn label_collapses_newlines() {
    assert_eq!(
        generate_label(&[ChatMessage::user("  line one\nline two  ")]),
        "line one line two"
    );
}

#[test]
fn label_without_messages() {
    assert_eq!(generate_label(&[]), "New chat");
    assert_eq!(generate_label(&[ChatMessage::user("   ")]), "New chat");
}

#[test]
fn new_exchange_creates_session_at_front() {
    let mut history = ChatHistory::open(MemoryPersistence::default(), 0);
    let first = history
        .record_exchange(None, &exchange("What is Rust?", "A language."))
        .unwrap();
    let second = history
        .record_exchange(None, &exchange("And Go?", "Also a language."))
        .unwrap();

    let ids: Vec<&str> = history.sessions().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![second.as_str(), first.as_str()]);
    assert_eq!(history.persistence().snapshot().len(), 2);
}

#[test]
fn existing_session_is_updated_and_short_label_regenerated() {
    let mut history = ChatHistory::open(MemoryPersistence::default(), 0);
    let id = history.record_exchange(None, &[ChatMessage::user("Hi")]).unwrap();
    assert_eq!(history.get(&id).unwrap().label, "Hi");

    let mut messages = vec![ChatMessage::user("Hi")];
    messages.push(ChatMessage::assistant("Hello, what can I do?"));
    let same = history.record_exchange(Some(&id), &messages).unwrap();

    assert_eq!(same, id);
    assert_eq!(history.sessions().len(), 1);
    let s = history.get(&id).unwrap();
    assert_eq!(s.messages.len(), 2);
    assert_eq!(s.label, "Hi Hello, what can I do?");
}

#[test]
fn long_label_is_kept_on_update() {
    let mut history = ChatHistory::open(MemoryPersistence::default(), 0);
    let id = history
        .record_exchange(None, &exchange("A sufficiently long question", "x"))
        .unwrap();
    history.rename(&id, "My custom label").unwrap();
    history
        .record_exchange(Some(&id), &exchange("Something else entirely", "y"))
        .unwrap();
    assert_eq!(history.get(&id).unwrap().label, "My custom label");
}

#[test]
fn unknown_session_id_creates_new_session() {
    let mut history = ChatHistory::open(MemoryPersistence::default(), 0);
    let id = history
        .record_exchange(Some("missing"), &exchange("q", "a"))
        .unwrap();
    assert_ne!(id, "missing");
    assert_eq!(history.sessions().len(), 1);
}

#[test]
fn empty_exchange_is_rejected() {
    let mut history = ChatHistory::open(MemoryPersistence::default(), 0);
    let err = history.record_exchange(None, &[]).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
}

#[test]
fn rename_trims_and_rejects_empty() {
    let persistence = MemoryPersistence::with_sessions(vec![session("a", "old", 1)]);
    let mut history = ChatHistory::open(persistence, 0);
    history.rename("a", "  New name  ").unwrap();
    assert_eq!(history.get("a").unwrap().label, "New name");
    assert_eq!(history.persistence().snapshot()[0].label, "New name");

    let err = history.rename("a", "   ").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    let err = history.rename("nope", "x").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn delete_last_session_persists_empty_list() {
    let persistence = MemoryPersistence::with_sessions(vec![session("a", "only", 1)]);
    let mut history = ChatHistory::open(persistence, 0);
    assert!(history.delete("a").unwrap());
    assert!(!history.delete("a").unwrap());
    assert!(history.sessions().is_empty());
    assert!(history.persistence().snapshot().is_empty());
}

#[test]
fn prune_drops_least_recently_updated() {
    let persistence = MemoryPersistence::with_sessions(vec![
        session("newer", "n", 20),
        session("oldest", "o", 10),
    ]);
    let mut history = ChatHistory::open(persistence, 2);
    let id = history.record_exchange(None, &exchange("q", "a")).unwrap();
    let ids: Vec<&str> = history.sessions().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec![id.as_str(), "newer"]);
}

#[test]
fn filter_matches_label_and_content() {
    let mut a = session("1", "Rust questions", 1);
    a.messages = exchange("borrow checker?", "yes");
    let b = session("2", "Cooking", 2);
    let sessions = vec![a, b];

    assert_eq!(filter_sessions(&sessions, "").len(), 2);
    assert_eq!(filter_sessions(&sessions, "RUST")[0].id, "1");
    assert_eq!(filter_sessions(&sessions, "borrow")[0].id, "1");
    assert!(filter_sessions(&sessions, "pasta").is_empty());
}

#[test]
fn json_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data").join("chat_history.json");

    let mut history = ChatHistory::open(JsonFilePersistence::at(path.clone()), 0);
    let id = history
        .record_exchange(None, &exchange("persist me", "ok"))
        .unwrap();

    let reopened = ChatHistory::open(JsonFilePersistence::at(path.clone()), 0);
    assert_eq!(reopened.sessions().len(), 1);
    assert_eq!(reopened.get(&id).unwrap().messages[0].content, "persist me");
    assert!(!path.with_extension("tmp").exists());
}

#[test]
fn missing_file_loads_empty() {
    let dir = tempfile::tempdir().unwrap();
    let p = JsonFilePersistence::at(dir.path().join("none.json"));
    assert!(p.load().unwrap().is_empty());
}

#[test]
fn corrupt_file_starts_empty_and_is_replaced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("chat_history.json");
    std::fs::write(&path, "{not json").unwrap();

    let persistence = JsonFilePersistence::at(path.clone());
    assert_eq!(
        persistence.load().unwrap_err().kind(),
        io::ErrorKind::InvalidData
    );

    let mut history = ChatHistory::open(persistence, 0);
    assert!(history.sessions().is_empty());
    history.record_exchange(None, &exchange("q", "a")).unwrap();
    assert_eq!(JsonFilePersistence::at(path).load().unwrap().len(), 1);
}
