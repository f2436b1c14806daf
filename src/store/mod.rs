//! Persistence collaborator: where finished matches go.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use crate::models::{Event, MatchId, MatchRecord, NewMatchRecord};
use async_trait::async_trait;

/// Errors from a match store.
#[derive(Debug)]
pub enum StoreError {
    /// No stored match with this id.
    NotFound(MatchId),
    Io(std::io::Error),
    Serialization(serde_json::Error),
    /// Backend refused or could not be reached.
    Unavailable(String),
    /// Event names must have at least one non-space character.
    BlankEventName,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(id) => write!(f, "Match {} not found", id),
            StoreError::Io(e) => write!(f, "Storage error: {}", e),
            StoreError::Serialization(e) => write!(f, "Stored data is invalid: {}", e),
            StoreError::Unavailable(msg) => write!(f, "Failed to save match: {}", msg),
            StoreError::BlankEventName => write!(f, "Event name is empty"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Serialization(e) => Some(e),
            StoreError::NotFound(_) | StoreError::Unavailable(_) | StoreError::BlankEventName => {
                None
            }
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Serialization(e)
    }
}

/// Storage for finished matches and event names.
///
/// Callers guard against duplicate saves; stores do not dedupe.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Store a finished match, registering its event name if new.
    async fn save_match(&self, record: NewMatchRecord) -> Result<MatchRecord, StoreError>;

    /// All stored matches, newest first.
    async fn get_matches(&self) -> Result<Vec<MatchRecord>, StoreError>;

    async fn get_match(&self, id: MatchId) -> Result<MatchRecord, StoreError>;

    /// Returns false if there was no such match.
    async fn delete_match(&self, id: MatchId) -> Result<bool, StoreError>;

    async fn get_event_names(&self) -> Result<Vec<String>, StoreError>;

    /// Register an event by name (trimmed). An existing event of that name is returned
    /// as is.
    async fn create_event(&self, name: String) -> Result<Event, StoreError>;
}

/// Find or append the event called `name` (trimmed). `None` for a blank name.
pub(crate) fn register_event(events: &mut Vec<Event>, name: &str) -> Option<Event> {
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    if let Some(existing) = events.iter().find(|e| e.name == name) {
        return Some(existing.clone());
    }
    let event = Event::new(name);
    events.push(event.clone());
    Some(event)
}

/// Event names from stored matches: non-blank, distinct, first-seen order.
pub(crate) fn event_names_from_matches(matches: &[MatchRecord]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for m in matches {
        let name = m.record.event_name.trim();
        if !name.is_empty() && !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
