//! In-memory match store (tests, and servers started with MATCH_STORE=memory).

use crate::models::{Event, MatchId, MatchRecord, NewMatchRecord};
use crate::store::{event_names_from_matches, register_event, MatchStore, StoreError};
use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Contents {
    /// Newest first.
    matches: Vec<MatchRecord>,
    events: Vec<Event>,
}

/// Match store that lives as long as the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Contents>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MatchStore for MemoryStore {
    async fn save_match(&self, record: NewMatchRecord) -> Result<MatchRecord, StoreError> {
        let mut g = self.inner.write().await;
        register_event(&mut g.events, &record.event_name);
        let stored = MatchRecord::new(record);
        g.matches.insert(0, stored.clone());
        Ok(stored)
    }

    async fn get_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        Ok(self.inner.read().await.matches.clone())
    }

    async fn get_match(&self, id: MatchId) -> Result<MatchRecord, StoreError> {
        self.inner
            .read()
            .await
            .matches
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_match(&self, id: MatchId) -> Result<bool, StoreError> {
        let mut g = self.inner.write().await;
        let before = g.matches.len();
        g.matches.retain(|m| m.id != id);
        Ok(g.matches.len() < before)
    }

    async fn get_event_names(&self) -> Result<Vec<String>, StoreError> {
        let g = self.inner.read().await;
        if g.events.is_empty() {
            return Ok(event_names_from_matches(&g.matches));
        }
        Ok(g.events.iter().map(|e| e.name.clone()).collect())
    }

    async fn create_event(&self, name: String) -> Result<Event, StoreError> {
        let mut g = self.inner.write().await;
        register_event(&mut g.events, &name).ok_or(StoreError::BlankEventName)
    }
}
