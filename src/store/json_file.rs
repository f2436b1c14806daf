//! Match store backed by a single JSON file (the local key-value store of a one-box deploy).

use crate::models::{Event, MatchId, MatchRecord, NewMatchRecord};
use crate::store::{event_names_from_matches, register_event, MatchStore, StoreError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// On-disk document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Document {
    /// Newest first.
    #[serde(default)]
    matches: Vec<MatchRecord>,
    #[serde(default)]
    events: Vec<Event>,
}

/// Reads and rewrites the whole file on every call; one writer at a time.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Document, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(Document::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Document::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, doc: &Document) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl MatchStore for JsonFileStore {
    async fn save_match(&self, record: NewMatchRecord) -> Result<MatchRecord, StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        register_event(&mut doc.events, &record.event_name);
        let stored = MatchRecord::new(record);
        doc.matches.insert(0, stored.clone());
        self.write(&doc).await?;
        log::debug!("Saved match {} to {}", stored.id, self.path.display());
        Ok(stored)
    }

    async fn get_matches(&self) -> Result<Vec<MatchRecord>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.load().await?.matches)
    }

    async fn get_match(&self, id: MatchId) -> Result<MatchRecord, StoreError> {
        let _guard = self.lock.lock().await;
        self.load()
            .await?
            .matches
            .into_iter()
            .find(|m| m.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    async fn delete_match(&self, id: MatchId) -> Result<bool, StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let before = doc.matches.len();
        doc.matches.retain(|m| m.id != id);
        if doc.matches.len() == before {
            return Ok(false);
        }
        self.write(&doc).await?;
        Ok(true)
    }

    async fn get_event_names(&self) -> Result<Vec<String>, StoreError> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;
        if doc.events.is_empty() {
            return Ok(event_names_from_matches(&doc.matches));
        }
        Ok(doc.events.into_iter().map(|e| e.name).collect())
    }

    async fn create_event(&self, name: String) -> Result<Event, StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        let known = doc.events.len();
        let event = register_event(&mut doc.events, &name).ok_or(StoreError::BlankEventName)?;
        if doc.events.len() > known {
            self.write(&doc).await?;
            log::debug!("Created event {:?} in {}", event.name, self.path.display());
        }
        Ok(event)
    }
}
