pub mod json_file;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::Mutex;

use crate::models::event::CalendarEvent;

pub use json_file::JsonFileStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Whole-collection persistence for the week.
///
/// `read` never fails: a missing or corrupt document reads as an empty week.
/// `save` replaces everything previously stored.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn read(&self) -> Vec<CalendarEvent>;
    async fn save(&self, events: &[CalendarEvent]) -> Result<(), StoreError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Mutex<Vec<CalendarEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_events(events: Vec<CalendarEvent>) -> Self {
        Self {
            events: Mutex::new(events),
        }
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn read(&self) -> Vec<CalendarEvent> {
        self.events.lock().await.clone()
    }

    async fn save(&self, events: &[CalendarEvent]) -> Result<(), StoreError> {
        *self.events.lock().await = events.to_vec();
        Ok(())
    }
}
