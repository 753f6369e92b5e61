use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::{debug, warn};
use uuid::Uuid;

use super::{EventStore, StoreError};
use crate::models::event::CalendarEvent;

/// Keeps the week in a single pretty-printed JSON array.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn try_read(&self) -> Result<Vec<CalendarEvent>, StoreError> {
        let data = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[async_trait]
impl EventStore for JsonFileStore {
    async fn read(&self) -> Vec<CalendarEvent> {
        match self.try_read().await {
            Ok(events) => events,
            Err(StoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no events document yet");
                Vec::new()
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "unreadable events document, starting empty");
                Vec::new()
            }
        }
    }

    async fn save(&self, events: &[CalendarEvent]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let body = serde_json::to_string_pretty(events)?;
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "events.json".to_string());
        let tmp = self
            .path
            .with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()));
        fs::write(&tmp, body).await?;
        if let Err(err) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err.into());
        }
        debug!(path = %self.path.display(), count = events.len(), "saved events");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::COLOR_FIXED;
    use std::env;

    fn temp_path() -> PathBuf {
        env::temp_dir()
            .join(format!("weekplanner_store_{}", Uuid::new_v4()))
            .join("events.json")
    }

    fn sample(id: &str, day: u8, start: f64) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            day,
            start_hour: start,
            end_hour: start + 1.0,
            title: format!("event {}", id),
            color: COLOR_FIXED.to_string(),
        }
    }

    #[tokio::test]
    async fn missing_document_reads_empty() {
        let store = JsonFileStore::new(temp_path());
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn corrupt_document_reads_empty() {
        let path = temp_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileStore::new(&path);
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn save_then_read_preserves_order() {
        let store = JsonFileStore::new(temp_path());
        let events = vec![sample("b", 4, 15.0), sample("a", 1, 9.0), sample("c", 1, 8.0)];
        store.save(&events).await.expect("save should succeed");
        assert_eq!(store.read().await, events);
    }

    #[tokio::test]
    async fn save_overwrites_previous_collection() {
        let store = JsonFileStore::new(temp_path());
        store.save(&[sample("a", 0, 7.0), sample("b", 0, 9.0)]).await.unwrap();
        store.save(&[sample("z", 6, 20.0)]).await.unwrap();
        let events = store.read().await;
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "z");
    }

    #[tokio::test]
    async fn document_is_pretty_printed_array() {
        let path = temp_path();
        let store = JsonFileStore::new(&path);
        store.save(&[sample("a", 2, 10.0)]).await.unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.starts_with("[\n  {"));
        assert!(raw.contains("\"startHour\": 10,"));
    }

    #[tokio::test]
    async fn save_into_unwritable_location_reports_error() {
        let blocker = env::temp_dir().join(format!("weekplanner_blocker_{}", Uuid::new_v4()));
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let store = JsonFileStore::new(blocker.join("events.json"));
        let result = store.save(&[sample("a", 0, 7.0)]).await;
        assert!(matches!(result, Err(StoreError::Io(_))));
    }
}
