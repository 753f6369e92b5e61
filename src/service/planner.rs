use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::models::event::{CalendarEvent, FreeSlot};
use crate::models::preference::{PreferenceChange, Preferences};
use crate::models::profile::{self, Profile};
use crate::service::edit::{self, EditError};
use crate::service::placement;
use crate::service::profile_service::ProfileService;
use crate::service::slots;
use crate::service::translator::{EventTranslator, TranslateError};
use crate::store::{EventStore, StoreError};

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("failed to save events: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("event not found: {0}")]
    EventNotFound(String),
    #[error("profile catalog is empty")]
    EmptyCatalog,
}

/// What the calendar page shows.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlannerSnapshot {
    pub events: Vec<CalendarEvent>,
    pub preferences: Preferences,
    pub profile: Option<String>,
}

#[derive(Debug, Default)]
struct PlannerState {
    events: Vec<CalendarEvent>,
    preferences: Preferences,
    profile: Option<String>,
}

/// Owns the week and applies every user action to it.
///
/// Each mutation rewrites the whole store. Model calls run without holding
/// the state lock; results are appended once the call returns.
pub struct Planner {
    store: Arc<dyn EventStore>,
    translator: Arc<dyn EventTranslator>,
    catalog: Vec<Profile>,
    state: Mutex<PlannerState>,
}

impl Planner {
    pub fn new(store: Arc<dyn EventStore>, translator: Arc<dyn EventTranslator>) -> Self {
        Self::with_catalog(store, translator, profile::catalog())
    }

    pub fn with_catalog(
        store: Arc<dyn EventStore>,
        translator: Arc<dyn EventTranslator>,
        catalog: Vec<Profile>,
    ) -> Self {
        Self {
            store,
            translator,
            catalog,
            state: Mutex::new(PlannerState::default()),
        }
    }

    /// Replaces the in-memory week with whatever the store holds.
    pub async fn load(&self) -> usize {
        let events = self.store.read().await;
        let count = events.len();
        self.state.lock().await.events = events;
        info!(count, "loaded events");
        count
    }

    pub async fn snapshot(&self) -> PlannerSnapshot {
        let state = self.state.lock().await;
        PlannerSnapshot {
            events: state.events.clone(),
            preferences: state.preferences,
            profile: state.profile.clone(),
        }
    }

    pub async fn events(&self) -> Vec<CalendarEvent> {
        self.state.lock().await.events.clone()
    }

    pub async fn preferences(&self) -> Preferences {
        self.state.lock().await.preferences
    }

    pub async fn free_slots(&self) -> Vec<FreeSlot> {
        slots::calculate_free_slots(&self.state.lock().await.events)
    }

    /// Asks the model for events matching `text` and keeps them.
    ///
    /// Model problems (no key, transport, bad JSON) are logged and yield no
    /// events. Only a failed save is returned as an error.
    pub async fn add_from_text(&self, text: &str) -> Result<Vec<CalendarEvent>, PlannerError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let current = self.events().await;
        let backend = self.translator.backend();
        let new_events = match self.translator.translate(text, &current).await {
            Ok(events) => events,
            Err(TranslateError::MissingCredential(backend)) => {
                error!(%backend, "no API key configured, request ignored");
                return Ok(Vec::new());
            }
            Err(err) => {
                error!(%backend, error = %err, "failed to translate request");
                return Ok(Vec::new());
            }
        };
        if new_events.is_empty() {
            return Ok(new_events);
        }

        let mut state = self.state.lock().await;
        state.events.extend(new_events.iter().cloned());
        self.store.save(&state.events).await?;
        info!(added = new_events.len(), total = state.events.len(), "added events from text");
        Ok(new_events)
    }

    /// Seeds the week from a random catalog profile, dropping every existing event.
    pub async fn generate_profile<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<PlannerSnapshot, PlannerError> {
        let mut state = self.state.lock().await;
        let week = ProfileService::generate(&self.catalog, &state.preferences, rng)
            .ok_or(PlannerError::EmptyCatalog)?;
        info!(profile = %week.label, count = week.events.len(), "generated week");
        state.events = week.events;
        state.profile = Some(week.label);
        self.store.save(&state.events).await?;
        Ok(PlannerSnapshot {
            events: state.events.clone(),
            preferences: state.preferences,
            profile: state.profile.clone(),
        })
    }

    /// Updates preferences and moves the affected category events.
    pub async fn set_preference(&self, change: PreferenceChange) -> Result<PlannerSnapshot, PlannerError> {
        let mut state = self.state.lock().await;
        let before = state.preferences;
        let mut after = before;
        if let Some(activity) = change.activity {
            after.activity = activity;
        }
        if let Some(lunch) = change.lunch {
            after.lunch = lunch;
        }
        if let Some(study) = change.study {
            after.study = study;
        }
        state.preferences = after;

        let changed = placement::changed_categories(&before, &after);
        if !changed.is_empty() && !state.events.is_empty() {
            let mut events = std::mem::take(&mut state.events);
            for category in changed {
                events = placement::reposition(&events, category, &after);
            }
            state.events = events;
            self.store.save(&state.events).await?;
            info!(?after, "repositioned events for new preferences");
        }

        Ok(PlannerSnapshot {
            events: state.events.clone(),
            preferences: state.preferences,
            profile: state.profile.clone(),
        })
    }

    /// Moves one event to a new day and start hour, keeping its duration.
    pub async fn update_event(&self, id: &str, day: u8, start_hour: u8) -> Result<CalendarEvent, PlannerError> {
        let mut state = self.state.lock().await;
        let Some(slot) = state.events.iter_mut().find(|e| e.id == id) else {
            warn!(id, "edit for unknown event");
            return Err(PlannerError::EventNotFound(id.to_string()));
        };
        let updated = edit::reschedule(slot, day, start_hour)?;
        *slot = updated.clone();
        self.store.save(&state.events).await?;
        info!(id, day, start_hour, "event moved");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::preference::{ActivityTiming, LunchTiming};
    use crate::store::MemoryStore;
    use async_trait::async_trait;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    struct FixedTranslator {
        events: Vec<CalendarEvent>,
    }

    #[async_trait]
    impl EventTranslator for FixedTranslator {
        async fn translate(&self, _text: &str, _current: &[CalendarEvent]) -> Result<Vec<CalendarEvent>, TranslateError> {
            Ok(self.events.clone())
        }

        fn backend(&self) -> crate::service::translator::TranslatorBackend {
            crate::service::translator::TranslatorBackend::Gemini
        }
    }

    fn event(id: &str, title: &str, day: u8, start: f64, end: f64) -> CalendarEvent {
        CalendarEvent {
            id: id.to_string(),
            day,
            start_hour: start,
            end_hour: end,
            title: title.to_string(),
            color: String::new(),
        }
    }

    fn planner_with(events: Vec<CalendarEvent>, answer: Vec<CalendarEvent>) -> (Planner, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::with_events(events));
        let translator = Arc::new(FixedTranslator { events: answer });
        (Planner::new(store.clone(), translator), store)
    }

    #[tokio::test]
    async fn load_reads_store() {
        let (planner, _) = planner_with(vec![event("a", "Work", 1, 9.0, 17.0)], vec![]);
        assert_eq!(planner.load().await, 1);
        assert_eq!(planner.free_slots().await.iter().filter(|s| s.day == 1).count(), 2);
    }

    #[tokio::test]
    async fn blank_text_is_ignored() {
        let (planner, store) = planner_with(vec![], vec![event("n", "New", 2, 9.0, 10.0)]);
        assert!(planner.add_from_text("   ").await.unwrap().is_empty());
        assert!(store.read().await.is_empty());
    }

    #[tokio::test]
    async fn translated_events_are_appended_and_saved() {
        let (planner, store) = planner_with(
            vec![event("a", "Work", 1, 9.0, 17.0)],
            vec![event("n", "Dentist", 3, 15.0, 16.0)],
        );
        planner.load().await;
        let added = planner.add_from_text("dentist").await.unwrap();
        assert_eq!(added.len(), 1);
        let saved = store.read().await;
        assert_eq!(saved.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["a", "n"]);
    }

    #[tokio::test]
    async fn activity_switch_moves_canonical_events_only() {
        let (planner, store) = planner_with(
            vec![
                event("g", "Physical Activity", 2, 18.0, 20.0),
                event("w", "Work", 2, 9.0, 17.0),
            ],
            vec![],
        );
        planner.load().await;
        let snapshot = planner
            .set_preference(PreferenceChange {
                activity: Some(ActivityTiming::Morning),
                ..PreferenceChange::default()
            })
            .await
            .unwrap();
        assert_eq!(snapshot.preferences.activity, ActivityTiming::Morning);
        assert_eq!((snapshot.events[0].start_hour, snapshot.events[0].end_hour), (7.0, 9.0));
        assert_eq!(snapshot.events[1], event("w", "Work", 2, 9.0, 17.0));
        assert_eq!(store.read().await, snapshot.events);
    }

    #[tokio::test]
    async fn preference_change_on_empty_week_only_updates_preferences() {
        let (planner, _) = planner_with(vec![], vec![]);
        let snapshot = planner
            .set_preference(PreferenceChange {
                lunch: Some(LunchTiming::Late),
                ..PreferenceChange::default()
            })
            .await
            .unwrap();
        assert!(snapshot.events.is_empty());
        assert_eq!(planner.preferences().await.lunch, LunchTiming::Late);
    }

    #[tokio::test]
    async fn generated_week_uses_current_preferences() {
        let (planner, _) = planner_with(vec![], vec![]);
        planner
            .set_preference(PreferenceChange {
                lunch: Some(LunchTiming::Late),
                ..PreferenceChange::default()
            })
            .await
            .unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let snapshot = planner.generate_profile(&mut rng).await.unwrap();
        assert!(snapshot.profile.as_deref().unwrap().starts_with("Profile: "));
        for lunch in snapshot.events.iter().filter(|e| e.title == "Lunch") {
            assert_eq!(lunch.start_hour, 14.0);
        }
    }

    #[tokio::test]
    async fn empty_catalog_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        let translator = Arc::new(FixedTranslator { events: vec![] });
        let planner = Planner::with_catalog(store, translator, Vec::new());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            planner.generate_profile(&mut rng).await,
            Err(PlannerError::EmptyCatalog)
        ));
    }

    #[tokio::test]
    async fn update_event_preserves_duration_and_saves() {
        let (planner, store) = planner_with(vec![event("a", "Work", 1, 9.0, 12.0)], vec![]);
        planner.load().await;
        let moved = planner.update_event("a", 5, 13).await.unwrap();
        assert_eq!((moved.day, moved.start_hour, moved.end_hour), (5, 13.0, 16.0));
        assert_eq!(store.read().await, vec![moved]);
    }

    #[tokio::test]
    async fn update_unknown_event_is_not_found() {
        let (planner, _) = planner_with(vec![], vec![]);
        assert!(matches!(
            planner.update_event("missing", 1, 9).await,
            Err(PlannerError::EventNotFound(_))
        ));
    }

    #[tokio::test]
    async fn invalid_edit_leaves_event_untouched() {
        let (planner, _) = planner_with(vec![event("a", "Work", 1, 9.0, 12.0)], vec![]);
        planner.load().await;
        assert!(matches!(
            planner.update_event("a", 8, 9).await,
            Err(PlannerError::Edit(EditError::InvalidDay(8)))
        ));
        assert_eq!(planner.events().await[0].day, 1);
    }

    /// Reads a fixed week; every save fails.
    struct BrokenStore {
        events: Vec<CalendarEvent>,
    }

    #[async_trait]
    impl EventStore for BrokenStore {
        async fn read(&self) -> Vec<CalendarEvent> {
            self.events.clone()
        }

        async fn save(&self, _events: &[CalendarEvent]) -> Result<(), StoreError> {
            Err(StoreError::Io(std::io::Error::other("disk full")))
        }
    }

    fn broken_planner(events: Vec<CalendarEvent>, answer: Vec<CalendarEvent>) -> Planner {
        let store = Arc::new(BrokenStore { events });
        let translator = Arc::new(FixedTranslator { events: answer });
        Planner::new(store, translator)
    }

    #[tokio::test]
    async fn failed_save_is_reported_by_every_mutation() {
        let planner = broken_planner(
            vec![event("g", "Physical Activity", 2, 18.0, 20.0)],
            vec![event("n", "Dentist", 3, 15.0, 16.0)],
        );
        planner.load().await;

        assert!(matches!(
            planner.add_from_text("dentist").await,
            Err(PlannerError::Store(_))
        ));
        assert!(matches!(
            planner
                .set_preference(PreferenceChange {
                    activity: Some(ActivityTiming::Morning),
                    ..PreferenceChange::default()
                })
                .await,
            Err(PlannerError::Store(_))
        ));
        assert!(matches!(
            planner.update_event("g", 4, 10).await,
            Err(PlannerError::Store(_))
        ));
        let mut rng = StdRng::seed_from_u64(5);
        assert!(matches!(
            planner.generate_profile(&mut rng).await,
            Err(PlannerError::Store(_))
        ));
    }

    #[tokio::test]
    async fn each_same_title_event_can_be_edited() {
        let (planner, _) = planner_with(vec![], vec![]);
        let gym = |id: &str, day| event(id, "Gym", day, 18.0, 19.0);
        *planner.state.lock().await = PlannerState {
            events: vec![gym("ai-Gym-1-aaaaaaaa", 2), gym("ai-Gym-1-bbbbbbbb", 4)],
            ..PlannerState::default()
        };
        let moved = planner.update_event("ai-Gym-1-bbbbbbbb", 5, 8).await.unwrap();
        assert_eq!(moved.day, 5);
        let events = planner.events().await;
        assert_eq!(events[0].day, 2);
        assert_eq!(events[1].day, 5);
    }
}
