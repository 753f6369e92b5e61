use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::warn;

use crate::models::event::{CalendarEvent, COLOR_FIXED};
use crate::models::preference::Preferences;
use crate::models::profile::{self, Profile};
use crate::service::placement;

/// A freshly seeded week and the profile it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWeek {
    pub label: String,
    pub worker_id: String,
    pub events: Vec<CalendarEvent>,
}

pub struct ProfileService;

impl ProfileService {
    /// Picks a profile uniformly at random from `catalog`.
    pub fn generate<R: Rng + ?Sized>(
        catalog: &[Profile],
        prefs: &Preferences,
        rng: &mut R,
    ) -> Option<GeneratedWeek> {
        let chosen = catalog.choose(rng)?;
        Some(Self::expand(chosen, prefs))
    }

    /// Turns every fixed and flexible entry of a profile into an event.
    pub fn expand(chosen: &Profile, prefs: &Preferences) -> GeneratedWeek {
        let mut events = Vec::with_capacity(chosen.entry_count());

        for (index, entry) in chosen.fixed.iter().enumerate() {
            let day = weekday_or_sunday(entry.day, chosen.worker_id);
            let start = profile::parse_hour(entry.start).unwrap_or(placement::FALLBACK_START);
            let end = profile::parse_hour(entry.end).unwrap_or(start + 1.0);
            events.push(CalendarEvent {
                id: format!("fixed-{}-{}", chosen.worker_id, index),
                day,
                start_hour: start,
                end_hour: end,
                title: entry.description.to_string(),
                color: COLOR_FIXED.to_string(),
            });
        }

        for (index, entry) in chosen.flexible.iter().enumerate() {
            let day = weekday_or_sunday(entry.day, chosen.worker_id);
            let placed = placement::place(entry.description, prefs);
            let id = match placed.category {
                Some(category) => format!("controlled-{}-{}-{}", category.id_tag(), chosen.worker_id, index),
                None => format!("flexible-other-{}-{}", chosen.worker_id, index),
            };
            events.push(CalendarEvent {
                id,
                day,
                start_hour: placed.start_hour,
                end_hour: placed.end_hour,
                title: placed.title,
                color: placed.color.to_string(),
            });
        }

        GeneratedWeek {
            label: chosen.label(),
            worker_id: chosen.worker_id.to_string(),
            events,
        }
    }
}

fn weekday_or_sunday(name: &str, worker_id: &str) -> u8 {
    profile::parse_weekday(name).unwrap_or_else(|| {
        warn!(worker = worker_id, day = name, "unknown weekday in profile, using Sunday");
        0
    })
}
