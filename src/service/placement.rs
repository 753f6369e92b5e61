use crate::models::event::{
    CalendarEvent, COLOR_ACTIVITY, COLOR_FLEXIBLE, COLOR_LUNCH, COLOR_STUDY,
};
use crate::models::preference::{ActivityTiming, LunchTiming, Preferences, StudyTiming};

/// Flexible entries matching none of the categories land here.
pub const FALLBACK_START: f64 = 20.0;
pub const FALLBACK_END: f64 = 21.0;

/// Event kinds whose time follows a preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    PhysicalActivity,
    Lunch,
    Study,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::PhysicalActivity, Category::Lunch, Category::Study];

    pub fn label(self) -> &'static str {
        match self {
            Category::PhysicalActivity => "Physical Activity",
            Category::Lunch => "Lunch",
            Category::Study => "Study/Reading",
        }
    }

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Category::PhysicalActivity => &[
                "physical activity",
                "yoga",
                "running",
                "gym",
                "spinning",
                "workout",
            ],
            Category::Lunch => &["lunch"],
            Category::Study => &["study", "course", "reading"],
        }
    }

    pub fn duration(self) -> f64 {
        match self {
            Category::PhysicalActivity => 2.0,
            Category::Lunch | Category::Study => 1.0,
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Category::PhysicalActivity => COLOR_ACTIVITY,
            Category::Lunch => COLOR_LUNCH,
            Category::Study => COLOR_STUDY,
        }
    }

    /// Short tag used in generated event ids.
    pub fn id_tag(self) -> &'static str {
        match self {
            Category::PhysicalActivity => "gym",
            Category::Lunch => "lunch",
            Category::Study => "study",
        }
    }

    pub fn start(self, prefs: &Preferences) -> f64 {
        match self {
            Category::PhysicalActivity => match prefs.activity {
                ActivityTiming::Morning => 7.0,
                ActivityTiming::Evening => 18.0,
            },
            Category::Lunch => match prefs.lunch {
                LunchTiming::Early => 12.0,
                LunchTiming::Late => 14.0,
            },
            Category::Study => match prefs.study {
                StudyTiming::AfterWork => 17.0,
                StudyTiming::Night => 21.0,
            },
        }
    }
}

/// Where a flexible entry ends up on its day.
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub category: Option<Category>,
    pub title: String,
    pub start_hour: f64,
    pub end_hour: f64,
    pub color: &'static str,
}

/// First category whose keywords appear in the description, case-insensitive.
pub fn classify(description: &str) -> Option<Category> {
    let lower = description.to_lowercase();
    Category::ALL
        .into_iter()
        .find(|category| category.keywords().iter().any(|k| lower.contains(k)))
}

pub fn place(description: &str, prefs: &Preferences) -> Placement {
    match classify(description) {
        Some(category) => {
            let start = category.start(prefs);
            Placement {
                category: Some(category),
                title: category.label().to_string(),
                start_hour: start,
                end_hour: start + category.duration(),
                color: category.color(),
            }
        }
        None => Placement {
            category: None,
            title: description.to_string(),
            start_hour: FALLBACK_START,
            end_hour: FALLBACK_END,
            color: COLOR_FLEXIBLE,
        },
    }
}

/// Moves every event titled with the category's label to the preferred slot.
/// Anything else passes through unchanged.
pub fn reposition(events: &[CalendarEvent], category: Category, prefs: &Preferences) -> Vec<CalendarEvent> {
    let start = category.start(prefs);
    events
        .iter()
        .map(|event| {
            if event.title == category.label() {
                CalendarEvent {
                    start_hour: start,
                    end_hour: start + category.duration(),
                    ..event.clone()
                }
            } else {
                event.clone()
            }
        })
        .collect()
}

/// Categories whose start time differs between two preference sets.
pub fn changed_categories(before: &Preferences, after: &Preferences) -> Vec<Category> {
    Category::ALL
        .into_iter()
        .filter(|c| c.start(before) != c.start(after))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn classify_matches_keywords_case_insensitively() {
        assert_eq!(classify("Morning YOGA class"), Some(Category::PhysicalActivity));
        assert_eq!(classify("Gym session"), Some(Category::PhysicalActivity));
        assert_eq!(classify("Lunch with the team"), Some(Category::Lunch));
        assert_eq!(classify("Online Course on Rust"), Some(Category::Study));
        assert_eq!(classify("Call with family"), None);
    }

    #[test]
    fn activity_wins_over_later_categories() {
        assert_eq!(classify("gym then lunch"), Some(Category::PhysicalActivity));
    }

    #[test]
    fn place_uses_preference_start_and_fixed_duration() {
        let prefs = Preferences {
            activity: ActivityTiming::Morning,
            lunch: LunchTiming::Late,
            study: StudyTiming::Night,
        };
        let gym = place("Spinning", &prefs);
        assert_eq!(gym.title, "Physical Activity");
        assert_eq!((gym.start_hour, gym.end_hour), (7.0, 9.0));

        let lunch = place("lunch", &prefs);
        assert_eq!((lunch.start_hour, lunch.end_hour), (14.0, 15.0));

        let study = place("Reading", &prefs);
        assert_eq!(study.title, "Study/Reading");
        assert_eq!((study.start_hour, study.end_hour), (21.0, 22.0));
    }

    #[test]
    fn unmatched_entry_falls_back_to_evening_slot() {
        let placement = place("Grocery shopping", &Preferences::default());
        assert_eq!(placement.category, None);
        assert_eq!(placement.title, "Grocery shopping");
        assert_eq!((placement.start_hour, placement.end_hour), (20.0, 21.0));
        assert_eq!(placement.color, COLOR_FLEXIBLE);
    }

    #[test]
    fn activity_morning_moves_only_canonical_events() {
        let events = vec![
            event("gym", "Physical Activity", 2, 18.0, 20.0),
            event("run", "Physical activity", 3, 18.0, 20.0),
            event("work", "Sprint work", 2, 9.0, 13.0),
        ];
        let prefs = Preferences {
            activity: ActivityTiming::Morning,
            ..Preferences::default()
        };
        let moved = reposition(&events, Category::PhysicalActivity, &prefs);
        assert_eq!((moved[0].start_hour, moved[0].end_hour), (7.0, 9.0));
        assert_eq!(moved[0].day, 2);
        assert_eq!(moved[1], events[1]);
        assert_eq!(moved[2], events[2]);
    }

    #[test]
    fn reposition_of_empty_week_is_empty() {
        assert!(reposition(&[], Category::Lunch, &Preferences::default()).is_empty());
    }

    #[test]
    fn changed_categories_reports_only_differences() {
        let before = Preferences::default();
        let after = Preferences {
            lunch: LunchTiming::Late,
            ..before
        };
        assert_eq!(changed_categories(&before, &after), vec![Category::Lunch]);
        assert!(changed_categories(&before, &before).is_empty());
    }
}
