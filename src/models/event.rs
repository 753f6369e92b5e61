use chrono::Utc;
use serde::{Deserialize, Serialize, Serializer};
use std::env;
use std::path::PathBuf;
use uuid::Uuid;

pub const DAY_START: f64 = 7.0;
pub const DAY_END: f64 = 22.0;
pub const DAYS_IN_WEEK: u8 = 7;

pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

pub const COLOR_FIXED: &str = "bg-blue-600";
pub const COLOR_ACTIVITY: &str = "bg-green-600";
pub const COLOR_LUNCH: &str = "bg-orange-500";
pub const COLOR_STUDY: &str = "bg-purple-600";
pub const COLOR_FLEXIBLE: &str = "bg-teal-500";
pub const COLOR_GENERATED: &str = "bg-pink-500";

// Returns the directory where the events document lives.
// Defaults to a relative "./data" directory.
pub fn get_db_location() -> String {
    env::var("DB_LOCATION").unwrap_or("./data".to_string())
}

pub fn get_events_file() -> PathBuf {
    if let Ok(path) = env::var("EVENTS_FILE") {
        return PathBuf::from(path);
    }
    PathBuf::from(get_db_location()).join("events.json")
}

/// A single block on the weekly grid.
///
/// `day` is 0 for Sunday through 6 for Saturday. Hours are fractional so a
/// model answering "9.5" still lands on the grid.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: String,
    pub day: u8,
    #[serde(serialize_with = "serialize_hour")]
    pub start_hour: f64,
    #[serde(serialize_with = "serialize_hour")]
    pub end_hour: f64,
    pub title: String,
    pub color: String,
}

/// Whole hours are written as integers (`9`, not `9.0`).
fn serialize_hour<S: Serializer>(hour: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if hour.is_finite() && hour.fract() == 0.0 && hour.abs() < i64::MAX as f64 {
        serializer.serialize_i64(*hour as i64)
    } else {
        serializer.serialize_f64(*hour)
    }
}

impl CalendarEvent {
    pub fn duration(&self) -> f64 {
        self.end_hour - self.start_hour
    }

    pub fn day_name(&self) -> &'static str {
        day_name(self.day)
    }
}

/// An uncovered stretch of the working window on one day.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct FreeSlot {
    pub day: u8,
    pub start: f64,
    pub end: f64,
}

pub fn day_name(day: u8) -> &'static str {
    DAY_NAMES.get(day as usize).copied().unwrap_or("Unknown")
}

/// Millisecond timestamp used to build ids for model-created events.
pub fn id_stamp() -> i64 {
    Utc::now().timestamp_millis()
}

/// `{prefix}-{millis}-{8 hex}`; the random tail keeps ids apart within one millisecond.
pub fn generated_id(prefix: &str) -> String {
    let tail = Uuid::new_v4().simple().to_string();
    format!("{}-{}-{}", prefix, id_stamp(), &tail[..8])
}
