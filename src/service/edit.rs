use thiserror::Error;

use crate::models::event::{CalendarEvent, DAYS_IN_WEEK};

/// Start hours offered by the edit dialog: 7 through 23.
pub const EDIT_FIRST_HOUR: u8 = 7;
pub const EDIT_HOUR_OPTIONS: u8 = 17;

#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("day must be between 0 and 6, got {0}")]
    InvalidDay(u8),
    #[error("start hour must be between 7 and 23, got {0}")]
    InvalidStartHour(u8),
}

pub fn start_hour_options() -> impl Iterator<Item = u8> {
    EDIT_FIRST_HOUR..EDIT_FIRST_HOUR + EDIT_HOUR_OPTIONS
}

/// Moves an event to a new day and start hour, keeping its length.
pub fn reschedule(event: &CalendarEvent, day: u8, start_hour: u8) -> Result<CalendarEvent, EditError> {
    if day >= DAYS_IN_WEEK {
        return Err(EditError::InvalidDay(day));
    }
    if !start_hour_options().any(|h| h == start_hour) {
        return Err(EditError::InvalidStartHour(start_hour));
    }
    let start = f64::from(start_hour);
    Ok(CalendarEvent {
        day,
        start_hour: start,
        end_hour: start + event.duration(),
        ..event.clone()
    })
}
