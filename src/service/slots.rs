use crate::models::event::{CalendarEvent, DAYS_IN_WEEK, DAY_END, DAY_START, FreeSlot};

/// Uncovered intervals of the working window, day by day.
///
/// Events are taken per day in ascending start order (stable, so equal starts
/// keep their input order). Overlapping events are tolerated: the cursor only
/// moves forward, so no slot can have negative length.
pub fn calculate_free_slots(events: &[CalendarEvent]) -> Vec<FreeSlot> {
    let mut slots = Vec::new();
    for day in 0..DAYS_IN_WEEK {
        let mut day_events: Vec<&CalendarEvent> = events.iter().filter(|e| e.day == day).collect();
        day_events.sort_by(|a, b| a.start_hour.total_cmp(&b.start_hour));

        let mut cursor = DAY_START;
        for event in day_events {
            if event.start_hour > cursor {
                slots.push(FreeSlot {
                    day,
                    start: cursor,
                    end: event.start_hour,
                });
            }
            cursor = cursor.max(event.end_hour);
        }
        if cursor < DAY_END {
            slots.push(FreeSlot {
                day,
                start: cursor,
                end: DAY_END,
            });
        }
    }
    slots
}

/// One line per slot, used as model context.
pub fn describe_slots(slots: &[FreeSlot]) -> String {
    slots
        .iter()
        .map(|s| format!("- Day {}, from {}:00 to {}:00", s.day, s.start, s.end))
        .collect::<Vec<_>>()
        .join("\n")
}
