use super::{events_by_day, format_hour};
use crate::models::event::{CalendarEvent, DAY_NAMES, FreeSlot};

/// Per-day agenda for the terminal. Days without events are skipped.
pub fn render_agenda(events: &[CalendarEvent]) -> String {
    if events.is_empty() {
        return "Your calendar is empty.\n".to_string();
    }
    let mut out = String::new();
    for (day, day_events) in events_by_day(events).into_iter().enumerate() {
        if day_events.is_empty() {
            continue;
        }
        out.push_str(DAY_NAMES[day]);
        out.push('\n');
        for event in day_events {
            out.push_str(&format!(
                "  {:>8} - {:>8}  {}  [{}]\n",
                format_hour(event.start_hour),
                format_hour(event.end_hour),
                event.title,
                event.id
            ));
        }
    }
    out
}

pub fn render_slots(slots: &[FreeSlot]) -> String {
    let mut out = String::new();
    for slot in slots {
        out.push_str(&format!(
            "{:<9}  {} - {}\n",
            DAY_NAMES.get(slot.day as usize).copied().unwrap_or("?"),
            format_hour(slot.start),
            format_hour(slot.end)
        ));
    }
    out
}
