pub mod page;
pub mod text;

use crate::models::event::{CalendarEvent, DAY_START, DAYS_IN_WEEK};

/// Pixel height of one hour row in the grid.
pub const HOUR_HEIGHT: f64 = 60.0;
/// Hour labels shown down the side of the grid: 7 AM to 11 PM.
pub const GRID_HOURS: std::ops::Range<u8> = 7..24;

/// "9:00 AM", "12:00 PM", "10:00 PM".
pub fn format_hour(hour: f64) -> String {
    let total_minutes = (hour * 60.0).round() as i64;
    let whole = total_minutes.div_euclid(60);
    let minutes = total_minutes.rem_euclid(60);
    let suffix = if whole.rem_euclid(24) >= 12 { "PM" } else { "AM" };
    let display = match whole.rem_euclid(12) {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display, minutes, suffix)
}

/// Events grouped per weekday, each day sorted by start.
pub fn events_by_day(events: &[CalendarEvent]) -> Vec<Vec<&CalendarEvent>> {
    let mut days: Vec<Vec<&CalendarEvent>> = vec![Vec::new(); DAYS_IN_WEEK as usize];
    for event in events {
        if let Some(day) = days.get_mut(event.day as usize) {
            day.push(event);
        }
    }
    for day in &mut days {
        day.sort_by(|a, b| a.start_hour.total_cmp(&b.start_hour));
    }
    days
}

/// Position of an event block on the desktop grid.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockGeometry {
    pub top_px: f64,
    pub height_px: f64,
    pub left_pct: f64,
    pub width_pct: f64,
}

pub fn block_geometry(event: &CalendarEvent) -> BlockGeometry {
    let column = 100.0 / f64::from(DAYS_IN_WEEK);
    BlockGeometry {
        top_px: (event.start_hour - DAY_START) * HOUR_HEIGHT,
        height_px: event.duration() * HOUR_HEIGHT - 4.0,
        left_pct: f64::from(event.day) * column,
        width_pct: column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(day: u8, start: f64, end: f64) -> CalendarEvent {
        CalendarEvent {
            id: format!("{}-{}", day, start),
            day,
            start_hour: start,
            end_hour: end,
            title: "x".to_string(),
            color: String::new(),
        }
    }

    #[test]
    fn formats_twelve_hour_clock() {
        assert_eq!(format_hour(7.0), "7:00 AM");
        assert_eq!(format_hour(12.0), "12:00 PM");
        assert_eq!(format_hour(22.0), "10:00 PM");
        assert_eq!(format_hour(0.0), "12:00 AM");
        assert_eq!(format_hour(9.5), "9:30 AM");
    }

    #[test]
    fn near_whole_hours_round_up_to_the_next_hour() {
        assert_eq!(format_hour(9.999), "10:00 AM");
        assert_eq!(format_hour(11.9999), "12:00 PM");
        assert_eq!(format_hour(13.25), "1:15 PM");
    }

    #[test]
    fn groups_and_sorts_per_day() {
        let events = vec![event(2, 15.0, 16.0), event(2, 8.0, 9.0), event(9, 8.0, 9.0)];
        let days = events_by_day(&events);
        assert_eq!(days.len(), 7);
        assert_eq!(days[2].iter().map(|e| e.start_hour).collect::<Vec<_>>(), vec![8.0, 15.0]);
        assert!(days.iter().all(|d| d.iter().all(|e| e.day != 9)));
    }

    #[test]
    fn geometry_follows_hour_rows() {
        let geometry = block_geometry(&event(1, 9.0, 11.0));
        assert_eq!(geometry.top_px, 120.0);
        assert_eq!(geometry.height_px, 116.0);
        assert!((geometry.left_pct - 100.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn grid_has_seventeen_hour_rows() {
        assert_eq!(GRID_HOURS.len(), 17);
    }
}
