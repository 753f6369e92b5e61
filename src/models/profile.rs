/// A commitment with a set time that is copied verbatim into the week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedEntry {
    pub day: &'static str,
    pub start: &'static str,
    pub end: &'static str,
    pub description: &'static str,
}

/// A commitment whose time is decided by the placement rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlexibleEntry {
    pub day: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub worker_id: &'static str,
    pub worker_name: &'static str,
    pub role: &'static str,
    pub fixed: Vec<FixedEntry>,
    pub flexible: Vec<FlexibleEntry>,
}

impl Profile {
    pub fn label(&self) -> String {
        format!("Profile: {} ({})", self.worker_name, self.role)
    }

    pub fn entry_count(&self) -> usize {
        self.fixed.len() + self.flexible.len()
    }
}

pub fn parse_weekday(name: &str) -> Option<u8> {
    match name.trim().to_lowercase().as_str() {
        "sunday" => Some(0),
        "monday" => Some(1),
        "tuesday" => Some(2),
        "wednesday" => Some(3),
        "thursday" => Some(4),
        "friday" => Some(5),
        "saturday" => Some(6),
        _ => None,
    }
}

/// Hour part of an "HH:MM" string.
pub fn parse_hour(time: &str) -> Option<f64> {
    let hour = time.split(':').next()?.trim();
    hour.parse::<u8>().ok().map(f64::from)
}

fn fixed(day: &'static str, start: &'static str, end: &'static str, description: &'static str) -> FixedEntry {
    FixedEntry { day, start, end, description }
}

fn flexible(day: &'static str, description: &'static str) -> FlexibleEntry {
    FlexibleEntry { day, description }
}

pub fn catalog() -> Vec<Profile> {
    vec![
        Profile {
            worker_id: "W001",
            worker_name: "Laura Gomez",
            role: "Software Developer",
            fixed: vec![
                fixed("Monday", "09:00", "13:00", "Sprint work"),
                fixed("Monday", "15:00", "17:00", "Code review"),
                fixed("Tuesday", "09:00", "12:00", "Feature development"),
                fixed("Wednesday", "10:00", "11:00", "Team standup and planning"),
                fixed("Thursday", "09:00", "13:00", "Feature development"),
                fixed("Friday", "09:00", "12:00", "Release checks"),
            ],
            flexible: vec![
                flexible("Monday", "Lunch with the team"),
                flexible("Tuesday", "Gym session"),
                flexible("Wednesday", "Online course on databases"),
                flexible("Thursday", "Lunch"),
                flexible("Friday", "Yoga class"),
                flexible("Saturday", "Call with family"),
            ],
        },
        Profile {
            worker_id: "W002",
            worker_name: "Marcus Reed",
            role: "Nurse",
            fixed: vec![
                fixed("Sunday", "07:00", "15:00", "Hospital shift"),
                fixed("Monday", "07:00", "15:00", "Hospital shift"),
                fixed("Wednesday", "07:00", "15:00", "Hospital shift"),
                fixed("Thursday", "14:00", "22:00", "Hospital shift"),
            ],
            flexible: vec![
                flexible("Tuesday", "Running in the park"),
                flexible("Tuesday", "Lunch"),
                flexible("Friday", "Reading"),
                flexible("Saturday", "Spinning class"),
                flexible("Saturday", "Grocery shopping"),
            ],
        },
        Profile {
            worker_id: "W003",
            worker_name: "Ana Silva",
            role: "Teacher",
            fixed: vec![
                fixed("Monday", "08:00", "14:00", "Classes"),
                fixed("Tuesday", "08:00", "14:00", "Classes"),
                fixed("Wednesday", "08:00", "14:00", "Classes"),
                fixed("Thursday", "08:00", "14:00", "Classes"),
                fixed("Friday", "08:00", "12:00", "Classes"),
                fixed("Wednesday", "16:00", "18:00", "Grading"),
            ],
            flexible: vec![
                flexible("Monday", "Study for certification"),
                flexible("Tuesday", "Physical activity"),
                flexible("Thursday", "Lunch with a friend"),
                flexible("Friday", "Lunch"),
                flexible("Sunday", "Plan next week's lessons"),
            ],
        },
        Profile {
            worker_id: "W004",
            worker_name: "Kenji Watanabe",
            role: "Graphic Designer",
            fixed: vec![
                fixed("Monday", "10:00", "12:00", "Client meeting"),
                fixed("Tuesday", "10:00", "16:00", "Design sprint"),
                fixed("Thursday", "10:00", "16:00", "Design sprint"),
            ],
            flexible: vec![
                flexible("Monday", "Gym"),
                flexible("Wednesday", "Gym"),
                flexible("Wednesday", "Illustration course"),
                flexible("Friday", "Portfolio update"),
                flexible("Saturday", "Lunch"),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekday_names_are_case_insensitive() {
        assert_eq!(parse_weekday("Sunday"), Some(0));
        assert_eq!(parse_weekday("SATURDAY"), Some(6));
        assert_eq!(parse_weekday(" wednesday "), Some(3));
        assert_eq!(parse_weekday("someday"), None);
    }

    #[test]
    fn parse_hour_keeps_hour_part_only() {
        assert_eq!(parse_hour("09:30"), Some(9.0));
        assert_eq!(parse_hour("17:00"), Some(17.0));
        assert_eq!(parse_hour("late"), None);
    }

    #[test]
    fn catalog_entries_use_known_weekdays_and_times() {
        for profile in catalog() {
            for entry in &profile.fixed {
                assert!(parse_weekday(entry.day).is_some(), "{}", entry.day);
                let start = parse_hour(entry.start).unwrap();
                let end = parse_hour(entry.end).unwrap();
                assert!(end > start, "{} {}", profile.worker_id, entry.description);
            }
            for entry in &profile.flexible {
                assert!(parse_weekday(entry.day).is_some(), "{}", entry.day);
            }
        }
    }
}
