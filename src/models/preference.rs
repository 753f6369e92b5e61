use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityTiming {
    Morning,
    Evening,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LunchTiming {
    Early,
    Late,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyTiming {
    AfterWork,
    Night,
}

/// Current lifestyle choices. Lives only as long as the planner does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub activity: ActivityTiming,
    pub lunch: LunchTiming,
    pub study: StudyTiming,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            activity: ActivityTiming::Evening,
            lunch: LunchTiming::Early,
            study: StudyTiming::AfterWork,
        }
    }
}

/// A partial update; absent axes keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceChange {
    #[serde(default)]
    pub activity: Option<ActivityTiming>,
    #[serde(default)]
    pub lunch: Option<LunchTiming>,
    #[serde(default)]
    pub study: Option<StudyTiming>,
}

impl PreferenceChange {
    pub fn is_empty(&self) -> bool {
        self.activity.is_none() && self.lunch.is_none() && self.study.is_none()
    }
}
