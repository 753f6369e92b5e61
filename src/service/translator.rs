use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{info, warn};

use crate::clients::ClientError;
use crate::models::event::{self, CalendarEvent, COLOR_GENERATED, DAYS_IN_WEEK};
use crate::service::model_service::ModelClient;
use crate::service::slots;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("no API key configured for the {0} backend")]
    MissingCredential(TranslatorBackend),
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("model returned unusable JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model returned an invalid event: {0}")]
    InvalidEvent(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatorBackend {
    /// Free-slot prompt, single event back.
    Gemini,
    /// Schema-constrained prompt, list of events back.
    Xai,
}

impl fmt::Display for TranslatorBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslatorBackend::Gemini => write!(f, "gemini"),
            TranslatorBackend::Xai => write!(f, "xai"),
        }
    }
}

impl FromStr for TranslatorBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(TranslatorBackend::Gemini),
            "xai" | "grok" => Ok(TranslatorBackend::Xai),
            other => Err(format!("unknown translator backend: {}", other)),
        }
    }
}

/// Turns a free-text request into new calendar events. Never persists.
#[async_trait]
pub trait EventTranslator: Send + Sync {
    async fn translate(&self, text: &str, current: &[CalendarEvent]) -> Result<Vec<CalendarEvent>, TranslateError>;

    fn backend(&self) -> TranslatorBackend;
}

/// Strips a surrounding ```json fence some models add despite instructions.
pub fn strip_code_fences(payload: &str) -> &str {
    let trimmed = payload.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotAnswer {
    #[serde(default)]
    title: Option<String>,
    day: u8,
    start_hour: f64,
    end_hour: f64,
}

pub struct SlotPromptTranslator {
    model: Arc<dyn ModelClient>,
}

impl SlotPromptTranslator {
    pub fn new(model: Arc<dyn ModelClient>) -> Self {
        Self { model }
    }

    pub fn build_prompt(text: &str, current: &[CalendarEvent]) -> String {
        let free = slots::describe_slots(&slots::calculate_free_slots(current));
        format!(
            "I need to organize my week. My free blocks are:\n{free}\n\
             I want to schedule the following task: {text}.\n\
             Answer only in JSON with the format {{\"title\":\"task\",\"day\":dayNumber,\"startHour\":startHour,\"endHour\":endHour}}."
        )
    }

    fn parse(payload: &str, text: &str) -> Result<CalendarEvent, TranslateError> {
        let answer: SlotAnswer = serde_json::from_str(strip_code_fences(payload))?;
        if answer.day >= DAYS_IN_WEEK {
            return Err(TranslateError::InvalidEvent(format!("day {} out of range", answer.day)));
        }
        if answer.end_hour <= answer.start_hour {
            return Err(TranslateError::InvalidEvent(format!(
                "end {} is not after start {}",
                answer.end_hour, answer.start_hour
            )));
        }
        let title = answer
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| text.to_string());
        Ok(CalendarEvent {
            id: event::generated_id("gemini"),
            day: answer.day,
            start_hour: answer.start_hour,
            end_hour: answer.end_hour,
            title,
            color: COLOR_GENERATED.to_string(),
        })
    }
}

#[async_trait]
impl EventTranslator for SlotPromptTranslator {
    async fn translate(&self, text: &str, current: &[CalendarEvent]) -> Result<Vec<CalendarEvent>, TranslateError> {
        if !self.model.has_credential() {
            return Err(TranslateError::MissingCredential(self.backend()));
        }
        let prompt = Self::build_prompt(text, current);
        let payload = self.model.generate(&prompt, None).await?;
        let event = Self::parse(&payload, text)?;
        info!(id = %event.id, day = event.day, start = event.start_hour, "model placed event");
        Ok(vec![event])
    }

    fn backend(&self) -> TranslatorBackend {
        TranslatorBackend::Gemini
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StructuredItem {
    title: String,
    day: i64,
    start_hour: f64,
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct StructuredAnswer {
    events: Vec<StructuredItem>,
}

pub struct StructuredTranslator {
    model: Arc<dyn ModelClient>,
    timezone: Tz,
    now: Option<DateTime<Utc>>,
}

impl StructuredTranslator {
    pub fn new(model: Arc<dyn ModelClient>, timezone: Tz) -> Self {
        Self {
            model,
            timezone,
            now: None,
        }
    }

    /// Pins "today" instead of reading the clock.
    pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
        self.now = Some(now);
        self
    }

    pub fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "events": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "title": { "type": "string", "description": "The event title." },
                            "day": {
                                "type": "integer",
                                "minimum": 0,
                                "maximum": 6,
                                "description": "Day of the week (0=Sunday, 1=Monday, ..., 6=Saturday)."
                            },
                            "startHour": {
                                "type": "number",
                                "minimum": 7,
                                "maximum": 22,
                                "description": "Start hour, 24h clock."
                            },
                            "duration": {
                                "type": "number",
                                "minimum": 1,
                                "maximum": 8,
                                "description": "Duration in hours. Assume 1 hour when not specified."
                            }
                        },
                        "required": ["title", "day", "startHour", "duration"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["events"],
            "additionalProperties": false
        })
    }

    pub fn build_prompt(&self, text: &str) -> String {
        let now = self.now.unwrap_or_else(Utc::now).with_timezone(&self.timezone);
        let weekday = now.weekday().num_days_from_sunday();
        format!(
            "You are an expert calendar organizer.\n\
             Your task is to analyse the user's request and turn it into one or more calendar events.\n\
             Context:\n\
             - Today is {today}.\n\
             - Today's weekday index is {weekday} (0=Sunday, 1=Monday, ..., 6=Saturday).\n\
             - \"Tomorrow\" means the day after today.\n\
             - \"The day after tomorrow\" means two days after today.\n\
             - A named weekday (e.g. \"on Wednesday\") means the next Wednesday. If today is Wednesday, it means next week's Wednesday.\n\
             - If no duration is given, assume 1 hour.\n\
             User request: \"{text}\"\n\
             Based on the request, produce the list of new events with the correct weekday and start hour.\n\
             Return only the new events as JSON.",
            today = now.format("%A, %B %-d, %Y"),
        )
    }

    fn convert(answer: StructuredAnswer) -> Vec<CalendarEvent> {
        answer
            .events
            .into_iter()
            .filter_map(|item| {
                let in_range = (0..i64::from(DAYS_IN_WEEK)).contains(&item.day)
                    && (7.0..=22.0).contains(&item.start_hour)
                    && (1.0..=8.0).contains(&item.duration);
                if !in_range {
                    warn!(title = %item.title, day = item.day, start = item.start_hour, duration = item.duration, "discarding out-of-range event from model");
                    return None;
                }
                let compact: String = item.title.split_whitespace().collect();
                Some(CalendarEvent {
                    id: event::generated_id(&format!("ai-{}", compact)),
                    day: item.day as u8,
                    start_hour: item.start_hour,
                    end_hour: item.start_hour + item.duration,
                    title: item.title,
                    color: COLOR_GENERATED.to_string(),
                })
            })
            .collect()
    }
}

#[async_trait]
impl EventTranslator for StructuredTranslator {
    async fn translate(&self, text: &str, _current: &[CalendarEvent]) -> Result<Vec<CalendarEvent>, TranslateError> {
        if !self.model.has_credential() {
            return Err(TranslateError::MissingCredential(self.backend()));
        }
        let prompt = self.build_prompt(text);
        let schema = Self::schema();
        let payload = self.model.generate(&prompt, Some(&schema)).await?;
        let answer: StructuredAnswer = serde_json::from_str(strip_code_fences(&payload))?;
        let events = Self::convert(answer);
        info!(count = events.len(), "model produced events");
        Ok(events)
    }

    fn backend(&self) -> TranslatorBackend {
        TranslatorBackend::Xai
    }
}
