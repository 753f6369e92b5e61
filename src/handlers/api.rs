use std::convert::Infallible;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::info;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

use super::error::planner_error_response;
use crate::models::event::{CalendarEvent, FreeSlot};
use crate::models::preference::{PreferenceChange, Preferences};
use crate::service::planner::Planner;
use crate::view::page;

/// Shared across every route.
#[derive(Clone)]
pub struct AppState {
    pub planner: Arc<Planner>,
    pub speech_supported: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TextRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditRequest {
    pub day: u8,
    pub start_hour: u8,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Serialize)]
pub struct SlotsResponse {
    pub slots: Vec<FreeSlot>,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub event: CalendarEvent,
}

#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
    pub preferences: Preferences,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Option<String>,
    pub events: Vec<CalendarEvent>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub speech_supported: bool,
}

fn ok_json<T: Serialize>(body: &T) -> Response {
    warp::reply::with_status(warp::reply::json(body), StatusCode::OK).into_response()
}

/// GET /
pub async fn index(state: AppState) -> Result<Response, Infallible> {
    let snapshot = state.planner.snapshot().await;
    Ok(warp::reply::html(page::render_page(&snapshot, state.speech_supported)).into_response())
}

/// GET /api/health
pub async fn health(state: AppState) -> Result<Response, Infallible> {
    Ok(ok_json(&HealthResponse {
        status: "ok",
        speech_supported: state.speech_supported,
    }))
}

/// GET /api/events
pub async fn list_events(state: AppState) -> Result<Response, Infallible> {
    Ok(ok_json(&state.planner.snapshot().await))
}

/// GET /api/slots
pub async fn list_slots(state: AppState) -> Result<Response, Infallible> {
    Ok(ok_json(&SlotsResponse {
        slots: state.planner.free_slots().await,
    }))
}

/// POST /api/events/text
///
/// Responds with only the newly created events; an empty list means the
/// model could not help.
pub async fn add_from_text(request: TextRequest, state: AppState) -> Result<Response, Infallible> {
    info!(chars = request.text.len(), "text request");
    match state.planner.add_from_text(&request.text).await {
        Ok(events) => Ok(ok_json(&EventsResponse { events })),
        Err(err) => Ok(planner_error_response(err)),
    }
}

/// POST /api/profile
pub async fn generate_profile(state: AppState) -> Result<Response, Infallible> {
    let mut rng = StdRng::from_os_rng();
    match state.planner.generate_profile(&mut rng).await {
        Ok(snapshot) => Ok(ok_json(&ProfileResponse {
            profile: snapshot.profile,
            events: snapshot.events,
        })),
        Err(err) => Ok(planner_error_response(err)),
    }
}

/// PUT /api/preferences
pub async fn update_preferences(change: PreferenceChange, state: AppState) -> Result<Response, Infallible> {
    match state.planner.set_preference(change).await {
        Ok(snapshot) => Ok(ok_json(&PreferencesResponse {
            preferences: snapshot.preferences,
            events: snapshot.events,
        })),
        Err(err) => Ok(planner_error_response(err)),
    }
}

/// PUT /api/events/{id}
pub async fn update_event(id: String, request: EditRequest, state: AppState) -> Result<Response, Infallible> {
    info!(event_id = %id, day = request.day, start_hour = request.start_hour, "edit request");
    match state
        .planner
        .update_event(&id, request.day, request.start_hour)
        .await
    {
        Ok(event) => Ok(ok_json(&EventResponse { event })),
        Err(err) => Ok(planner_error_response(err)),
    }
}
