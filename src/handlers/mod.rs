pub mod api;
pub mod error;

use std::convert::Infallible;

use warp::{Filter, Reply};

pub use api::AppState;

const MAX_BODY_BYTES: u64 = 16 * 1024;

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

fn json_body<T>() -> impl Filter<Extract = (T,), Error = warp::Rejection> + Clone
where
    T: serde::de::DeserializeOwned + Send,
{
    warp::body::content_length_limit(MAX_BODY_BYTES).and(warp::body::json())
}

/// Page plus JSON API.
pub fn routes(state: AppState) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let index = warp::path::end()
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(api::index);

    let health = warp::path!("api" / "health")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(api::health);

    let list_events = warp::path!("api" / "events")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(api::list_events);

    let list_slots = warp::path!("api" / "slots")
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(api::list_slots);

    let add_from_text = warp::path!("api" / "events" / "text")
        .and(warp::post())
        .and(json_body::<api::TextRequest>())
        .and(with_state(state.clone()))
        .and_then(api::add_from_text);

    let generate_profile = warp::path!("api" / "profile")
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(api::generate_profile);

    let update_preferences = warp::path!("api" / "preferences")
        .and(warp::put())
        .and(json_body::<crate::models::preference::PreferenceChange>())
        .and(with_state(state.clone()))
        .and_then(api::update_preferences);

    let update_event = warp::path!("api" / "events" / String)
        .and(warp::put())
        .and(json_body::<api::EditRequest>())
        .and(with_state(state))
        .and_then(api::update_event);

    index
        .or(health)
        .or(list_events)
        .or(list_slots)
        .or(add_from_text)
        .or(generate_profile)
        .or(update_preferences)
        .or(update_event)
        .recover(error::handle_rejection)
}
