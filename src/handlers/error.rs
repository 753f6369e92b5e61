use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use tracing::error;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};
use warp::Rejection;

use crate::service::edit::EditError;
use crate::service::planner::PlannerError;

/// JSON body of every failed API call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn into_response(self, status: StatusCode) -> Response {
        warp::reply::with_status(warp::reply::json(&self), status).into_response()
    }
}

/// Status and error code reported for a planner failure.
pub fn planner_error_status(err: &PlannerError) -> (StatusCode, &'static str) {
    match err {
        PlannerError::EventNotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        PlannerError::Edit(EditError::InvalidDay(_) | EditError::InvalidStartHour(_)) => {
            (StatusCode::BAD_REQUEST, "BAD_REQUEST")
        }
        PlannerError::EmptyCatalog => (StatusCode::INTERNAL_SERVER_ERROR, "EMPTY_CATALOG"),
        PlannerError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
    }
}

pub fn planner_error_response(err: PlannerError) -> Response {
    let (status, code) = planner_error_status(&err);
    if status.is_server_error() {
        error!(error = %err, "request failed");
    }
    ApiError::new(code, err.to_string()).into_response(status)
}

/// Turns unmatched routes and malformed bodies into JSON errors.
pub async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let response = if err.is_not_found() {
        ApiError::new("NOT_FOUND", "no such route").into_response(StatusCode::NOT_FOUND)
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        ApiError::new("BAD_REQUEST", e.to_string()).into_response(StatusCode::BAD_REQUEST)
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        ApiError::new("PAYLOAD_TOO_LARGE", "request body too large").into_response(StatusCode::PAYLOAD_TOO_LARGE)
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        ApiError::new("METHOD_NOT_ALLOWED", "method not allowed").into_response(StatusCode::METHOD_NOT_ALLOWED)
    } else {
        error!(?err, "unhandled rejection");
        ApiError::new("INTERNAL_ERROR", "unhandled rejection").into_response(StatusCode::INTERNAL_SERVER_ERROR)
    };
    Ok(response)
}
