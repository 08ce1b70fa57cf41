use super::success_response;
use crate::errors::IntoErrorResponse;
use crate::wheel::{WheelService, WheelServiceError, WheelView};
use namewheel_engine::events::WheelEvent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;

/// Events an action produced, with the wheel state after it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WheelActionResponse {
    pub events: Vec<WheelEvent>,
    pub wheel: WheelView,
}

pub async fn get_wheel(wheel: Arc<WheelService>) -> Response {
    match wheel.view() {
        Ok(view) => success_response(StatusCode::OK, view),
        Err(err) => err.into_http_response(),
    }
}

/// Starts a spin.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/wheel/spin`
///
/// # Response Format
/// - **Success (202 Accepted)**: `spin_started` event carrying the target
///   rotation and duration. The winner follows on the event stream once the
///   duration elapses.
/// - **Error (409)**: `empty_entry_set` when there are no entries,
///   `not_idle` when a spin or reveal is in progress
pub async fn spin(wheel: Arc<WheelService>) -> Response {
    respond(&wheel, StatusCode::ACCEPTED, wheel.spin())
}

/// Back to rotation 0 from any state. Pending timers are cancelled.
pub async fn reset(wheel: Arc<WheelService>) -> Response {
    respond(&wheel, StatusCode::OK, wheel.reset())
}

pub async fn dismiss(wheel: Arc<WheelService>) -> Response {
    respond(&wheel, StatusCode::OK, wheel.dismiss())
}

/// Removes the current winner from the entries; `no_winner` (409) otherwise.
pub async fn remove_winner(wheel: Arc<WheelService>) -> Response {
    respond(&wheel, StatusCode::OK, wheel.remove_winner())
}

fn respond(
    wheel: &WheelService,
    status: StatusCode,
    result: Result<Vec<WheelEvent>, WheelServiceError>,
) -> Response {
    let outcome = result.and_then(|events| {
        Ok(WheelActionResponse {
            events,
            wheel: wheel.view()?,
        })
    });
    match outcome {
        Ok(body) => success_response(status, body),
        Err(err) => err.into_http_response(),
    }
}
