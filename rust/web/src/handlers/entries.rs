use super::success_response;
use crate::errors::IntoErrorResponse;
use crate::wheel::WheelService;
use serde::Deserialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEntryRequest {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
}

pub async fn list_entries(wheel: Arc<WheelService>) -> Response {
    match wheel.entries() {
        Ok(entries) => success_response(StatusCode::OK, entries),
        Err(err) => err.into_http_response(),
    }
}

/// Adds an entry to the end of the wheel.
///
/// # HTTP Method and Path
/// - **Method**: POST
/// - **Path**: `/api/entries`
///
/// # Request Format
/// ```json
/// { "name": "Grace", "color": "#FF6347" }
/// ```
/// `color` is optional; the next palette color is used when omitted.
///
/// # Response Format
/// - **Success (201 Created)**: the stored entry with its assigned `id`
/// - **Error (400)**: `empty_name`
/// - **Error (409)**: `duplicate_name`, `entries_locked`
pub async fn create_entry(wheel: Arc<WheelService>, request: CreateEntryRequest) -> Response {
    match wheel.add_entry(&request.name, request.color.as_deref()) {
        Ok(entry) => success_response(StatusCode::CREATED, entry),
        Err(err) => err.into_http_response(),
    }
}

/// Renames and recolors an entry. A blank or missing color keeps the old one.
pub async fn update_entry(
    wheel: Arc<WheelService>,
    entry_id: String,
    request: UpdateEntryRequest,
) -> Response {
    let color = request.color.as_deref().unwrap_or("");
    match wheel.update_entry(&entry_id, &request.name, color) {
        Ok(entry) => success_response(StatusCode::OK, entry),
        Err(err) => err.into_http_response(),
    }
}

pub async fn delete_entry(wheel: Arc<WheelService>, entry_id: String) -> Response {
    match wheel.remove_entry(&entry_id) {
        Ok(_) => reply::with_status(reply::reply(), StatusCode::NO_CONTENT).into_response(),
        Err(err) => err.into_http_response(),
    }
}
