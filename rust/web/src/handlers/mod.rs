pub mod entries;
pub mod health;
pub mod settings;
pub mod sse;
pub mod wheel;

use serde::Serialize;
use warp::http::StatusCode;
use warp::reply::{self, Response};
use warp::Reply;

pub use entries::{
    create_entry, delete_entry, list_entries, update_entry, CreateEntryRequest, UpdateEntryRequest,
};
pub use health::health;
pub use settings::{get_settings, reset_settings, update_settings, UpdateSettingsRequest};
pub use sse::stream_events;
pub use wheel::{dismiss, get_wheel, remove_winner, reset, spin, WheelActionResponse};

pub(crate) fn success_response<T>(status: StatusCode, body: T) -> Response
where
    T: Serialize,
{
    reply::with_status(reply::json(&body), status).into_response()
}
