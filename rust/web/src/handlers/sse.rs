use crate::events::{EventSubscription, WheelEventEnvelope};
use crate::wheel::{WheelService, WheelView};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio_stream::StreamExt;
use warp::http;
use warp::reply::{self, Response};
use warp::sse;
use warp::Reply;

/// Streams wheel events as `wheel_event` messages.
///
/// The first message is a `wheel_state` snapshot so a client joining
/// mid-spin can draw the wheel before the next event arrives.
pub async fn stream_events(wheel: Arc<WheelService>) -> Response {
    let subscription = wheel.event_bus().subscribe();
    let initial = match wheel.view() {
        Ok(view) => Some(render_state(&view)),
        Err(err) => {
            tracing::warn!(error = %err, "could not snapshot wheel for new subscriber");
            None
        }
    };

    let stream = tokio_stream::iter(initial.map(Ok::<_, Infallible>))
        .chain(subscription_stream(subscription));
    let keep_alive = sse::keep_alive()
        .interval(Duration::from_secs(15))
        .text(":keep-alive\n");

    let reply = sse::reply(keep_alive.stream(stream));
    reply::with_header(reply, http::header::CACHE_CONTROL, "no-cache").into_response()
}

fn subscription_stream(
    subscription: EventSubscription,
) -> impl tokio_stream::Stream<Item = Result<sse::Event, Infallible>> {
    subscription.map(|envelope| Ok(render_event(&envelope)))
}

fn render_state(view: &WheelView) -> sse::Event {
    match serde_json::to_string(view) {
        Ok(json) => sse::Event::default().event("wheel_state").data(json),
        Err(err) => render_failure("wheel_state", err),
    }
}

fn render_event(envelope: &WheelEventEnvelope) -> sse::Event {
    match serde_json::to_string(envelope) {
        Ok(json) => sse::Event::default()
            .event("wheel_event")
            .id(envelope.sequence.to_string())
            .data(json),
        Err(err) => render_failure("wheel_event", err),
    }
}

fn render_failure(name: &str, err: serde_json::Error) -> sse::Event {
    let fallback = serde_json::json!({
        "type": "error",
        "message": format!("failed to serialize {name}: {err}")
    })
    .to_string();
    sse::Event::default().event(name.to_string()).data(fallback)
}
