use chrono::{SecondsFormat, Utc};
use namewheel_engine::events::WheelEvent;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio_stream::Stream;

// Bounded per subscriber; a subscriber that falls this far behind is dropped
const EVENT_CHANNEL_BUFFER: usize = 1000;

/// A wheel event as delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelEventEnvelope {
    /// Strictly increasing per bus
    pub sequence: u64,
    /// RFC3339 with milliseconds
    pub emitted_at: String,
    #[serde(flatten)]
    pub event: WheelEvent,
}

pub type EventSender = mpsc::Sender<WheelEventEnvelope>;
pub type EventReceiver = mpsc::Receiver<WheelEventEnvelope>;

pub struct EventSubscription {
    bus: EventBus,
    subscriber_id: usize,
    pub receiver: EventReceiver,
}

impl EventSubscription {
    pub fn receiver(&mut self) -> &mut EventReceiver {
        &mut self.receiver
    }
}

impl Stream for EventSubscription {
    type Item = WheelEventEnvelope;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.bus.unsubscribe(self.subscriber_id);
    }
}

/// Fan-out of wheel events to every connected client.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    inner: Arc<EventBusInner>,
}

#[derive(Debug, Default)]
struct EventBusInner {
    subscribers: RwLock<Vec<(usize, EventSender)>>,
    next_id: AtomicUsize,
    sequence: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> EventSubscription {
        let (subscriber_id, receiver) = self.subscribe_raw();
        EventSubscription {
            bus: self.clone(),
            subscriber_id,
            receiver,
        }
    }

    fn subscribe_raw(&self) -> (usize, EventReceiver) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_BUFFER);
        let id = self.inner.next_id.fetch_add(1, Ordering::AcqRel);
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, tx));

        tracing::info!(subscriber_id = id, "client subscribed to wheel events");

        (id, rx)
    }

    /// Stamps and sends `event` to all subscribers, returning the envelope.
    pub fn publish(&self, event: WheelEvent) -> WheelEventEnvelope {
        let envelope = WheelEventEnvelope {
            sequence: self.inner.sequence.fetch_add(1, Ordering::AcqRel) + 1,
            emitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            event,
        };

        tracing::debug!(
            sequence = envelope.sequence,
            event_type = envelope.event.name(),
            "broadcasting wheel event"
        );

        let subscribers = self
            .inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let mut failed = Vec::new();
        for (id, sender) in subscribers {
            // try_send never blocks the coordinator on a slow client
            if let Err(e) = sender.try_send(envelope.clone()) {
                tracing::warn!(
                    subscriber_id = id,
                    error = ?e,
                    "failed to send event to subscriber"
                );
                failed.push(id);
            }
        }
        if !failed.is_empty() {
            self.remove_subscribers(&failed);
        }

        envelope
    }

    pub fn unsubscribe(&self, subscriber_id: usize) {
        self.remove_subscribers(&[subscriber_id]);
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn remove_subscribers(&self, ids: &[usize]) {
        self.inner
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(id, _)| !ids.contains(id));
    }
}
