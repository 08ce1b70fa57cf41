use crate::errors::{ErrorSeverity, IntoErrorResponse};
use crate::events::EventBus;
use crate::scheduler::TokioScheduler;
use crate::settings::{SettingsError, SettingsStore};
use namewheel_engine::coordinator::SpinCoordinator;
use namewheel_engine::entry::{Entry, EntryList};
use namewheel_engine::errors::WheelError;
use namewheel_engine::events::WheelEvent;
use namewheel_engine::machine::{SpinPhase, WheelSnapshot};
use namewheel_engine::rotation::{RotationSource, SeededRotation};
use namewheel_engine::scheduler::TimerHandle;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard, Weak};
use thiserror::Error;
use tokio::sync::mpsc;

/// Wheel state plus the entries drawn on it, as served to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelView {
    #[serde(flatten)]
    pub snapshot: WheelSnapshot,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Error)]
pub enum WheelServiceError {
    #[error(transparent)]
    Wheel(#[from] WheelError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("Wheel state poisoned")]
    StoragePoisoned,
}

impl IntoErrorResponse for WheelServiceError {
    fn status_code(&self) -> warp::http::StatusCode {
        match self {
            WheelServiceError::Wheel(err) => err.status_code(),
            WheelServiceError::Settings(err) => err.status_code(),
            WheelServiceError::StoragePoisoned => warp::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            WheelServiceError::Wheel(err) => err.error_code(),
            WheelServiceError::Settings(err) => err.error_code(),
            WheelServiceError::StoragePoisoned => "wheel_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn error_details(&self) -> Option<serde_json::Value> {
        match self {
            WheelServiceError::Wheel(err) => err.error_details(),
            _ => None,
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            WheelServiceError::Wheel(err) => err.severity(),
            WheelServiceError::Settings(err) => err.severity(),
            WheelServiceError::StoragePoisoned => ErrorSeverity::Critical,
        }
    }
}

struct WheelState {
    entries: EntryList,
    coordinator: SpinCoordinator<TokioScheduler>,
}

/// The single shared wheel behind the HTTP API.
///
/// All access to the entries and the coordinator goes through one mutex. A
/// driver task receives fired timer handles and feeds them back in; it holds
/// only a weak reference, so dropping the last `Arc` tears the wheel down and
/// cancels outstanding timers.
pub struct WheelService {
    state: Mutex<WheelState>,
    event_bus: Arc<EventBus>,
    settings: Arc<SettingsStore>,
}

impl std::fmt::Debug for WheelService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WheelService").finish_non_exhaustive()
    }
}

impl WheelService {
    /// Default entries and an entropy-seeded rotation source.
    /// Must be called from inside a tokio runtime.
    pub fn new(event_bus: Arc<EventBus>, settings: Arc<SettingsStore>) -> Arc<Self> {
        let rotation = SeededRotation::from_entropy();
        tracing::info!(seed = rotation.seed(), "wheel rotation source seeded");
        Self::with_parts(
            event_bus,
            settings,
            EntryList::with_defaults(),
            Box::new(rotation),
        )
    }

    pub fn with_parts(
        event_bus: Arc<EventBus>,
        settings: Arc<SettingsStore>,
        entries: EntryList,
        rotation: Box<dyn RotationSource + Send>,
    ) -> Arc<Self> {
        let (fired_tx, fired_rx) = mpsc::unbounded_channel();
        let coordinator = SpinCoordinator::new(TokioScheduler::new(fired_tx), rotation);
        let service = Arc::new(Self {
            state: Mutex::new(WheelState {
                entries,
                coordinator,
            }),
            event_bus,
            settings,
        });
        tokio::spawn(Self::drive_timers(Arc::downgrade(&service), fired_rx));
        service
    }

    async fn drive_timers(service: Weak<Self>, mut fired: mpsc::UnboundedReceiver<TimerHandle>) {
        while let Some(handle) = fired.recv().await {
            let Some(service) = service.upgrade() else {
                break;
            };
            if let Err(err) = service.fire(handle) {
                tracing::error!(timer = handle.0, error = %err, "failed to handle fired timer");
            }
        }
        tracing::debug!("wheel timer driver stopped");
    }

    fn fire(&self, handle: TimerHandle) -> Result<(), WheelServiceError> {
        let mut state = self.lock()?;
        let events = state.coordinator.on_timer(handle)?;
        self.publish(events);
        Ok(())
    }

    pub fn event_bus(&self) -> Arc<EventBus> {
        Arc::clone(&self.event_bus)
    }

    pub fn settings(&self) -> Arc<SettingsStore> {
        Arc::clone(&self.settings)
    }

    pub fn view(&self) -> Result<WheelView, WheelServiceError> {
        let state = self.lock()?;
        Ok(WheelView {
            snapshot: state.coordinator.snapshot(),
            entries: state.entries.snapshot(),
        })
    }

    pub fn entries(&self) -> Result<Vec<Entry>, WheelServiceError> {
        Ok(self.lock()?.entries.snapshot())
    }

    pub fn add_entry(&self, name: &str, color: Option<&str>) -> Result<Entry, WheelServiceError> {
        let mut state = self.lock()?;
        Self::ensure_unlocked(&state)?;
        let entry = state.entries.add(name, color)?.clone();
        tracing::info!(entry_id = %entry.id, name = %entry.name, "entry added");
        Ok(entry)
    }

    pub fn update_entry(
        &self,
        id: &str,
        name: &str,
        color: &str,
    ) -> Result<Entry, WheelServiceError> {
        let mut state = self.lock()?;
        Self::ensure_unlocked(&state)?;
        let entry = state.entries.update(id, name, color)?.clone();
        tracing::info!(entry_id = %entry.id, name = %entry.name, "entry updated");
        Ok(entry)
    }

    pub fn remove_entry(&self, id: &str) -> Result<Entry, WheelServiceError> {
        let mut state = self.lock()?;
        Self::ensure_unlocked(&state)?;
        let entry = state.entries.remove(id)?;
        tracing::info!(entry_id = %entry.id, name = %entry.name, "entry removed");
        Ok(entry)
    }

    /// Starts a spin with the settings in force right now.
    pub fn spin(&self) -> Result<Vec<WheelEvent>, WheelServiceError> {
        let settings = self.settings.get()?;
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let events = state
            .coordinator
            .request_spin(&state.entries, &settings)?;
        self.publish(events.clone());
        Ok(events)
    }

    pub fn reset(&self) -> Result<Vec<WheelEvent>, WheelServiceError> {
        let mut state = self.lock()?;
        let events = state.coordinator.reset()?;
        self.publish(events.clone());
        Ok(events)
    }

    pub fn dismiss(&self) -> Result<Vec<WheelEvent>, WheelServiceError> {
        let mut state = self.lock()?;
        let events = state.coordinator.dismiss()?;
        self.publish(events.clone());
        Ok(events)
    }

    pub fn remove_winner(&self) -> Result<Vec<WheelEvent>, WheelServiceError> {
        let mut guard = self.lock()?;
        let state = &mut *guard;
        let events = state.coordinator.remove_winner(&mut state.entries)?;
        self.publish(events.clone());
        Ok(events)
    }

    fn ensure_unlocked(state: &WheelState) -> Result<(), WheelError> {
        if state.coordinator.phase() == SpinPhase::Spinning {
            return Err(WheelError::EntriesLocked);
        }
        Ok(())
    }

    fn publish(&self, events: Vec<WheelEvent>) {
        for event in events {
            tracing::info!(event_type = event.name(), spin_id = event.spin_id(), "wheel event");
            self.event_bus.publish(event);
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, WheelState>, WheelServiceError> {
        self.state
            .lock()
            .map_err(|_| WheelServiceError::StoragePoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namewheel_engine::rotation::FixedRotation;
    use std::time::Duration;

    fn service(deltas: &[f64]) -> Arc<WheelService> {
        WheelService::with_parts(
            Arc::new(EventBus::new()),
            Arc::new(SettingsStore::new()),
            EntryList::with_defaults(),
            Box::new(FixedRotation::new(deltas.to_vec())),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn timers_drive_the_reveal() {
        let wheel = service(&[1890.0]);
        let mut sub = wheel.event_bus().subscribe();

        wheel.spin().expect("spin");
        assert!(wheel.view().expect("view").snapshot.is_spinning);

        tokio::time::sleep(Duration::from_millis(6200)).await;

        let view = wheel.view().expect("view");
        assert_eq!(view.snapshot.winner.as_deref(), Some("Frank"));
        assert!(view.snapshot.announcement_open);

        let mut seen = Vec::new();
        while let Ok(envelope) = sub.receiver.try_recv() {
            seen.push(envelope.event.name());
        }
        assert_eq!(
            seen,
            ["spin_started", "winner_selected", "reveal_started", "tone_requested"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn entries_are_locked_while_spinning() {
        let wheel = service(&[1890.0]);
        wheel.spin().expect("spin");

        let err = wheel.add_entry("Grace", None).expect_err("locked");
        assert!(matches!(
            err,
            WheelServiceError::Wheel(WheelError::EntriesLocked)
        ));
        assert!(wheel.remove_entry("1").is_err());

        tokio::time::sleep(Duration::from_secs(7)).await;
        wheel.add_entry("Grace", None).expect("unlocked after spin");
    }

    #[tokio::test(start_paused = true)]
    async fn reset_mid_spin_discards_the_timer() {
        let wheel = service(&[1890.0]);
        wheel.spin().expect("spin");
        tokio::time::sleep(Duration::from_secs(1)).await;
        wheel.reset().expect("reset");

        tokio::time::sleep(Duration::from_secs(10)).await;
        let view = wheel.view().expect("view");
        assert_eq!(view.snapshot.phase, SpinPhase::Idle);
        assert_eq!(view.snapshot.winner, None);
        assert_eq!(view.snapshot.rotation, 0.0);
    }
}
