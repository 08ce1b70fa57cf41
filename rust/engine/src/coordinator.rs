use std::collections::HashMap;
use std::time::Duration;

use crate::entry::EntryList;
use crate::errors::WheelError;
use crate::events::WheelEvent;
use crate::machine::{SpinEffect, SpinInput, SpinMachine, SpinPhase, WheelSnapshot};
use crate::rotation::{RotationSource, SeededRotation};
use crate::scheduler::{ManualScheduler, Scheduler, TimerHandle, TimerKind};
use crate::settings::WheelSettings;

/// Drives a [`SpinMachine`] against a real or simulated clock.
///
/// The coordinator owns the timers the machine asks for. When a scheduler
/// reports a fired timer via [`SpinCoordinator::on_timer`], only the handle
/// currently pending for that timer kind is honoured, so a late firing from a
/// reset or superseded session has no effect.
pub struct SpinCoordinator<S: Scheduler> {
    machine: SpinMachine,
    scheduler: S,
    rotation: Box<dyn RotationSource + Send>,
    pending: HashMap<TimerKind, TimerHandle>,
}

impl<S: Scheduler> SpinCoordinator<S> {
    pub fn new(scheduler: S, rotation: Box<dyn RotationSource + Send>) -> Self {
        Self {
            machine: SpinMachine::new(),
            scheduler,
            rotation,
            pending: HashMap::new(),
        }
    }

    pub fn with_seed(scheduler: S, seed: u64) -> Self {
        Self::new(scheduler, Box::new(SeededRotation::new_with_seed(seed)))
    }

    pub fn phase(&self) -> SpinPhase {
        self.machine.phase()
    }

    pub fn machine(&self) -> &SpinMachine {
        &self.machine
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        self.machine.snapshot()
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn is_pending(&self, kind: TimerKind) -> bool {
        self.pending.contains_key(&kind)
    }

    /// Starts a spin over the current entries.
    ///
    /// Rejected with no state change (and no rotation drawn) when the wheel
    /// is not idle or there are no entries.
    pub fn request_spin(
        &mut self,
        entries: &EntryList,
        settings: &WheelSettings,
    ) -> Result<Vec<WheelEvent>, WheelError> {
        self.machine.check_spin(entries.len())?;
        let delta = self.rotation.next_delta();
        let effects = self.machine.transition(SpinInput::Spin {
            entries: entries.snapshot(),
            delta,
            duration: settings.spin_duration(),
            sound_enabled: settings.sound_enabled,
        })?;
        Ok(self.apply(effects, None))
    }

    /// Handles a fired timer. Unknown or stale handles are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) -> Result<Vec<WheelEvent>, WheelError> {
        let Some(kind) = self
            .pending
            .iter()
            .find_map(|(kind, h)| (*h == handle).then_some(*kind))
        else {
            return Ok(Vec::new());
        };
        self.pending.remove(&kind);
        let input = match kind {
            TimerKind::SpinElapsed => SpinInput::SpinElapsed,
            TimerKind::SettleElapsed => SpinInput::SettleElapsed,
            TimerKind::CelebrationElapsed => SpinInput::CelebrationElapsed,
        };
        let effects = self.machine.transition(input)?;
        Ok(self.apply(effects, None))
    }

    pub fn reset(&mut self) -> Result<Vec<WheelEvent>, WheelError> {
        let effects = self.machine.transition(SpinInput::Reset)?;
        Ok(self.apply(effects, None))
    }

    pub fn dismiss(&mut self) -> Result<Vec<WheelEvent>, WheelError> {
        let effects = self.machine.transition(SpinInput::Dismiss)?;
        Ok(self.apply(effects, None))
    }

    /// Removes the current winner from `entries`. An entry already deleted
    /// from the list is not an error; the winner is still cleared.
    pub fn remove_winner(&mut self, entries: &mut EntryList) -> Result<Vec<WheelEvent>, WheelError> {
        let effects = self.machine.transition(SpinInput::RemoveWinner)?;
        Ok(self.apply(effects, Some(entries)))
    }

    /// Cancels every pending timer.
    pub fn teardown(&mut self) {
        for (_, handle) in self.pending.drain() {
            self.scheduler.cancel(handle);
        }
    }

    fn apply(&mut self, effects: Vec<SpinEffect>, mut entries: Option<&mut EntryList>) -> Vec<WheelEvent> {
        let mut events = Vec::new();
        for effect in effects {
            match effect {
                SpinEffect::Schedule { kind, delay } => {
                    if let Some(old) = self.pending.remove(&kind) {
                        self.scheduler.cancel(old);
                    }
                    let handle = self.scheduler.after(delay, kind);
                    self.pending.insert(kind, handle);
                }
                SpinEffect::Cancel(kind) => {
                    if let Some(handle) = self.pending.remove(&kind) {
                        self.scheduler.cancel(handle);
                    }
                }
                SpinEffect::Emit(event) => events.push(event),
                SpinEffect::Excise(id) => {
                    if let Some(list) = entries.as_deref_mut() {
                        let _ = list.remove(&id);
                    }
                }
            }
        }
        events
    }
}

impl<S: Scheduler> Drop for SpinCoordinator<S> {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl SpinCoordinator<ManualScheduler> {
    /// Coordinator on a simulated clock starting at zero.
    pub fn manual(seed: u64) -> Self {
        Self::with_seed(ManualScheduler::new(), seed)
    }

    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Moves the simulated clock forward by `by`, firing every timer that
    /// falls due in the window in deadline order. Timers armed by an earlier
    /// firing also fire if their deadline is inside the window.
    pub fn advance(&mut self, by: Duration) -> Result<Vec<WheelEvent>, WheelError> {
        let until = self.scheduler.now() + by;
        let mut events = Vec::new();
        while let Some((handle, _)) = self.scheduler.pop_due(until) {
            events.extend(self.on_timer(handle)?);
        }
        self.scheduler.set_now(until);
        Ok(events)
    }
}

impl<S: Scheduler> std::fmt::Debug for SpinCoordinator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpinCoordinator")
            .field("machine", &self.machine)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}
