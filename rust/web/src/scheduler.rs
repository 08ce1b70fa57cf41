use namewheel_engine::scheduler::{Scheduler, TimerHandle, TimerKind};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Timers backed by tokio tasks.
///
/// Each timer sleeps in its own task and sends its handle on the channel when
/// it fires. Cancelling aborts the task. Must be used from inside a tokio
/// runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    fired: mpsc::UnboundedSender<TimerHandle>,
    next_handle: u64,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
}

impl TokioScheduler {
    pub fn new(fired: mpsc::UnboundedSender<TimerHandle>) -> Self {
        Self {
            fired,
            next_handle: 0,
            tasks: HashMap::new(),
        }
    }

    /// Timers armed and not yet finished or cancelled.
    pub fn active(&self) -> usize {
        self.tasks.values().filter(|t| !t.is_finished()).count()
    }
}

impl Scheduler for TokioScheduler {
    fn after(&mut self, delay: Duration, kind: TimerKind) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());

        self.next_handle += 1;
        let handle = TimerHandle(self.next_handle);
        let fired = self.fired.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::trace!(timer = handle.0, kind = ?kind, "timer fired");
            // Receiver gone means the wheel was torn down
            let _ = fired.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
