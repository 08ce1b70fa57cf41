use serde::{Deserialize, Serialize};

use crate::entry::Entry;

/// Observable output of the spin coordinator, in the order it happened.
/// Serialized with a `type` tag for event streams and CLI output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WheelEvent {
    /// Renderer should animate from `from_rotation` to `rotation` over `duration_ms`
    SpinStarted {
        spin_id: u64,
        from_rotation: f64,
        /// Degrees added by this spin, in [1800, 3600)
        delta: f64,
        /// Cumulative target rotation
        rotation: f64,
        duration_ms: u64,
        entry_count: usize,
    },
    /// The nominal duration elapsed and the winner is fixed
    WinnerSelected {
        spin_id: u64,
        index: usize,
        entry: Entry,
    },
    /// Announcement opened and celebration started
    RevealStarted { spin_id: u64, winner: Entry },
    /// Play the short celebratory tone once
    ToneRequested { spin_id: u64 },
    /// Celebration lifetime ran out
    CelebrationEnded { spin_id: u64 },
    /// Announcement dismissed; the winner stays highlighted
    AnnouncementClosed { spin_id: u64 },
    WheelReset { rotation: f64 },
    WinnerRemoved { entry: Entry },
}

impl WheelEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WheelEvent::SpinStarted { .. } => "spin_started",
            WheelEvent::WinnerSelected { .. } => "winner_selected",
            WheelEvent::RevealStarted { .. } => "reveal_started",
            WheelEvent::ToneRequested { .. } => "tone_requested",
            WheelEvent::CelebrationEnded { .. } => "celebration_ended",
            WheelEvent::AnnouncementClosed { .. } => "announcement_closed",
            WheelEvent::WheelReset { .. } => "wheel_reset",
            WheelEvent::WinnerRemoved { .. } => "winner_removed",
        }
    }

    /// Session the event belongs to; reset and removal are not tied to one.
    pub fn spin_id(&self) -> Option<u64> {
        match self {
            WheelEvent::SpinStarted { spin_id, .. }
            | WheelEvent::WinnerSelected { spin_id, .. }
            | WheelEvent::RevealStarted { spin_id, .. }
            | WheelEvent::ToneRequested { spin_id }
            | WheelEvent::CelebrationEnded { spin_id }
            | WheelEvent::AnnouncementClosed { spin_id } => Some(*spin_id),
            WheelEvent::WheelReset { .. } | WheelEvent::WinnerRemoved { .. } => None,
        }
    }
}
