use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entry::{Entry, EntryId};
use crate::errors::WheelError;
use crate::events::WheelEvent;
use crate::scheduler::TimerKind;
use crate::selection::select_winner;

/// Pause between fixing the winner and opening the announcement.
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);
/// How long the celebration runs before clearing itself.
pub const CELEBRATION_LIFETIME: Duration = Duration::from_secs(3);

/// Coarse state of the wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpinPhase {
    /// Ready for a spin
    Idle,
    /// Animation in flight, winner not yet known
    Spinning,
    /// Winner fixed, announcement pending or open
    Revealing,
}

impl fmt::Display for SpinPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SpinPhase::Idle => "idle",
            SpinPhase::Spinning => "spinning",
            SpinPhase::Revealing => "revealing",
        };
        f.write_str(s)
    }
}

/// One spin, from request until it is dismissed, reset or its winner removed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinSession {
    pub spin_id: u64,
    pub start_rotation: f64,
    pub delta: f64,
    pub total_rotation: f64,
    pub duration: Duration,
    /// Entries in slice order as they were when the spin began
    pub entries: Vec<Entry>,
    pub sound_enabled: bool,
}

/// Everything the machine reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinInput {
    Spin {
        entries: Vec<Entry>,
        delta: f64,
        duration: Duration,
        sound_enabled: bool,
    },
    SpinElapsed,
    SettleElapsed,
    CelebrationElapsed,
    Dismiss,
    Reset,
    RemoveWinner,
}

/// Work the machine asks its owner to carry out.
#[derive(Debug, Clone, PartialEq)]
pub enum SpinEffect {
    Schedule { kind: TimerKind, delay: Duration },
    Cancel(TimerKind),
    Emit(WheelEvent),
    /// Remove this entry from the live entry list
    Excise(EntryId),
}

/// Observable wheel state for renderers and API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSnapshot {
    pub phase: SpinPhase,
    pub is_spinning: bool,
    /// Cumulative rotation the wheel is (or is heading) at
    pub rotation: f64,
    pub duration_ms: u64,
    pub spin_id: Option<u64>,
    pub winner: Option<String>,
    pub winner_id: Option<EntryId>,
    pub announcement_open: bool,
    pub celebrating: bool,
}

/// Pure spin state machine. Holds no timers and does no IO; every
/// transition returns the effects to execute.
#[derive(Debug, Clone)]
pub struct SpinMachine {
    phase: SpinPhase,
    rotation: f64,
    last_duration: Duration,
    next_spin_id: u64,
    session: Option<SpinSession>,
    winner: Option<(u64, Entry)>,
    announcement_open: bool,
    celebration: Option<u64>,
}

impl Default for SpinMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpinMachine {
    pub fn new() -> Self {
        Self {
            phase: SpinPhase::Idle,
            rotation: 0.0,
            last_duration: Duration::ZERO,
            next_spin_id: 1,
            session: None,
            winner: None,
            announcement_open: false,
            celebration: None,
        }
    }

    pub fn phase(&self) -> SpinPhase {
        self.phase
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn session(&self) -> Option<&SpinSession> {
        self.session.as_ref()
    }

    pub fn winner(&self) -> Option<&Entry> {
        self.winner.as_ref().map(|(_, e)| e)
    }

    pub fn is_celebrating(&self) -> bool {
        self.celebration.is_some()
    }

    pub fn is_announcement_open(&self) -> bool {
        self.announcement_open
    }

    /// Guard for a spin request, checked before any randomness is drawn.
    pub fn check_spin(&self, entry_count: usize) -> Result<(), WheelError> {
        if self.phase != SpinPhase::Idle {
            return Err(WheelError::NotIdle(self.phase));
        }
        if entry_count == 0 {
            return Err(WheelError::EmptyEntrySet);
        }
        Ok(())
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        WheelSnapshot {
            phase: self.phase,
            is_spinning: self.phase == SpinPhase::Spinning,
            rotation: self.rotation,
            duration_ms: self.last_duration.as_millis() as u64,
            spin_id: self
                .session
                .as_ref()
                .map(|s| s.spin_id)
                .or(self.winner.as_ref().map(|(id, _)| *id)),
            winner: self.winner().map(|e| e.name.clone()),
            winner_id: self.winner().map(|e| e.id.clone()),
            announcement_open: self.announcement_open,
            celebrating: self.is_celebrating(),
        }
    }

    pub fn transition(&mut self, input: SpinInput) -> Result<Vec<SpinEffect>, WheelError> {
        match input {
            SpinInput::Spin {
                entries,
                delta,
                duration,
                sound_enabled,
            } => self.start_spin(entries, delta, duration, sound_enabled),
            SpinInput::SpinElapsed => self.finish_spin(),
            SpinInput::SettleElapsed => Ok(self.reveal()),
            SpinInput::CelebrationElapsed => Ok(self.end_celebration()),
            SpinInput::Dismiss => Ok(self.dismiss()),
            SpinInput::Reset => Ok(self.reset()),
            SpinInput::RemoveWinner => self.remove_winner(),
        }
    }

    fn start_spin(
        &mut self,
        entries: Vec<Entry>,
        delta: f64,
        duration: Duration,
        sound_enabled: bool,
    ) -> Result<Vec<SpinEffect>, WheelError> {
        self.check_spin(entries.len())?;

        let mut effects = Vec::new();
        if self.celebration.take().is_some() {
            effects.push(SpinEffect::Cancel(TimerKind::CelebrationElapsed));
        }
        self.winner = None;
        self.announcement_open = false;

        let spin_id = self.next_spin_id;
        self.next_spin_id += 1;
        let start_rotation = self.rotation;
        let total_rotation = start_rotation + delta;
        let entry_count = entries.len();

        self.rotation = total_rotation;
        self.last_duration = duration;
        self.phase = SpinPhase::Spinning;
        self.session = Some(SpinSession {
            spin_id,
            start_rotation,
            delta,
            total_rotation,
            duration,
            entries,
            sound_enabled,
        });

        effects.push(SpinEffect::Schedule {
            kind: TimerKind::SpinElapsed,
            delay: duration,
        });
        effects.push(SpinEffect::Emit(WheelEvent::SpinStarted {
            spin_id,
            from_rotation: start_rotation,
            delta,
            rotation: total_rotation,
            duration_ms: duration.as_millis() as u64,
            entry_count,
        }));
        Ok(effects)
    }

    fn finish_spin(&mut self) -> Result<Vec<SpinEffect>, WheelError> {
        if self.phase != SpinPhase::Spinning {
            return Ok(Vec::new());
        }
        let Some(session) = self.session.as_ref() else {
            return Ok(Vec::new());
        };
        let index = select_winner(session.total_rotation, session.entries.len())?;
        let entry = session.entries[index].clone();
        let spin_id = session.spin_id;

        self.winner = Some((spin_id, entry.clone()));
        self.phase = SpinPhase::Revealing;

        Ok(vec![
            SpinEffect::Emit(WheelEvent::WinnerSelected {
                spin_id,
                index,
                entry,
            }),
            SpinEffect::Schedule {
                kind: TimerKind::SettleElapsed,
                delay: SETTLE_DELAY,
            },
        ])
    }

    fn reveal(&mut self) -> Vec<SpinEffect> {
        if self.phase != SpinPhase::Revealing || self.announcement_open {
            return Vec::new();
        }
        let (Some(session), Some((_, winner))) = (self.session.as_ref(), self.winner.as_ref())
        else {
            return Vec::new();
        };
        let spin_id = session.spin_id;
        let sound_enabled = session.sound_enabled;
        let winner = winner.clone();

        self.announcement_open = true;
        self.celebration = Some(spin_id);

        let mut effects = vec![
            SpinEffect::Emit(WheelEvent::RevealStarted { spin_id, winner }),
            SpinEffect::Schedule {
                kind: TimerKind::CelebrationElapsed,
                delay: CELEBRATION_LIFETIME,
            },
        ];
        if sound_enabled {
            effects.push(SpinEffect::Emit(WheelEvent::ToneRequested { spin_id }));
        }
        effects
    }

    fn end_celebration(&mut self) -> Vec<SpinEffect> {
        match self.celebration.take() {
            Some(spin_id) => vec![SpinEffect::Emit(WheelEvent::CelebrationEnded { spin_id })],
            None => Vec::new(),
        }
    }

    fn dismiss(&mut self) -> Vec<SpinEffect> {
        if self.phase != SpinPhase::Revealing {
            return Vec::new();
        }
        let spin_id = self.session.take().map(|s| s.spin_id).unwrap_or_default();
        self.phase = SpinPhase::Idle;
        self.announcement_open = false;
        vec![
            SpinEffect::Cancel(TimerKind::SettleElapsed),
            SpinEffect::Emit(WheelEvent::AnnouncementClosed { spin_id }),
        ]
    }

    fn reset(&mut self) -> Vec<SpinEffect> {
        self.phase = SpinPhase::Idle;
        self.rotation = 0.0;
        self.session = None;
        self.winner = None;
        self.announcement_open = false;
        self.celebration = None;
        vec![
            SpinEffect::Cancel(TimerKind::SpinElapsed),
            SpinEffect::Cancel(TimerKind::SettleElapsed),
            SpinEffect::Cancel(TimerKind::CelebrationElapsed),
            SpinEffect::Emit(WheelEvent::WheelReset { rotation: 0.0 }),
        ]
    }

    fn remove_winner(&mut self) -> Result<Vec<SpinEffect>, WheelError> {
        let (_, entry) = self.winner.take().ok_or(WheelError::NoWinner)?;
        self.phase = SpinPhase::Idle;
        self.session = None;
        self.announcement_open = false;
        Ok(vec![
            SpinEffect::Cancel(TimerKind::SettleElapsed),
            SpinEffect::Emit(WheelEvent::WinnerRemoved {
                entry: entry.clone(),
            }),
            SpinEffect::Excise(entry.id),
        ])
    }
}
