//! # namewheel-engine: Wheel of Names Core
//!
//! Deterministic winner selection and spin sequencing for a "wheel of names"
//! picker. Maps a random rotation to the entry under the pointer and drives
//! the timed spin → reveal → celebration sequence on an injectable clock.
//!
//! ## Core Modules
//!
//! - [`entry`] - Entry model and the ordered, validated entry list
//! - [`selection`] - Rotation → winning index mapping
//! - [`rotation`] - Seeded ChaCha20 rotation source and a fixed test source
//! - [`scheduler`] - One-shot timer abstraction and a simulated clock
//! - [`machine`] - Pure spin state machine returning effects
//! - [`coordinator`] - Executes machine effects against a scheduler
//! - [`settings`] - Sound and spin duration settings
//! - [`events`] - Events emitted to renderers
//! - [`errors`] - Error types for wheel operations
//!
//! ## Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use namewheel_engine::coordinator::SpinCoordinator;
//! use namewheel_engine::entry::EntryList;
//! use namewheel_engine::settings::WheelSettings;
//!
//! let entries = EntryList::with_defaults();
//! let settings = WheelSettings::default();
//! let mut wheel = SpinCoordinator::manual(42);
//!
//! wheel.request_spin(&entries, &settings).unwrap();
//! wheel.advance(Duration::from_secs(7)).unwrap();
//!
//! let snapshot = wheel.snapshot();
//! assert!(snapshot.winner.is_some());
//! assert!(snapshot.announcement_open);
//! ```
//!
//! ## Deterministic Spins
//!
//! The same seed always produces the same rotations and therefore the same
//! winners:
//!
//! ```rust
//! use namewheel_engine::rotation::{RotationSource, SeededRotation};
//!
//! let mut a = SeededRotation::new_with_seed(7);
//! let mut b = SeededRotation::new_with_seed(7);
//! assert_eq!(a.next_delta(), b.next_delta());
//! ```
//!
//! ## Winner Selection
//!
//! ```rust
//! use namewheel_engine::selection::select_winner;
//!
//! // A quarter turn on a four-slice wheel puts the last slice under the pointer
//! assert_eq!(select_winner(90.0, 4).unwrap(), 3);
//! ```

pub mod coordinator;
pub mod entry;
pub mod errors;
pub mod events;
pub mod machine;
pub mod rotation;
pub mod scheduler;
pub mod selection;
pub mod settings;

pub use coordinator::SpinCoordinator;
pub use entry::{Entry, EntryId, EntryList};
pub use errors::WheelError;
pub use events::WheelEvent;
pub use machine::{SpinPhase, SpinSession, WheelSnapshot};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TimerKind};
pub use settings::WheelSettings;
