use crate::machine::SpinPhase;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WheelError {
    #[error("Add some entries first!")]
    EmptyEntrySet,
    #[error("Invalid entry count: {0} (must be greater than zero)")]
    InvalidEntryCount(usize),
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Name already exists: {0}")]
    DuplicateName(String),
    #[error("Entry not found: {0}")]
    EntryNotFound(String),
    #[error("Entries cannot be changed while the wheel is spinning")]
    EntriesLocked,
    #[error("Wheel is not idle (currently {0})")]
    NotIdle(SpinPhase),
    #[error("No winner to remove")]
    NoWinner,
    #[error("Invalid setting: {0}")]
    InvalidSetting(String),
}
