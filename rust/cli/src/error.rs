//! Error types for the CLI application.
//!
//! Every command handler returns `Result<(), CliError>`; [`crate::run`] turns
//! the result into a process exit code with [`CliError::exit_code`].

use std::fmt;

use namewheel_engine::errors::WheelError;

use crate::config::ConfigError;

/// Exit code for a command that completed.
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for usage errors and failed commands.
pub const EXIT_ERROR: i32 = 2;

#[derive(Debug)]
pub enum CliError {
    /// I/O error (stdout/stderr writes, config file reads)
    Io(std::io::Error),

    /// Invalid user input or command-line arguments
    InvalidInput(String),

    /// Configuration error
    Config(String),

    /// Rejected by the wheel engine
    Wheel(WheelError),
}

impl CliError {
    /// Every failure exits with [`EXIT_ERROR`]; the message tells them apart.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Io(_)
            | CliError::InvalidInput(_)
            | CliError::Config(_)
            | CliError::Wheel(_) => EXIT_ERROR,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Wheel(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Wheel(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<WheelError> for CliError {
    fn from(error: WheelError) -> Self {
        CliError::Wheel(error)
    }
}

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(error: serde_json::Error) -> Self {
        CliError::Io(std::io::Error::other(error))
    }
}
