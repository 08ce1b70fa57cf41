use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::WheelError;

pub const MIN_SPIN_DURATION_SECS: f64 = 3.0;
pub const MAX_SPIN_DURATION_SECS: f64 = 6.0;
pub const DEFAULT_SPIN_DURATION_SECS: f64 = 6.0;

/// User-tunable wheel behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WheelSettings {
    pub sound_enabled: bool,
    pub spin_duration_secs: f64,
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            sound_enabled: true,
            spin_duration_secs: DEFAULT_SPIN_DURATION_SECS,
        }
    }
}

impl WheelSettings {
    pub fn validate(&self) -> Result<(), WheelError> {
        validate_spin_duration(self.spin_duration_secs)
    }

    pub fn spin_duration(&self) -> Duration {
        Duration::from_secs_f64(
            self.spin_duration_secs
                .clamp(MIN_SPIN_DURATION_SECS, MAX_SPIN_DURATION_SECS),
        )
    }
}

pub fn validate_spin_duration(secs: f64) -> Result<(), WheelError> {
    if !secs.is_finite() {
        return Err(WheelError::InvalidSetting(
            "spin_duration_secs must be a finite number".to_string(),
        ));
    }
    if !(MIN_SPIN_DURATION_SECS..=MAX_SPIN_DURATION_SECS).contains(&secs) {
        return Err(WheelError::InvalidSetting(format!(
            "spin_duration_secs must be between {} and {} (got {})",
            MIN_SPIN_DURATION_SECS, MAX_SPIN_DURATION_SECS, secs
        )));
    }
    Ok(())
}
