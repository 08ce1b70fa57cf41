use namewheel_engine::errors::WheelError;
use namewheel_engine::settings::WheelSettings;
use std::sync::RwLock;
use thiserror::Error;

/// In-memory settings store with validation
#[derive(Debug)]
pub struct SettingsStore {
    settings: RwLock<WheelSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self {
            settings: RwLock::new(WheelSettings::default()),
        }
    }

    pub fn with_settings(settings: WheelSettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self {
            settings: RwLock::new(settings),
        })
    }

    pub fn get(&self) -> Result<WheelSettings, SettingsError> {
        self.settings
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| SettingsError::StoragePoisoned)
    }

    /// Replaces the settings if they validate; otherwise nothing changes.
    pub fn update(&self, new_settings: WheelSettings) -> Result<WheelSettings, SettingsError> {
        new_settings.validate()?;

        let mut guard = self
            .settings
            .write()
            .map_err(|_| SettingsError::StoragePoisoned)?;
        *guard = new_settings.clone();
        Ok(new_settings)
    }

    /// Applies the given fields on top of the current settings.
    ///
    /// Read, validation and store happen under a single write guard.
    pub fn patch(
        &self,
        sound_enabled: Option<bool>,
        spin_duration_secs: Option<f64>,
    ) -> Result<WheelSettings, SettingsError> {
        let mut guard = self
            .settings
            .write()
            .map_err(|_| SettingsError::StoragePoisoned)?;

        let mut next = guard.clone();
        if let Some(sound) = sound_enabled {
            next.sound_enabled = sound;
        }
        if let Some(secs) = spin_duration_secs {
            next.spin_duration_secs = secs;
        }
        next.validate()?;

        *guard = next.clone();
        Ok(next)
    }

    pub fn reset(&self) -> Result<WheelSettings, SettingsError> {
        self.update(WheelSettings::default())
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
    #[error("Settings storage poisoned")]
    StoragePoisoned,
}

impl From<WheelError> for SettingsError {
    fn from(err: WheelError) -> Self {
        match err {
            WheelError::InvalidSetting(msg) => SettingsError::InvalidValue(msg),
            other => SettingsError::InvalidValue(other.to_string()),
        }
    }
}

impl crate::errors::IntoErrorResponse for SettingsError {
    fn status_code(&self) -> warp::http::StatusCode {
        use warp::http::StatusCode;
        match self {
            SettingsError::InvalidValue(_) => StatusCode::BAD_REQUEST,
            SettingsError::StoragePoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            SettingsError::InvalidValue(_) => "invalid_setting",
            SettingsError::StoragePoisoned => "settings_storage_error",
        }
    }

    fn error_message(&self) -> String {
        self.to_string()
    }

    fn severity(&self) -> crate::errors::ErrorSeverity {
        use crate::errors::ErrorSeverity;
        match self {
            SettingsError::StoragePoisoned => ErrorSeverity::Critical,
            SettingsError::InvalidValue(_) => ErrorSeverity::Client,
        }
    }
}
