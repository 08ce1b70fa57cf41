use super::success_response;
use crate::errors::IntoErrorResponse;
use crate::settings::SettingsStore;
use serde::Deserialize;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::reply::Response;

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub sound_enabled: Option<bool>,
    pub spin_duration_secs: Option<f64>,
}

/// Get current settings
pub async fn get_settings(store: Arc<SettingsStore>) -> Response {
    match store.get() {
        Ok(settings) => success_response(StatusCode::OK, settings),
        Err(err) => err.into_http_response(),
    }
}

/// Update the fields present in the request; absent fields keep their value.
/// Takes effect from the next spin.
pub async fn update_settings(
    store: Arc<SettingsStore>,
    request: UpdateSettingsRequest,
) -> Response {
    match store.patch(request.sound_enabled, request.spin_duration_secs) {
        Ok(settings) => success_response(StatusCode::OK, settings),
        Err(err) => err.into_http_response(),
    }
}

/// Reset settings to defaults
pub async fn reset_settings(store: Arc<SettingsStore>) -> Response {
    match store.reset() {
        Ok(settings) => success_response(StatusCode::OK, settings),
        Err(err) => err.into_http_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use namewheel_engine::settings::WheelSettings;

    #[tokio::test]
    async fn get_settings_returns_current_settings() {
        let store = Arc::new(SettingsStore::new());
        let response = get_settings(store).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn update_settings_modifies_values() {
        let store = Arc::new(SettingsStore::new());
        let request = UpdateSettingsRequest {
            sound_enabled: Some(false),
            spin_duration_secs: Some(4.0),
        };

        let response = update_settings(store.clone(), request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let settings = store.get().expect("get settings");
        assert!(!settings.sound_enabled);
        assert_eq!(settings.spin_duration_secs, 4.0);
    }

    #[tokio::test]
    async fn update_settings_validates_input() {
        let store = Arc::new(SettingsStore::new());
        let request = UpdateSettingsRequest {
            sound_enabled: Some(false),
            spin_duration_secs: Some(12.0),
        };

        let response = update_settings(store.clone(), request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Rejected update leaves every field untouched
        let settings = store.get().expect("get settings");
        assert_eq!(settings, WheelSettings::default());
    }

    #[tokio::test]
    async fn partial_update_preserves_other_fields() {
        let store = Arc::new(SettingsStore::new());
        let request = UpdateSettingsRequest {
            sound_enabled: None,
            spin_duration_secs: Some(3.0),
        };

        update_settings(store.clone(), request).await;

        let settings = store.get().expect("get settings");
        assert!(settings.sound_enabled);
        assert_eq!(settings.spin_duration_secs, 3.0);
    }

    #[tokio::test]
    async fn reset_settings_restores_defaults() {
        let store = Arc::new(SettingsStore::new());
        store.patch(Some(false), Some(5.0)).expect("patch");

        let response = reset_settings(store.clone()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(store.get().expect("get"), WheelSettings::default());
    }
}
