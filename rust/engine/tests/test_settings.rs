use std::time::Duration;

use namewheel_engine::errors::WheelError;
use namewheel_engine::settings::{validate_spin_duration, WheelSettings};

#[test]
fn defaults_match_first_load() {
    let s = WheelSettings::default();
    assert!(s.sound_enabled);
    assert_eq!(s.spin_duration_secs, 6.0);
    assert_eq!(s.spin_duration(), Duration::from_secs(6));
    assert!(s.validate().is_ok());
}

#[test]
fn duration_outside_range_is_invalid() {
    for bad in [2.99, 6.01, 0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(
            matches!(validate_spin_duration(bad), Err(WheelError::InvalidSetting(_))),
            "{} should be rejected",
            bad
        );
    }
    for good in [3.0, 4.0, 4.5, 5.0, 6.0] {
        assert!(validate_spin_duration(good).is_ok());
    }
}

#[test]
fn spin_duration_is_clamped_for_timers() {
    let s = WheelSettings {
        sound_enabled: false,
        spin_duration_secs: 60.0,
    };
    assert_eq!(s.spin_duration(), Duration::from_secs(6));
}

#[test]
fn settings_roundtrip_through_json_names() {
    let json = serde_json::json!({"sound_enabled": false, "spin_duration_secs": 4.0});
    let s: WheelSettings = serde_json::from_value(json).unwrap();
    assert!(!s.sound_enabled);
    assert_eq!(s.spin_duration(), Duration::from_secs(4));
}
