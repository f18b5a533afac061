//! Configuration file handling

use hand_gesture_control::{
    config::{Config, EXAMPLE_CONFIG},
    controller::ControlSettings,
    Error,
};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_file_round_trip() {
    let mut config = Config::default();
    config.gestures.action_delay_secs = 0.75;
    config.pinch.frame_width = 1280;
    config.pinch.frame_height = 720;
    config.pinch.scale_with_frame_width = true;
    config.actuators.volume_max = 55.0;
    config.output.dry_run = true;
    config.output.tone_command = Some("beep -f {freq} -l {ms}".to_string());

    let file = NamedTempFile::new().unwrap();
    config.to_file(file.path()).unwrap();
    let loaded = Config::from_file(file.path()).unwrap();

    assert!(loaded.validate().is_ok());
    assert_eq!(loaded.gestures.action_delay_secs, 0.75);
    assert_eq!(loaded.pinch.frame_width, 1280);
    assert!(loaded.output.dry_run);
    assert_eq!(loaded.output.tone_command.as_deref(), Some("beep -f {freq} -l {ms}"));

    let settings = loaded.control_settings();
    assert_eq!(settings.pinch.frame_size(), (1280, 720));
    assert_eq!(settings.pinch.threshold_px(), 500.0);
    assert_eq!(settings.volume_max, 55.0);
}

#[test]
fn test_example_config_from_disk() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(EXAMPLE_CONFIG.as_bytes()).unwrap();
    let loaded = Config::from_file(file.path()).unwrap();
    assert_eq!(loaded.control_settings(), ControlSettings::default());
}

#[test]
fn test_missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::from_file(dir.path().join("missing.yaml"));
    assert!(matches!(result, Err(Error::IoError(_))));
}

#[test]
fn test_malformed_yaml_is_a_config_error() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"gestures: [not, a, map]\n").unwrap();
    let result = Config::from_file(file.path());
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_invalid_values_fail_validation() {
    let mut config = Config::default();
    config.actuators.smoothing_alpha = 0.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.pinch.threshold_px = -1.0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.actuators.volume_max = 120.0;
    assert!(config.validate().is_err());
}
