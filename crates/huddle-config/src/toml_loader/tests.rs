//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_huddle_config.toml"));
    let err = result.unwrap_err();
    assert!(matches!(err, huddle_common::ConfigError::FileNotFound(_)));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[session]
retain_left_participants = true
telecom = true

[labels]
waiting = "Waiting for others"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!(config.session.retain_left_participants);
    assert!(config.session.telecom);
    assert_eq!(config.labels.waiting, "Waiting for others");
    // Defaults preserved
    assert_eq!(config.timing.session_start_delay_ms, 1000);
    assert!(config.spatial.enabled);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let err = load_from_path(&path).unwrap_err();
    assert!(matches!(err, huddle_common::ConfigError::ParseError(_)));
}

#[test]
fn load_config_with_invalid_values_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[spatial]
distance = 4.0
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert!((config.spatial.distance - 4.0).abs() < f64::EPSILON);
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("huddle").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.timing.session_start_delay_ms, 1000);
    assert_eq!(config.labels.waiting, "Calling...");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::HuddleConfig;

    let config: HuddleConfig = toml::from_str(default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
    assert!(config.display.speaker_content_fill);
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("huddle"));
        assert!(path_str.ends_with("config.toml"));
    }
}
