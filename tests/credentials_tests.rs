use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use internetdata::connection::credentials::default_config_file;
use internetdata::{ConfigurationError, ConnectionConfiguration, Credentials};
use tempfile::TempDir;

fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

fn config_file(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

// ============================================================================
// Priority
// ============================================================================

#[test]
fn test_explicit_configuration_wins() {
    let explicit = ConnectionConfiguration::new("explicit", "secret");
    let (_dir, path) = config_file("user = \"file\"\npassword = \"file-secret\"\n");

    let credentials = Credentials::resolve_from(
        Some(&explicit),
        env(&[("LSD_USER", "env"), ("LSD_PASSWORD", "env-secret")]),
        Some(&path),
    )
    .unwrap();

    assert_eq!(credentials.user(), "explicit");
    assert_eq!(credentials.password(), "secret");
}

#[test]
fn test_environment_beats_config_file() {
    let (_dir, path) = config_file("user = \"file\"\npassword = \"file-secret\"\n");

    let credentials = Credentials::resolve_from(
        None,
        env(&[("LSD_USER", "env"), ("LSD_PASSWORD", "env-secret")]),
        Some(&path),
    )
    .unwrap();

    assert_eq!(credentials.user(), "env");
    assert_eq!(credentials.password(), "env-secret");
}

#[test]
fn test_fields_resolve_independently() {
    let explicit = ConnectionConfiguration::new("explicit", "");
    let (_dir, path) = config_file("password = \"file-secret\"\n");

    let credentials = Credentials::resolve_from(Some(&explicit), env(&[]), Some(&path)).unwrap();

    assert_eq!(credentials.user(), "explicit");
    assert_eq!(credentials.password(), "file-secret");
}

#[test]
fn test_empty_environment_value_is_ignored() {
    let credentials = Credentials::resolve_from(
        None,
        env(&[("LSD_USER", ""), ("LSD_PASSWORD", "pw")]),
        None,
    );
    assert!(matches!(credentials, Err(ConfigurationError::MissingUser { .. })));
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_password_names_the_field() {
    let err = Credentials::resolve_from(None, env(&[("LSD_USER", "yev")]), None).unwrap_err();

    assert!(matches!(err, ConfigurationError::MissingPassword { .. }));
    let message = err.to_string();
    assert!(message.contains("[password]"));
    assert!(message.contains("LSD_PASSWORD"));
}

#[test]
fn test_missing_config_file_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");

    let err = Credentials::resolve_from(None, env(&[]), Some(&path)).unwrap_err();
    assert!(matches!(err, ConfigurationError::MissingUser { .. }));
    assert!(err.to_string().contains("absent.toml"));
}

#[test]
fn test_malformed_config_file() {
    let (_dir, path) = config_file("user = \n");

    let err = Credentials::resolve_from(None, env(&[]), Some(&path)).unwrap_err();
    match err {
        ConfigurationError::ConfigFile { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected config file error, got {:?}", other),
    }
}

#[test]
fn test_config_file_not_read_when_not_needed() {
    let (_dir, path) = config_file("this is not toml");

    let credentials = Credentials::resolve_from(
        None,
        env(&[("LSD_USER", "env"), ("LSD_PASSWORD", "env-secret")]),
        Some(&path),
    );
    assert!(credentials.is_ok());
}

#[test]
fn test_debug_masks_password() {
    let credentials = Credentials::resolve_from(
        Some(&ConnectionConfiguration::new("yev", "hunter2")),
        env(&[]),
        None,
    )
    .unwrap();
    assert!(!format!("{:?}", credentials).contains("hunter2"));
}

// ============================================================================
// Config File Location
// ============================================================================

#[test]
fn test_default_config_file_location() {
    assert_eq!(
        default_config_file(env(&[("LSD_CONFIG", "/etc/lsd.toml"), ("HOME", "/home/yev")])),
        Some(PathBuf::from("/etc/lsd.toml"))
    );
    assert_eq!(
        default_config_file(env(&[("HOME", "/home/yev")])),
        Some(PathBuf::from("/home/yev/.lsd/config.toml"))
    );
    assert_eq!(default_config_file(env(&[])), None);
}
