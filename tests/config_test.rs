//! Integration tests for Settings config loading.
//!
//! These tests use explicit config files in temp directories; they assume no
//! `HIERNAME_*` variables are set in the test environment.

use std::fs;

use tempfile::TempDir;

use hiername::application::AppError;
use hiername::config::Settings;
use hiername::domain::{Name, Representation};

#[test]
fn given_config_file_when_load_then_values_override_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hiername.toml");
    fs::write(
        &path,
        r#"
delimiter = "/"
representation = "array"
"#,
    )
    .unwrap();

    let settings = Settings::load(Some(&path)).expect("load settings");

    assert_eq!(settings.delimiter, "/");
    assert_eq!(settings.representation, Representation::Array);
    assert_eq!(settings.render_delimiter, None);

    let name = settings.parse_name("usr/bin").unwrap();
    assert_eq!(name.no_components().unwrap(), 2);
}

#[test]
fn given_invalid_delimiter_in_config_when_load_then_name_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hiername.toml");
    fs::write(&path, "delimiter = \"::\"\n").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(matches!(err, AppError::Name(ref e) if e.is_precondition()));
}

#[test]
fn given_malformed_toml_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hiername.toml");
    fs::write(&path, "delimiter = ").unwrap();

    let err = Settings::load(Some(&path)).unwrap_err();
    assert!(matches!(err, AppError::Config { .. }));
}

#[test]
fn given_missing_config_file_when_load_then_config_error() {
    let dir = TempDir::new().unwrap();
    let err = Settings::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(err.to_string().starts_with("config error: read"));
}

#[test]
fn given_render_delimiter_when_load_then_available_for_rendering() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("hiername.toml");
    fs::write(&path, "delimiter = \"#\"\nrender_delimiter = \".\"\n").unwrap();

    let settings = Settings::load(Some(&path)).unwrap();
    let name = settings.parse_name(r"oss\#cs#fau#de").unwrap();

    assert_eq!(
        name.as_string(settings.render_delimiter.as_deref()).unwrap(),
        "oss#cs.fau.de"
    );
}
