use recyclafy_core::types::{AppConfig, Config, WriteMode};
use tempfile::tempdir;

/// Verify a missing config file loads as the defaults.
#[test]
fn test_missing_file_loads_defaults() {
    let tmp = tempdir().unwrap();
    let config = AppConfig::load(&AppConfig::path(tmp.path())).unwrap();

    assert_eq!(config, AppConfig::default());
    assert_eq!(config.store.write_mode, WriteMode::Unguarded);
    assert_eq!(config.demo.batch_size, 20);
    assert_eq!(config.demo.window_days, 28);
}

/// Verify save then load returns the same settings.
#[test]
fn test_save_and_load_round_trip() {
    let tmp = tempdir().unwrap();
    let path = AppConfig::path(tmp.path());
    let mut config = AppConfig::default();
    config.store.write_mode = WriteMode::Serialized;
    config.demo.batch_size = 50;

    config.save(&path).unwrap();

    assert_eq!(AppConfig::load(&path).unwrap(), config);
}

/// Verify partially written files fill the rest from defaults.
#[test]
fn test_partial_file_uses_defaults_for_missing_fields() {
    let tmp = tempdir().unwrap();
    let path = AppConfig::path(tmp.path());
    std::fs::write(&path, "[store]\nwrite_mode = \"serialized\"\n").unwrap();

    let config = AppConfig::load(&path).unwrap();

    assert_eq!(config.store.write_mode, WriteMode::Serialized);
    assert_eq!(config.demo.batch_size, 20);
}

/// Verify an unknown write mode is a parse error rather than a silent default.
#[test]
fn test_unknown_write_mode_is_rejected() {
    let tmp = tempdir().unwrap();
    let path = AppConfig::path(tmp.path());
    std::fs::write(&path, "[store]\nwrite_mode = \"yolo\"\n").unwrap();

    AppConfig::load(&path).unwrap_err();
}

/// Verify zero-sized demo settings are reported and repaired.
#[test]
fn test_validate_and_repair() {
    let mut config = AppConfig::default();
    config.demo.batch_size = 0;
    config.demo.window_days = 0;

    assert_eq!(config.validate().len(), 2);

    let repaired = config.with_defaults_for_invalid();
    assert!(repaired.validate().is_empty());
    assert_eq!(repaired.demo.batch_size, 20);
    assert_eq!(repaired.demo.window_days, 28);
}

/// Verify the data directory layout.
#[test]
fn test_config_paths() {
    let config = Config::new("/data/recyclafy");
    assert!(config.db_path().ends_with("recyclafy.redb"));
    assert_eq!(config.config_path(), AppConfig::path(&config.base_path));
}
