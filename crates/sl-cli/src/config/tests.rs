use super::*;

#[test]
fn test_parse_full_config() {
    let toml_str = r#"
seed = 7
max_len = 500

[dirs]
inputs = "data/in"
outputs = "data/out"
logs = "data/logs"
reports = "data/reports"
outputs_merged = "data/merged"

[logging]
level = "debug"
"#;

    let config: AppConfig = toml::from_str(toml_str).unwrap();

    assert_eq!(config.seed, 7);
    assert_eq!(config.max_len, 500);
    assert_eq!(config.dirs.inputs, PathBuf::from("data/in"));
    assert_eq!(config.dirs.outputs, PathBuf::from("data/out"));
    assert_eq!(config.dirs.logs, PathBuf::from("data/logs"));
    assert_eq!(config.dirs.reports, PathBuf::from("data/reports"));
    assert_eq!(config.dirs.outputs_merged, PathBuf::from("data/merged"));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: AppConfig = toml::from_str("seed = 9").unwrap();

    assert_eq!(config.seed, 9);
    assert_eq!(config.max_len, 1000);
    assert_eq!(config.dirs.inputs, PathBuf::from("./inputs"));
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_empty_config_is_all_defaults() {
    let config: AppConfig = toml::from_str("").unwrap();
    let defaults = AppConfig::default();

    assert_eq!(config.seed, defaults.seed);
    assert_eq!(config.max_len, defaults.max_len);
    assert_eq!(config.dirs.outputs_merged, PathBuf::from("./outputs-merged"));
}

#[test]
fn test_load_missing_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();

    assert_eq!(config.seed, 42);
    assert_eq!(config.max_len, 1000);
}

#[test]
fn test_load_invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "seed = \"not a number\"").unwrap();

    assert!(AppConfig::load(&path).is_err());
}
