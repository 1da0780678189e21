use tempfile::TempDir;

use rsrc_core::config::{ConfigStore, ResolverConfig};

#[test]
fn load_missing_returns_defaults() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::in_dir(temp.path());

    let config = store.load().unwrap();

    assert_eq!(config, ResolverConfig::default());
}

#[test]
fn save_then_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let store = ConfigStore::in_dir(&temp.path().join("nested"));

    let mut config = ResolverConfig::default();
    config.root = "/mnt/shows".to_string();
    config.seed.insert("env.usd".to_string(), "/cache/env.usd".to_string());
    config.store.url = Some("http://localhost:8080".to_string());

    store.save(&config).unwrap();
    let loaded = store.load().unwrap();

    assert_eq!(loaded, config);
    assert!(store.config_path().ends_with("nested/rsrc.toml"));
}

#[test]
fn load_reports_file_and_parse_errors() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("rsrc.toml");
    std::fs::write(&path, "root = 42\n").unwrap();

    let err = ConfigStore::from_path(path).load().unwrap_err();
    let message = format!("{:#}", err);

    assert!(message.contains("Failed to parse config file"), "{}", message);
}
