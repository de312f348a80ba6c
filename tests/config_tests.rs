// Config loading and validation tests

use loadreport::config::AppConfig;
use loadreport::format::NumberFormat;

const VALID_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[database]
path = "data/reports.db"
max_pool_size = 5
retention_days = 30
prune_interval_secs = 3600
vacuum_interval_secs = 86400

[format]
fraction_digits = 2
grouping_used = true
"#;

const MINIMAL_CONFIG: &str = r#"
[server]
port = 8081
host = "127.0.0.1"

[database]
path = "data/reports.db"
max_pool_size = 5
"#;

#[test]
fn test_config_loads_from_str() {
    let config = AppConfig::load_from_str(VALID_CONFIG).expect("load_from_str");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.database.path, "data/reports.db");
    assert_eq!(config.database.max_pool_size, 5);
    assert_eq!(config.format, NumberFormat::fixed(2).with_grouping(true));
}

#[test]
fn test_config_defaults_when_omitted() {
    let config = AppConfig::load_from_str(MINIMAL_CONFIG).expect("valid");
    assert_eq!(config.database.retention_days, 30);
    assert_eq!(config.database.prune_interval_secs, 3600);
    assert_eq!(config.database.vacuum_interval_secs, 86_400);
    assert!(config.database.vacuum_schedule.is_none());
    assert_eq!(config.format, NumberFormat::default());
}

#[test]
fn test_config_validation_rejects_invalid_port() {
    let bad = VALID_CONFIG.replace("port = 8081", "port = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("server.port"));
}

#[test]
fn test_config_validation_rejects_empty_db_path() {
    let bad = VALID_CONFIG.replace("path = \"data/reports.db\"", "path = \"\"");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("database.path"));
}

#[test]
fn test_config_validation_rejects_max_pool_size_zero() {
    let bad = VALID_CONFIG.replace("max_pool_size = 5", "max_pool_size = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("max_pool_size"));
}

#[test]
fn test_config_validation_rejects_retention_days_zero() {
    let bad = VALID_CONFIG.replace("retention_days = 30", "retention_days = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("retention_days"));
}

#[test]
fn test_config_validation_rejects_prune_interval_zero() {
    let bad = VALID_CONFIG.replace("prune_interval_secs = 3600", "prune_interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("prune_interval_secs"));
}

#[test]
fn test_config_validation_rejects_vacuum_interval_zero() {
    let bad = VALID_CONFIG.replace("vacuum_interval_secs = 86400", "vacuum_interval_secs = 0");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("vacuum_interval_secs"));
}

#[test]
fn test_config_accepts_cron_vacuum_schedule() {
    let with_schedule = VALID_CONFIG.replace(
        "vacuum_interval_secs = 86400",
        "vacuum_interval_secs = 86400\nvacuum_schedule = \"0 0 3 * * *\"",
    );
    let config = AppConfig::load_from_str(&with_schedule).expect("valid");
    assert_eq!(
        config.database.vacuum_schedule.as_deref(),
        Some("0 0 3 * * *")
    );
}

#[test]
fn test_config_validation_rejects_invalid_cron() {
    let bad = VALID_CONFIG.replace(
        "vacuum_interval_secs = 86400",
        "vacuum_interval_secs = 86400\nvacuum_schedule = \"every night\"",
    );
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("vacuum_schedule"));
}

#[test]
fn test_config_validation_rejects_too_many_fraction_digits() {
    let bad = VALID_CONFIG.replace("fraction_digits = 2", "fraction_digits = 16");
    let err = AppConfig::load_from_str(&bad).unwrap_err();
    assert!(err.to_string().contains("fraction_digits"));
}

#[test]
fn test_config_validation_rejects_invalid_toml() {
    let err = AppConfig::load_from_str("not valid toml [[[").unwrap_err();
    assert!(!err.to_string().is_empty());
}

#[test]
fn test_config_load_from_file_via_env() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, VALID_CONFIG).unwrap();
    unsafe { std::env::set_var("CONFIG_FILE", path.to_str().unwrap()) };
    let result = AppConfig::load();
    unsafe { std::env::remove_var("CONFIG_FILE") };
    let config = result.expect("load from CONFIG_FILE");
    assert_eq!(config.server.port, 8081);
    assert_eq!(config.database.path, "data/reports.db");
}
