use super::*;

#[test]
fn test_validate_default_config() {
    let config = Config::default();
    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
}

#[test]
fn test_validate_invalid_base_url() {
    let mut config = Config::default();
    config.backend.base_url = "not a url".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
    assert!(result.errors.iter().any(|e| e.path == "backend.base_url"));
}

#[test]
fn test_validate_non_http_scheme() {
    let mut config = Config::default();
    config.backend.base_url = "ftp://localhost/".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
}

#[test]
fn test_validate_remote_http_warning() {
    let mut config = Config::default();
    config.backend.base_url = "http://profiles.example.com".to_string();

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "backend.base_url"));
}

#[test]
fn test_validate_zero_timeout() {
    let mut config = Config::default();
    config.backend.timeout_secs = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "backend.timeout_secs"));
}

#[test]
fn test_validate_empty_ats_pattern() {
    let mut config = Config::default();
    config.sites.ats_patterns.push("  ".to_string());

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(!result.is_valid());
}

#[test]
fn test_validate_long_delay_warning() {
    let mut config = Config::default();
    config.fill.overlay_linger_ms = 60_000;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.is_valid());
    assert!(result.warnings.iter().any(|w| w.path == "fill.overlay_linger_ms"));
}

#[test]
fn test_validate_storage() {
    let mut config = Config::default();
    config.storage.path = String::new();
    config.storage.error_log_cap = 0;

    let result = ConfigValidator::validate(&config).unwrap();
    assert!(result.errors.iter().any(|e| e.path == "storage.path"));
    assert!(result.warnings.iter().any(|w| w.path == "storage.error_log_cap"));
}

#[test]
fn test_validate_log_level() {
    let mut config = Config::default();
    config.logging.level = "loud".to_string();
    assert!(!ConfigValidator::validate(&config).unwrap().is_valid());

    config.logging.level = "jobfill_engine=debug,info".to_string();
    assert!(ConfigValidator::validate(&config).unwrap().is_valid());
}

#[test]
fn test_into_result() {
    let mut config = Config::default();
    config.backend.timeout_secs = 0;
    let err = ConfigValidator::validate(&config)
        .unwrap()
        .into_result()
        .unwrap_err();
    assert!(err.to_string().contains("backend.timeout_secs"));
}
