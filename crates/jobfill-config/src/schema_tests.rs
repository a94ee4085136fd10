use super::*;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.backend.base_url, "http://localhost:5000");
    assert_eq!(config.backend.timeout_secs, 10);
    assert!(config.backend.allow_demo_profile);
    assert!(!config.fill.overwrite_existing);
    assert_eq!(config.storage.success_log_cap, 100);
    assert_eq!(config.storage.error_log_cap, 50);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_default_ats_patterns() {
    let sites = SitesConfig::default();
    assert_eq!(sites.ats_patterns.len(), 9);
    assert!(sites.ats_patterns.iter().any(|p| p == "workday"));
    assert!(sites.ats_patterns.iter().any(|p| p == "linkedin.com/jobs"));
}

#[test]
fn test_fill_immediate() {
    let fill = FillConfig {
        overwrite_existing: true,
        ..Default::default()
    };
    assert!(!fill.is_immediate());
    let immediate = fill.immediate();
    assert!(immediate.is_immediate());
    assert!(immediate.overwrite_existing);
}

#[test]
fn test_default_path_under_home() {
    let path = Config::default_path();
    assert!(path.ends_with(".jobfill/config.toml"));
}

#[test]
fn test_partial_section_keeps_other_defaults() {
    let config: Config = toml::from_str(
        r#"
        [fill]
        step_delay_ms = 0
        "#,
    )
    .unwrap();
    assert_eq!(config.fill.step_delay_ms, 0);
    assert_eq!(config.fill.scroll_settle_ms, 500);
    assert_eq!(config.sites, SitesConfig::default());
}

#[test]
fn test_sample_config_matches_defaults() {
    let sample: Config = toml::from_str(include_str!("../../../config/default.toml")).unwrap();
    assert_eq!(sample, Config::default());
}
