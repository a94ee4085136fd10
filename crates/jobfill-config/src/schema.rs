//! Configuration schema definitions.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub sites: SitesConfig,

    #[serde(default)]
    pub fill: FillConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// `~/.jobfill`, falling back to the working directory without a home.
    pub fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".jobfill")
    }

    /// Where the CLI looks for a config file when none is given.
    pub fn default_path() -> PathBuf {
        Self::home_dir().join("config.toml")
    }
}

/// Profile backend service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Offer the bundled demo profile when the backend and cache both fail.
    #[serde(default = "default_true")]
    pub allow_demo_profile: bool,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            allow_demo_profile: default_true(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_true() -> bool {
    true
}

/// URL and page-content classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SitesConfig {
    /// Host/path substrings that mark a page as an ATS page.
    #[serde(default = "default_ats_patterns")]
    pub ats_patterns: Vec<String>,

    /// Words that suggest a page hosts a job application.
    #[serde(default = "default_job_keywords")]
    pub job_keywords: Vec<String>,
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            ats_patterns: default_ats_patterns(),
            job_keywords: default_job_keywords(),
        }
    }
}

fn default_ats_patterns() -> Vec<String> {
    [
        "indeed.com",
        "linkedin.com/jobs",
        "glassdoor.com",
        "monster.com",
        "careers.",
        "jobs.",
        "workday",
        "lever.co",
        "greenhouse.io",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_job_keywords() -> Vec<String> {
    [
        "job application",
        "apply now",
        "submit application",
        "application form",
        "career",
        "employment application",
        "position applied for",
        "job opening",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// Fill behavior and pacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillConfig {
    /// Replace text that is already in a field.
    #[serde(default)]
    pub overwrite_existing: bool,

    /// Pause between highlighting a field and writing it.
    #[serde(default = "default_step_delay_ms")]
    pub step_delay_ms: u64,

    /// Pause after scrolling a field into view.
    #[serde(default = "default_scroll_settle_ms")]
    pub scroll_settle_ms: u64,

    /// How long the status overlay stays after the last field.
    #[serde(default = "default_overlay_linger_ms")]
    pub overlay_linger_ms: u64,
}

impl Default for FillConfig {
    fn default() -> Self {
        Self {
            overwrite_existing: false,
            step_delay_ms: default_step_delay_ms(),
            scroll_settle_ms: default_scroll_settle_ms(),
            overlay_linger_ms: default_overlay_linger_ms(),
        }
    }
}

impl FillConfig {
    /// Same policy with every delay zeroed.
    pub fn immediate(&self) -> Self {
        Self {
            step_delay_ms: 0,
            scroll_settle_ms: 0,
            overlay_linger_ms: 0,
            ..self.clone()
        }
    }

    pub fn is_immediate(&self) -> bool {
        self.step_delay_ms == 0 && self.scroll_settle_ms == 0 && self.overlay_linger_ms == 0
    }
}

fn default_step_delay_ms() -> u64 {
    300
}

fn default_scroll_settle_ms() -> u64 {
    500
}

fn default_overlay_linger_ms() -> u64 {
    3000
}

/// Local key/value store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_storage_path")]
    pub path: String,

    #[serde(default = "default_success_log_cap")]
    pub success_log_cap: usize,

    #[serde(default = "default_error_log_cap")]
    pub error_log_cap: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_storage_path(),
            success_log_cap: default_success_log_cap(),
            error_log_cap: default_error_log_cap(),
        }
    }
}

fn default_storage_path() -> String {
    "~/.jobfill/store.json".to_string()
}

fn default_success_log_cap() -> usize {
    100
}

fn default_error_log_cap() -> usize {
    50
}

/// Logging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write daily-rotated log files under `~/.jobfill/debug`.
    #[serde(default = "default_true")]
    pub file: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_true(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
