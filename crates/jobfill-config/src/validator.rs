//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// First error as a `ConfigError`, if any.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> Result<ValidationResult, ConfigError> {
        let mut result = ValidationResult::default();

        Self::validate_backend(config, &mut result);
        Self::validate_sites(config, &mut result);
        Self::validate_fill(config, &mut result);
        Self::validate_storage(config, &mut result);
        Self::validate_logging(config, &mut result);

        Ok(result)
    }

    fn validate_backend(config: &Config, result: &mut ValidationResult) {
        match Url::parse(&config.backend.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {
                if url.scheme() == "http"
                    && !matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "::1"))
                {
                    result.add_warning(ValidationWarning::new(
                        "backend.base_url",
                        "Profile data is sent over plain HTTP to a non-local host",
                    ));
                }
            }
            Ok(_) => result.add_error(ValidationError::new(
                "backend.base_url",
                "base_url must use http or https",
            )),
            Err(e) => result.add_error(ValidationError::new(
                "backend.base_url",
                format!("Invalid URL: {e}"),
            )),
        }

        if config.backend.timeout_secs == 0 {
            result.add_error(ValidationError::new(
                "backend.timeout_secs",
                "timeout_secs must be greater than 0",
            ));
        }
    }

    fn validate_sites(config: &Config, result: &mut ValidationResult) {
        if config.sites.ats_patterns.iter().any(|p| p.trim().is_empty()) {
            result.add_error(ValidationError::new(
                "sites.ats_patterns",
                "Patterns cannot be empty; an empty pattern matches every URL",
            ));
        }
        if config.sites.job_keywords.is_empty() {
            result.add_warning(ValidationWarning::new(
                "sites.job_keywords",
                "No job keywords; page detection relies on field matches only",
            ));
        }
    }

    fn validate_fill(config: &Config, result: &mut ValidationResult) {
        let fill = &config.fill;
        for (path, value) in [
            ("fill.step_delay_ms", fill.step_delay_ms),
            ("fill.scroll_settle_ms", fill.scroll_settle_ms),
            ("fill.overlay_linger_ms", fill.overlay_linger_ms),
        ] {
            if value > 10_000 {
                result.add_warning(ValidationWarning::new(
                    path,
                    "Delay above 10s makes paced fills very slow",
                ));
            }
        }
    }

    fn validate_storage(config: &Config, result: &mut ValidationResult) {
        if config.storage.path.trim().is_empty() {
            result.add_error(ValidationError::new("storage.path", "Store path cannot be empty"));
        }
        if config.storage.success_log_cap == 0 {
            result.add_warning(ValidationWarning::new(
                "storage.success_log_cap",
                "Success log is disabled",
            ));
        }
        if config.storage.error_log_cap == 0 {
            result.add_warning(ValidationWarning::new(
                "storage.error_log_cap",
                "Error log is disabled",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.trim().to_ascii_lowercase();
        let known = ["trace", "debug", "info", "warn", "error", "off"];
        // Full directives like "jobfill_engine=debug" are accepted as-is.
        if !level.contains('=') && !known.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!("Unknown log level: {}", config.logging.level),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
