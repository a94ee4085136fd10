//! Site-variant selection.

use jobfill_config::SitesConfig;
use jobfill_protocols::SiteVariant;
use tracing::debug;

/// Classifies pages as generic or ATS by URL substring.
#[derive(Debug, Clone)]
pub struct SiteClassifier {
    patterns: Vec<String>,
}

impl Default for SiteClassifier {
    fn default() -> Self {
        Self::from_config(&SitesConfig::default())
    }
}

impl SiteClassifier {
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            patterns: patterns
                .into_iter()
                .map(|p| p.into().to_lowercase())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &SitesConfig) -> Self {
        Self::new(config.ats_patterns.iter().cloned())
    }

    /// First allow-list entry contained in the URL.
    pub fn matched_pattern(&self, url: &str) -> Option<&str> {
        let url = url.to_lowercase();
        self.patterns
            .iter()
            .find(|p| url.contains(p.as_str()))
            .map(String::as_str)
    }

    pub fn classify(&self, url: &str) -> SiteVariant {
        SiteVariant::from_flag(self.matched_pattern(url).is_some())
    }

    /// A caller flag always wins over the URL.
    pub fn select(&self, url: &str, flag: Option<bool>) -> SiteVariant {
        let variant = match flag {
            Some(is_workday) => SiteVariant::from_flag(is_workday),
            None => self.classify(url),
        };
        debug!(url, ?flag, ?variant, "Selected site variant");
        variant
    }
}
