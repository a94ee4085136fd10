//! Is this page a job application?

use std::collections::BTreeSet;

use jobfill_config::SitesConfig;
use jobfill_dom::Document;
use jobfill_protocols::{SemanticKey, SiteVariant};
use serde::Serialize;
use tracing::debug;

use crate::extractor::FieldExtractor;
use crate::matcher::SemanticMatcher;

/// Distinct recognized fields that mark a page as an application on their own.
pub const MIN_MATCHED_KEYS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    /// Application keywords found in the page text or title.
    pub keywords: Vec<String>,
    pub form_count: usize,
    pub matched_keys: Vec<SemanticKey>,
    pub is_job_application: bool,
}

impl Detection {
    pub fn has_keywords(&self) -> bool {
        !self.keywords.is_empty()
    }
}

/// Keyword plus form heuristic, backed by field recognition.
#[derive(Debug, Clone)]
pub struct JobPageDetector {
    keywords: Vec<String>,
}

impl Default for JobPageDetector {
    fn default() -> Self {
        Self::from_config(&SitesConfig::default())
    }
}

impl JobPageDetector {
    pub fn from_config(config: &SitesConfig) -> Self {
        Self {
            keywords: config
                .job_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// A page qualifies with a keyword and a form, or with enough recognized
    /// fields regardless of wording.
    pub fn detect(&self, document: &Document, variant: SiteVariant) -> Detection {
        let mut text = document
            .body()
            .map(|body| document.inner_text(body))
            .unwrap_or_default()
            .to_lowercase();
        text.push(' ');
        text.push_str(&document.title().to_lowercase());

        let keywords: Vec<String> = self
            .keywords
            .iter()
            .filter(|k| text.contains(k.as_str()))
            .cloned()
            .collect();
        let form_count = document.forms().len();

        let matcher = SemanticMatcher::new(variant);
        let matched: BTreeSet<SemanticKey> = FieldExtractor::new(document, variant)
            .extract()
            .map(|extraction| {
                extraction
                    .fields
                    .iter()
                    .filter_map(|field| matcher.classify(field).map(|(key, _)| key))
                    .collect()
            })
            .unwrap_or_default();

        let is_job_application =
            (!keywords.is_empty() && form_count > 0) || matched.len() >= MIN_MATCHED_KEYS;
        debug!(
            keywords = keywords.len(),
            form_count,
            matched = matched.len(),
            is_job_application,
            "Job page detection"
        );

        Detection {
            keywords,
            form_count,
            matched_keys: matched.into_iter().collect(),
            is_job_application,
        }
    }
}
