//! Page-side message handler.
//!
//! One [`ContentScript`] owns one loaded document and answers the requests
//! the popup and background send to its tab.

use jobfill_config::Config;
use jobfill_dom::Document;
use jobfill_protocols::{
    AnalyzeResponse, AutofillResponse, ContentRequest, ContentResponse, LegacyAutofillResponse,
    MessagingError, Profile, SiteVariant,
};
use tracing::{debug, info, warn};

use crate::extractor::FieldExtractor;
use crate::legacy::LegacyFiller;
use crate::sequence::{FillReport, FillSequence};
use crate::variant::SiteClassifier;

pub const NO_FIELDS_MESSAGE: &str = "No form fields detected on this page.";

pub struct ContentScript {
    document: Document,
    url: String,
    classifier: SiteClassifier,
    config: Config,
}

impl ContentScript {
    pub fn new(document: Document, url: impl Into<String>, config: &Config) -> Self {
        Self {
            document,
            url: url.into(),
            classifier: SiteClassifier::from_config(&config.sites),
            config: config.clone(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn variant_for(&self, is_workday: Option<bool>) -> SiteVariant {
        self.classifier.select(&self.url, is_workday)
    }

    pub async fn handle(&mut self, request: ContentRequest) -> ContentResponse {
        debug!(action = request.action(), url = %self.url, "Content request");
        match request {
            ContentRequest::AnalyzeForm { is_workday } => {
                ContentResponse::Analyze(self.analyze(is_workday))
            }
            ContentRequest::AutofillForm {
                profile,
                is_workday,
            } => ContentResponse::Autofill(self.autofill(&profile, is_workday).await),
            ContentRequest::Autofill { data } => ContentResponse::Legacy(self.legacy_autofill(&data)),
        }
    }

    /// JSON in, JSON out, for callers on the far side of a message boundary.
    pub async fn handle_json(&mut self, payload: &str) -> Result<String, MessagingError> {
        let request: ContentRequest = serde_json::from_str(payload)?;
        let response = self.handle(request).await;
        Ok(serde_json::to_string(&response)?)
    }

    /// Relevant fields; empty when the page cannot be analyzed.
    pub fn analyze(&self, is_workday: Option<bool>) -> AnalyzeResponse {
        let variant = self.variant_for(is_workday);
        match FieldExtractor::new(&self.document, variant).extract() {
            Ok(extraction) => {
                info!(count = extraction.len(), ?variant, "Analyzed form");
                AnalyzeResponse {
                    fields: extraction.fields,
                }
            }
            Err(e) => {
                warn!(error = %e, "Form analysis failed");
                AnalyzeResponse::default()
            }
        }
    }

    pub async fn autofill(&mut self, profile: &Profile, is_workday: Option<bool>) -> AutofillResponse {
        let variant = self.variant_for(is_workday);
        let extraction = match FieldExtractor::new(&self.document, variant).extract() {
            Ok(extraction) => extraction,
            Err(e) => {
                warn!(error = %e, "Autofill aborted");
                return AutofillResponse::failed(e.to_string());
            }
        };
        if extraction.is_empty() {
            return AutofillResponse::completed(0).with_message(NO_FIELDS_MESSAGE);
        }

        let fill = &self.config.fill;
        let sequence = FillSequence::new(
            &mut self.document,
            extraction.fields,
            profile,
            variant,
            fill,
        );
        let report: FillReport = if fill.is_immediate() {
            sequence.run()
        } else {
            sequence.run_paced().await
        };
        AutofillResponse::completed(report.filled)
    }

    /// Label-driven fill used by the older extension builds.
    pub fn legacy_autofill(&mut self, data: &Profile) -> LegacyAutofillResponse {
        if self.document.is_unloaded() {
            return LegacyAutofillResponse::error("Page unloaded");
        }
        let filled = LegacyFiller::new(&mut self.document).fill(data);
        LegacyAutofillResponse::from_count(filled)
    }
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
