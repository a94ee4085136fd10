//! Content script message contract.
//!
//! Requests carry an `action` tag. Responses are plain JSON objects whose shape
//! depends on the request.

use serde::{Deserialize, Serialize};

use crate::field::FieldDescriptor;
use crate::profile::Profile;

/// Request sent from the popup or background to a tab's content script.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action")]
pub enum ContentRequest {
    /// List the relevant fields on the page.
    #[serde(rename = "ANALYZE_FORM", rename_all = "camelCase")]
    AnalyzeForm {
        /// Forces (or forbids) Workday handling; `None` classifies by URL.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_workday: Option<bool>,
    },

    /// Fill the page from a profile.
    #[serde(rename = "AUTOFILL_FORM", rename_all = "camelCase")]
    AutofillForm {
        profile: Profile,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_workday: Option<bool>,
    },

    /// Label-driven fill used by the Safari extension.
    #[serde(rename = "autofill")]
    Autofill {
        #[serde(alias = "userData")]
        data: Profile,
    },
}

impl ContentRequest {
    /// Action name as it appears on the wire.
    pub fn action(&self) -> &'static str {
        match self {
            Self::AnalyzeForm { .. } => "ANALYZE_FORM",
            Self::AutofillForm { .. } => "AUTOFILL_FORM",
            Self::Autofill { .. } => "autofill",
        }
    }
}

/// Reply to `ANALYZE_FORM`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub fields: Vec<FieldDescriptor>,
}

/// Reply to `AUTOFILL_FORM`.
///
/// `success` is false only when the page could not be analyzed; a run that
/// matched nothing reports `success: true` with a zero count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutofillResponse {
    pub success: bool,
    pub fields_filled_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AutofillResponse {
    pub fn completed(fields_filled_count: usize) -> Self {
        Self {
            success: true,
            fields_filled_count,
            message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            fields_filled_count: 0,
            message: Some(message.into()),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Reply to the legacy `autofill` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyAutofillResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LegacyAutofillResponse {
    pub fn from_count(filled: usize) -> Self {
        if filled > 0 {
            Self {
                success: true,
                message: Some(format!("Filled {} fields", filled)),
                error: None,
            }
        } else {
            Self::error("No matching fields found")
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

/// Any content script reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContentResponse {
    Analyze(AnalyzeResponse),
    Autofill(AutofillResponse),
    Legacy(LegacyAutofillResponse),
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
