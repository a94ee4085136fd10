//! Per-session popup context.
//!
//! Replaces the popup's global state: one [`SessionContext`] is created per
//! session and passed to every handler. It owns the profile source and the
//! local store and turns content script replies into status lines.

use std::fmt;

use jobfill_config::Config;
use jobfill_engine::SemanticMatcher;
use jobfill_protocols::{
    AutofillResponse, ContentRequest, ContentResponse, FieldDescriptor, HistoryEntry,
    MessagingError, Profile,
};
use tracing::{info, warn};

use crate::backend::ProfileSource;
use crate::bridge::{TabBridge, TabId};
use crate::error::SessionError;
use crate::store::LocalStore;

pub const CONNECTION_ERROR: &str =
    "Error: Could not connect to page. Please make sure you're on a form page and try reloading.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Warning,
    Error,
}

/// One line of popup feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupStatus {
    pub kind: StatusKind,
    pub message: String,
}

impl PopupStatus {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Status for an autofill reply.
    pub fn for_autofill(response: &AutofillResponse) -> Self {
        match (response.success, response.fields_filled_count) {
            (true, 0) => Self::new(
                StatusKind::Warning,
                "No fields were filled. Try running \"Analyze Form\" first.",
            ),
            (true, n) => Self::new(
                StatusKind::Success,
                format!("Success! {n} fields were filled."),
            ),
            (false, _) => Self::new(StatusKind::Error, "Autofill failed. Please try again."),
        }
    }

    pub fn for_analysis(field_count: usize) -> Self {
        if field_count == 0 {
            Self::new(StatusKind::Warning, "No form fields detected on this page.")
        } else {
            Self::new(
                StatusKind::Success,
                format!("{field_count} form fields detected. Ready to autofill."),
            )
        }
    }
}

impl From<&SessionError> for PopupStatus {
    fn from(error: &SessionError) -> Self {
        match error {
            SessionError::Messaging(_) => Self::new(StatusKind::Error, CONNECTION_ERROR),
            SessionError::BackendUnavailable(_) => {
                Self::new(StatusKind::Error, "Please log in to use autofill.")
            }
            other => Self::new(StatusKind::Error, format!("An error occurred: {other}")),
        }
    }
}

impl fmt::Display for PopupStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Result of "Analyze Form": the fields and the profile attribute each
/// one would receive.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub fields: Vec<FieldDescriptor>,
    pub mappings: Vec<&'static str>,
    pub status: PopupStatus,
}

impl AnalysisReport {
    pub fn rows(&self) -> impl Iterator<Item = (&str, &'static str)> + '_ {
        self.fields
            .iter()
            .zip(self.mappings.iter().copied())
            .map(|(field, mapping)| (field.display_name(), mapping))
    }
}

pub struct SessionContext {
    source: Box<dyn ProfileSource>,
    store: LocalStore,
    allow_demo_profile: bool,
    profile: Option<Profile>,
    workday_override: Option<bool>,
}

impl SessionContext {
    pub fn new(config: &Config, source: Box<dyn ProfileSource>, store: LocalStore) -> Self {
        Self {
            source,
            store,
            allow_demo_profile: config.backend.allow_demo_profile,
            profile: None,
            workday_override: None,
        }
    }

    pub fn store(&self) -> &LocalStore {
        &self.store
    }

    /// Use this profile for the rest of the session instead of fetching one.
    pub fn use_profile(&mut self, profile: Profile) {
        self.profile = Some(profile);
    }

    /// Session profile, else the backend, else the stored copy, else the
    /// demo profile when allowed.
    pub async fn load_profile(&mut self) -> Result<Profile, SessionError> {
        if let Some(profile) = &self.profile {
            return Ok(profile.clone());
        }

        let profile = match self.source.fetch_profile().await {
            Ok(profile) => {
                if let Err(e) = self.store.remember_profile(profile.clone()).await {
                    warn!(error = %e, "Could not cache profile");
                }
                profile
            }
            Err(e) => {
                warn!(error = %e, "Profile backend unavailable");
                if let Some(cached) = self.store.profile() {
                    info!("Using cached profile");
                    cached.clone()
                } else if self.allow_demo_profile {
                    info!("Using demo profile");
                    Profile::demo()
                } else {
                    return Err(SessionError::BackendUnavailable(e.to_string()));
                }
            }
        };
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    /// "Profile N% complete" for whatever profile is at hand.
    pub fn profile_status(&self) -> Option<String> {
        self.profile
            .as_ref()
            .or_else(|| self.store.profile())
            .map(|p| format!("Profile {}% complete", p.completion_percentage()))
    }

    /// Pin the site variant for this session only.
    pub fn override_workday(&mut self, is_workday: Option<bool>) {
        self.workday_override = is_workday;
    }

    /// The session override, else `Some(true)` when ATS mode is switched on,
    /// otherwise `None` and the URL decides.
    pub fn workday_flag(&self) -> Option<bool> {
        self.workday_override
            .or_else(|| self.store.ats_mode().then_some(true))
    }

    pub async fn set_ats_mode(&mut self, enabled: bool) -> Result<(), SessionError> {
        self.store.set_ats_mode(enabled).await?;
        Ok(())
    }

    pub async fn analyze(
        &mut self,
        bridge: &mut TabBridge,
        tab: TabId,
    ) -> Result<AnalysisReport, SessionError> {
        let is_workday = self.workday_flag();
        let fields = match bridge
            .send(tab, ContentRequest::AnalyzeForm { is_workday })
            .await?
        {
            ContentResponse::Analyze(analysis) => analysis.fields,
            _ => return Err(MessagingError::UnexpectedResponse("ANALYZE_FORM".to_string()).into()),
        };

        let matcher = SemanticMatcher::new(bridge.variant(tab, is_workday).unwrap_or_default());
        let mappings = fields.iter().map(|f| matcher.describe_mapping(f)).collect();
        let status = PopupStatus::for_analysis(fields.len());
        Ok(AnalysisReport {
            fields,
            mappings,
            status,
        })
    }

    /// Fill the tab and log the attempt.
    pub async fn autofill(
        &mut self,
        bridge: &mut TabBridge,
        tab: TabId,
    ) -> Result<PopupStatus, SessionError> {
        let url = bridge.url(tab).unwrap_or_default().to_string();
        let profile = self.load_profile().await?;
        let request = ContentRequest::AutofillForm {
            profile,
            is_workday: self.workday_flag(),
        };

        let response = match bridge.send(tab, request).await {
            Ok(ContentResponse::Autofill(response)) => response,
            Ok(_) => {
                let error = MessagingError::UnexpectedResponse("AUTOFILL_FORM".to_string());
                self.record(HistoryEntry::error(&url, error.to_string())).await;
                return Err(error.into());
            }
            Err(e) => {
                self.record(HistoryEntry::error(&url, e.to_string())).await;
                return Err(e.into());
            }
        };

        let entry = if response.success {
            HistoryEntry::success(&url, response.fields_filled_count)
        } else {
            HistoryEntry::error(
                &url,
                response.message.clone().unwrap_or_else(|| "Unknown error".to_string()),
            )
        };
        self.record(entry).await;
        Ok(PopupStatus::for_autofill(&response))
    }

    async fn record(&mut self, entry: HistoryEntry) {
        if let Err(e) = self.store.record(entry).await {
            warn!(error = %e, "Could not write autofill log");
        }
    }

    /// End the backend session (best effort) and forget the profile.
    pub async fn logout(&mut self) -> Result<(), SessionError> {
        if let Err(e) = self.source.logout().await {
            warn!(error = %e, "Backend logout failed");
        }
        self.profile = None;
        self.store.logout().await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
