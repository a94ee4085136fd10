//! Local key/value store backed by a single JSON file.
//!
//! Holds what the extension kept in browser storage: the login flag, the
//! last profile pulled from the backend, the ATS-mode toggle, and two
//! rolling logs of autofill attempts. Every mutation is written through.

use std::path::{Path, PathBuf};

use jobfill_config::{ConfigLoader, StorageConfig};
use jobfill_protocols::{HistoryEntry, Profile};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::StoreError;

/// Persisted contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreState {
    #[serde(default)]
    pub is_logged_in: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,

    /// Force the Workday strategy regardless of URL.
    #[serde(default)]
    pub ats_mode: bool,

    #[serde(default)]
    pub autofill_history: Vec<HistoryEntry>,

    #[serde(default)]
    pub autofill_errors: Vec<HistoryEntry>,
}

pub struct LocalStore {
    path: PathBuf,
    success_log_cap: usize,
    error_log_cap: usize,
    state: StoreState,
}

impl LocalStore {
    /// Open the configured store, starting empty when the file is missing.
    pub async fn open(config: &StorageConfig) -> Result<Self, StoreError> {
        let path = ConfigLoader::expand_path(&config.path);
        let state = Self::read_state(&path).await?;
        Ok(Self {
            path,
            success_log_cap: config.success_log_cap,
            error_log_cap: config.error_log_cap,
            state,
        })
    }

    async fn read_state(path: &Path) -> Result<StoreState, StoreError> {
        match fs::read_to_string(path).await {
            Ok(json) if json.trim().is_empty() => Ok(StoreState::default()),
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "No store file yet");
                Ok(StoreState::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn persist(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> &StoreState {
        &self.state
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.is_logged_in
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.state.profile.as_ref()
    }

    pub fn ats_mode(&self) -> bool {
        self.state.ats_mode
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.state.autofill_history
    }

    pub fn errors(&self) -> &[HistoryEntry] {
        &self.state.autofill_errors
    }

    /// Cache a freshly fetched profile and mark the user logged in.
    pub async fn remember_profile(&mut self, profile: Profile) -> Result<(), StoreError> {
        self.state.profile = Some(profile);
        self.state.is_logged_in = true;
        self.persist().await
    }

    pub async fn set_ats_mode(&mut self, enabled: bool) -> Result<(), StoreError> {
        self.state.ats_mode = enabled;
        self.persist().await
    }

    /// Forget the login and the cached profile. Logs are kept.
    pub async fn logout(&mut self) -> Result<(), StoreError> {
        self.state.is_logged_in = false;
        self.state.profile = None;
        self.persist().await
    }

    /// Append to the success or error log, dropping the oldest entries past
    /// the cap.
    pub async fn record(&mut self, entry: HistoryEntry) -> Result<(), StoreError> {
        let (log, cap) = if entry.is_success() {
            (&mut self.state.autofill_history, self.success_log_cap)
        } else {
            (&mut self.state.autofill_errors, self.error_log_cap)
        };
        log.push(entry);
        if log.len() > cap {
            let excess = log.len() - cap;
            log.drain(..excess);
            debug!(excess, cap, "Trimmed autofill log");
        }
        self.persist().await
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
