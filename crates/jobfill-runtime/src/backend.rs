//! HTTP client for the profile service.

use std::time::Duration;

use async_trait::async_trait;
use jobfill_config::BackendConfig;
use jobfill_protocols::Profile;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use crate::error::BackendError;

pub const USER_DATA_PATH: &str = "/api/user/data";
pub const USER_STATUS_PATH: &str = "/api/user/status";
pub const LOGOUT_PATH: &str = "/api/user/logout";
pub const PROFILE_PATH: &str = "/api/profile";

/// Login state reported by the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserStatus {
    #[serde(default)]
    pub logged_in: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_completion: Option<u8>,
}

/// Anything a session can pull a profile from.
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self) -> Result<Profile, BackendError>;

    async fn logout(&self) -> Result<(), BackendError>;
}

/// Single-attempt JSON client with a request timeout.
#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: Url,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BackendError::Network(e.to_string()))?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        self.base_url
            .join(path)
            .map_err(|e| BackendError::InvalidUrl(e.to_string()))
    }

    /// Profile used for autofill (`GET /api/user/data`).
    pub async fn user_data(&self) -> Result<Profile, BackendError> {
        self.get_json(USER_DATA_PATH).await
    }

    /// Profile as shown on the dashboard (`GET /api/profile`).
    pub async fn profile(&self) -> Result<Profile, BackendError> {
        self.get_json(PROFILE_PATH).await
    }

    pub async fn status(&self) -> Result<UserStatus, BackendError> {
        self.get_json(USER_STATUS_PATH).await
    }

    pub async fn end_session(&self) -> Result<(), BackendError> {
        let url = self.endpoint(LOGOUT_PATH)?;
        debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        check_status(&response, LOGOUT_PATH)?;
        Ok(())
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.endpoint(path)?;
        debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| BackendError::Network(e.to_string()))?;
        check_status(&response, path)?;

        response.json().await.map_err(|e| BackendError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}

fn check_status(response: &reqwest::Response, path: &str) -> Result<(), BackendError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(BackendError::Status {
            status: status.as_u16(),
            endpoint: path.to_string(),
        })
    }
}

#[async_trait]
impl ProfileSource for BackendClient {
    async fn fetch_profile(&self) -> Result<Profile, BackendError> {
        self.user_data().await
    }

    async fn logout(&self) -> Result<(), BackendError> {
        self.end_session().await
    }
}

#[cfg(test)]
#[path = "backend_tests.rs"]
mod tests;
