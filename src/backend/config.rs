use crate::error::{LeadsError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Connection settings for the leads backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub base_url: String,
    /// Sent as `UserID` with status updates
    pub user_id: String,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api/".to_string(),
            user_id: "1".to_string(),
            timeout_secs: 30,
        }
    }
}

impl BackendConfig {
    pub const BASE_URL_VAR: &'static str = "LEADS_API_BASE_URL";
    pub const USER_ID_VAR: &'static str = "LEADS_API_USER_ID";
    pub const TIMEOUT_VAR: &'static str = "LEADS_API_TIMEOUT_SECS";

    /// Defaults overlaid with any `LEADS_API_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(base_url) = lookup(Self::BASE_URL_VAR) {
            config.base_url = base_url;
        }
        if let Some(user_id) = lookup(Self::USER_ID_VAR) {
            config.user_id = user_id;
        }
        if let Some(timeout) = lookup(Self::TIMEOUT_VAR) {
            config.timeout_secs = timeout.trim().parse().map_err(|_| {
                LeadsError::ConfigError(format!(
                    "{} must be a number of seconds, got '{}'",
                    Self::TIMEOUT_VAR,
                    timeout
                ))
            })?;
        }

        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Bearer token sources, in precedence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Token from the current authentication state
    pub session_token: Option<String>,
    /// Token restored from persisted storage
    pub persisted_token: Option<String>,
}

impl Credentials {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    pub fn with_persisted_token(mut self, token: impl Into<String>) -> Self {
        self.persisted_token = Some(token.into());
        self
    }

    /// The token to attach, if any. Blank tokens count as absent.
    pub fn bearer(&self) -> Option<&str> {
        [&self.session_token, &self.persisted_token]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|token| !token.trim().is_empty())
    }
}
