use super::{ClientError, RoutingServiceClient};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// connection settings for the external routing service. the client is only
/// ever built from one of these; nothing is read from the environment here.
///
/// # Fields
/// - `base_url`: scheme, host and optional path prefix, e.g. `http://localhost:5000/api`
/// - `timeout`: humantime duration string applied to each request, e.g. `"10s"`
/// - `user_agent`: value of the `User-Agent` header sent with each request
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RoutingServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_USER_AGENT: &str = concat!("navette/", env!("CARGO_PKG_VERSION"));

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for RoutingServiceConfig {
    fn default() -> Self {
        RoutingServiceConfig::new(DEFAULT_BASE_URL)
    }
}

impl RoutingServiceConfig {
    pub fn new(base_url: &str) -> RoutingServiceConfig {
        RoutingServiceConfig {
            base_url: base_url.to_string(),
            timeout: None,
            user_agent: None,
        }
    }

    /// the request timeout, falling back to [`DEFAULT_TIMEOUT`] when unset.
    pub fn timeout(&self) -> Result<Duration, ClientError> {
        match &self.timeout {
            None => Ok(DEFAULT_TIMEOUT),
            Some(text) => {
                let duration = humantime::parse_duration(text.trim()).map_err(|e| {
                    ClientError::InvalidConfig(format!("timeout '{text}' is not a duration: {e}"))
                })?;
                if duration.is_zero() {
                    return Err(ClientError::InvalidConfig(format!(
                        "timeout '{text}' must be greater than zero"
                    )));
                }
                Ok(duration)
            }
        }
    }

    /// the base URL without trailing slashes, after checking that it is an
    /// absolute http(s) URL.
    pub fn normalized_base_url(&self) -> Result<String, ClientError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        let url = reqwest::Url::parse(trimmed).map_err(|e| {
            ClientError::InvalidConfig(format!("base_url '{}' is invalid: {e}", self.base_url))
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(ClientError::InvalidConfig(format!(
                    "base_url '{}' has unsupported scheme '{other}', expected http or https",
                    self.base_url
                )))
            }
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ClientError::InvalidConfig(format!(
                "base_url '{}' must not carry a query or fragment",
                self.base_url
            )));
        }
        Ok(trimmed.to_string())
    }

    pub fn build(&self) -> Result<RoutingServiceClient, ClientError> {
        let base_url = self.normalized_base_url()?;
        let timeout = self.timeout()?;
        let user_agent = self
            .user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| ClientError::ClientBuild(e.to_string()))?;
        log::debug!(
            "routing service client configured for {base_url} with timeout {}",
            humantime::format_duration(timeout)
        );
        Ok(RoutingServiceClient::new(http, base_url))
    }
}
