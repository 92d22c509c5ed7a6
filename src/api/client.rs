// HTTP client for the backend configuration service

use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

use super::auth::AuthHeaderProvider;
use super::base_url::{resolve_base_url, ApiConfig};
use crate::endpoints::{EndpointSnapshot, WireAvailability};
use crate::error::{BridgeError, Result};

pub const ENDPOINTS_AVAILABILITY_PATH: &str = "/api/v1/config/endpoints-availability";

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        Self::new(resolve_base_url(config))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch the endpoint availability set and build a registry snapshot
    pub async fn fetch_endpoint_availability(
        &self,
        auth: &AuthHeaderProvider,
    ) -> Result<EndpointSnapshot> {
        let url = self.url(ENDPOINTS_AVAILABILITY_PATH);
        debug!(target: "api", "GET {}", url);

        let response = auth.apply(self.client.get(&url)).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(BridgeError::Status { status, body });
        }

        let wire: HashMap<String, WireAvailability> = response.json().await?;
        Ok(EndpointSnapshot::from_wire(wire))
    }
}
