// Backend origin selection

use serde::{Deserialize, Serialize};

/// Public demo deployment used when no backend is configured
pub const DEMO_BASE_URL: &str = "https://demo.docedit.app";

/// Connection settings supplied by the configuration snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: Some(base_url.into()),
        }
    }
}

/// Configured base URL verbatim, or the demo origin when unset or empty
pub fn resolve_base_url(config: &ApiConfig) -> String {
    match config.base_url.as_deref() {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => DEMO_BASE_URL.to_string(),
    }
}
