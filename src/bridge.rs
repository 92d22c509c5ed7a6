// Composition root owning one instance of each bridge component

use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use crate::api::{resolve_base_url, ApiClient, ApiConfig, AuthHeaderProvider};
use crate::consent::{consent_overrides, ConsentOverrides};
use crate::endpoints::{EndpointAvailability, EndpointRegistry};
use crate::environment::ExecutionMode;
use crate::error::Result;
use crate::files::PendingFileBroker;
use crate::settings::AppSettings;

pub struct Bridge {
    mode: ExecutionMode,
    api_config: RwLock<ApiConfig>,
    auth: AuthHeaderProvider,
    endpoints: EndpointRegistry,
    files: PendingFileBroker,
}

impl Bridge {
    pub fn new(mode: ExecutionMode, settings: AppSettings, auth: AuthHeaderProvider) -> Self {
        info!(target: "bridge", mode = mode.as_str(), "bridge initialised");
        Self {
            mode,
            api_config: RwLock::new(settings.api),
            auth,
            endpoints: EndpointRegistry::default(),
            files: PendingFileBroker::new(),
        }
    }

    /// Process mode, settings from disk, token from the keychain
    pub fn from_environment() -> Self {
        Self::new(
            ExecutionMode::current(),
            crate::settings::load_settings(),
            AuthHeaderProvider::keychain(),
        )
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn api_config(&self) -> ApiConfig {
        self.api_config.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Swap in a newly loaded configuration
    pub fn set_api_config(&self, config: ApiConfig) {
        *self.api_config.write().unwrap_or_else(|e| e.into_inner()) = config;
    }

    pub fn base_url(&self) -> String {
        resolve_base_url(&self.api_config())
    }

    pub fn auth(&self) -> &AuthHeaderProvider {
        &self.auth
    }

    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    pub fn files(&self) -> &PendingFileBroker {
        &self.files
    }

    pub fn is_enabled(&self, endpoint_id: &str) -> EndpointAvailability {
        self.endpoints.is_enabled(endpoint_id)
    }

    pub fn consent_overrides(&self) -> ConsentOverrides {
        consent_overrides(self.mode)
    }

    /// Reload endpoint availability from the backend. On failure the
    /// previous snapshot stays in place.
    pub async fn refresh_endpoints(&self) -> Result<usize> {
        let client = ApiClient::from_config(&self.api_config())?;
        match client.fetch_endpoint_availability(&self.auth).await {
            Ok(snapshot) => {
                let count = snapshot.len();
                self.endpoints.replace(snapshot);
                Ok(count)
            }
            Err(e) => {
                warn!(target: "bridge", "endpoint refresh from {} failed: {}", client.base_url(), e);
                Err(e)
            }
        }
    }
}

impl Default for Bridge {
    fn default() -> Self {
        Self::new(
            ExecutionMode::Web,
            AppSettings::default(),
            AuthHeaderProvider::anonymous(),
        )
    }
}

/// Shared handle, as managed by the desktop plugin
pub type SharedBridge = Arc<Bridge>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MemorySlot, DEMO_BASE_URL};
    use crate::endpoints::{DisableReason, EndpointSnapshot};
    use tiny_http::{Response, Server};

    fn desktop_bridge(base_url: Option<&str>) -> Bridge {
        Bridge::new(
            ExecutionMode::Desktop,
            AppSettings {
                api: ApiConfig {
                    base_url: base_url.map(str::to_string),
                },
            },
            AuthHeaderProvider::new(Arc::new(MemorySlot::with_token("T"))),
        )
    }

    #[test]
    fn test_defaults() {
        let bridge = Bridge::default();
        assert_eq!(bridge.mode(), ExecutionMode::Web);
        assert_eq!(bridge.base_url(), DEMO_BASE_URL);
        assert!(bridge.auth().auth_headers().is_empty());
        assert_eq!(bridge.is_enabled("anything"), EndpointAvailability::unknown());
        assert_eq!(bridge.consent_overrides(), ConsentOverrides::default());
    }

    #[test]
    fn test_config_swap() {
        let bridge = desktop_bridge(None);
        assert_eq!(bridge.base_url(), DEMO_BASE_URL);
        bridge.set_api_config(ApiConfig::with_base_url("https://self-hosted"));
        assert_eq!(bridge.base_url(), "https://self-hosted");
    }

    #[test]
    fn test_dialog_to_file_manager_flow() {
        let bridge = desktop_bridge(None);
        let handles = bridge.files().register_selection(["/tmp/report.pdf"]);
        let k1 = handles[0].key.clone();

        // navigation does not consume
        assert_eq!(bridge.files().len(), 1);

        assert_eq!(bridge.files().consume(&k1).as_deref(), Some("/tmp/report.pdf"));
        assert_eq!(bridge.files().consume(&k1), None);
    }

    #[tokio::test]
    async fn test_refresh_replaces_snapshot() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                let body = r#"{"compress-pdf":{"enabled":false,"reason":"CONFIG"}}"#;
                request.respond(Response::from_string(body)).ok();
            }
        });

        let base = format!("http://127.0.0.1:{}", port);
        let bridge = desktop_bridge(Some(&base));
        assert_eq!(bridge.refresh_endpoints().await.unwrap(), 1);
        assert_eq!(bridge.is_enabled("compress-pdf").reason, DisableReason::Config);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot() {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().unwrap().port();
        std::thread::spawn(move || {
            if let Ok(request) = server.recv() {
                request
                    .respond(Response::from_string("boom").with_status_code(500))
                    .ok();
            }
        });

        let base = format!("http://127.0.0.1:{}", port);
        let bridge = desktop_bridge(Some(&base));
        bridge
            .endpoints()
            .replace(EndpointSnapshot::from_json(r#"{"merge-pdfs":{"enabled":true}}"#).unwrap());

        assert!(bridge.refresh_endpoints().await.is_err());
        assert!(bridge.is_enabled("merge-pdfs").enabled);
    }
}
