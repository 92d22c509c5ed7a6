// DocEdit Bridge - environment bridge for the document editor
// Reconciles the browser build and the desktop webview build:
// execution mode, backend origin and credentials, endpoint gating,
// and hand-off of native file dialog results to the web file manager

// ============================================================================
// Module Imports
// ============================================================================

pub mod api;
pub mod bridge;
pub mod consent;
pub mod endpoints;
pub mod environment;
pub mod error;
pub mod files;
pub mod logging;
pub mod settings;

#[cfg(feature = "desktop")]
pub mod commands;

pub use api::{resolve_base_url, ApiClient, ApiConfig, AuthHeaderProvider, CredentialSlot};
pub use bridge::{Bridge, SharedBridge};
pub use consent::{consent_overrides, ConsentOverrides};
pub use endpoints::{
    DisableReason, EndpointAvailability, EndpointDiagnostics, EndpointRegistry, EndpointSnapshot,
};
pub use environment::{DesktopSignal, EnvironmentClassifier, ExecutionMode};
pub use error::BridgeError;
pub use files::{FileReferenceKey, PendingFileBroker, PendingFileHandle};
pub use settings::AppSettings;

// ============================================================================
// Desktop Plugin
// ============================================================================

pub const PLUGIN_NAME: &str = "docedit-bridge";

/// Tauri plugin exposing the bridge commands to the webview.
/// Commands are invoked as `plugin:docedit-bridge|<command>`.
#[cfg(feature = "desktop")]
pub fn init<R: tauri::Runtime>() -> tauri::plugin::TauriPlugin<R> {
    use std::sync::Arc;
    use tauri::Manager;

    tauri::plugin::Builder::new(PLUGIN_NAME)
        .setup(|app, _api| {
            logging::init();
            app.manage::<SharedBridge>(Arc::new(Bridge::from_environment()));
            tracing::info!(target: "bridge", "plugin {} ready", PLUGIN_NAME);
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Environment & backend
            commands::get_execution_mode,
            commands::get_base_url,
            commands::get_auth_headers,
            commands::get_consent_overrides,
            // Endpoint availability
            commands::get_endpoint_availability,
            commands::get_endpoints_availability,
            commands::get_endpoint_diagnostics,
            commands::refresh_endpoint_availability,
            // Pending files
            commands::register_pending_files,
            commands::consume_pending_file,
            commands::pending_file_count,
        ])
        .build()
}
