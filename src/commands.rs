// Tauri command handlers - thin wrappers that delegate to the bridge

use std::collections::HashMap;
use tauri::State;

use crate::bridge::SharedBridge;
use crate::consent::ConsentOverrides;
use crate::endpoints::{EndpointAvailability, EndpointDiagnostics};
use crate::environment::ExecutionMode;
use crate::files::{FileReferenceKey, PendingFileHandle};

// ============================================================================
// Environment & Backend Commands
// ============================================================================

#[tauri::command]
pub fn get_execution_mode(bridge: State<'_, SharedBridge>) -> ExecutionMode {
    bridge.mode()
}

#[tauri::command]
pub fn get_base_url(bridge: State<'_, SharedBridge>) -> String {
    bridge.base_url()
}

#[tauri::command]
pub fn get_auth_headers(bridge: State<'_, SharedBridge>) -> HashMap<String, String> {
    bridge.auth().auth_headers()
}

#[tauri::command]
pub fn get_consent_overrides(bridge: State<'_, SharedBridge>) -> ConsentOverrides {
    bridge.consent_overrides()
}

// ============================================================================
// Endpoint Availability Commands
// ============================================================================

#[tauri::command]
pub fn get_endpoint_availability(
    bridge: State<'_, SharedBridge>,
    endpoint_id: String,
) -> EndpointAvailability {
    bridge.is_enabled(&endpoint_id)
}

/// Several endpoints read from one snapshot
#[tauri::command]
pub fn get_endpoints_availability(
    bridge: State<'_, SharedBridge>,
    endpoint_ids: Vec<String>,
) -> HashMap<String, EndpointAvailability> {
    let snapshot = bridge.endpoints().snapshot();
    endpoint_ids
        .into_iter()
        .map(|id| {
            let availability = snapshot.get(&id);
            (id, availability)
        })
        .collect()
}

#[tauri::command]
pub fn get_endpoint_diagnostics(bridge: State<'_, SharedBridge>) -> EndpointDiagnostics {
    bridge.endpoints().diagnostics()
}

#[tauri::command]
pub async fn refresh_endpoint_availability(bridge: State<'_, SharedBridge>) -> Result<usize, String> {
    Ok(bridge.refresh_endpoints().await?)
}

// ============================================================================
// Pending File Commands
// ============================================================================

/// Called with the paths returned by the native open dialog
#[tauri::command]
pub fn register_pending_files(
    bridge: State<'_, SharedBridge>,
    paths: Vec<String>,
) -> Vec<PendingFileHandle> {
    bridge.files().register_selection(paths)
}

/// `None` when the key is unknown or already consumed
#[tauri::command]
pub fn consume_pending_file(bridge: State<'_, SharedBridge>, key: String) -> Option<String> {
    bridge.files().consume(&FileReferenceKey::from(key))
}

#[tauri::command]
pub fn pending_file_count(bridge: State<'_, SharedBridge>) -> usize {
    bridge.files().len()
}
