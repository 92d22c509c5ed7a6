// Endpoint availability registry used to gate UI features

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::info;

// ============================================================================
// Types
// ============================================================================

/// Why an endpoint is unavailable.
///
/// `None` belongs to enabled endpoints only. A disabled endpoint whose cause
/// was not reported is `Unknown`, never `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisableReason {
    Config,
    Dependency,
    Unknown,
    None,
}

impl DisableReason {
    /// Map a backend reason string; unrecognised values are `Unknown`
    pub fn from_wire(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CONFIG" => DisableReason::Config,
            "DEPENDENCY" => DisableReason::Dependency,
            "NONE" => DisableReason::None,
            _ => DisableReason::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointAvailability {
    pub enabled: bool,
    pub reason: DisableReason,
}

impl EndpointAvailability {
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            reason: DisableReason::None,
        }
    }

    /// Disabled with the given cause; `None` is promoted to `Unknown`
    pub fn disabled(reason: DisableReason) -> Self {
        let reason = match reason {
            DisableReason::None => DisableReason::Unknown,
            other => other,
        };
        Self {
            enabled: false,
            reason,
        }
    }

    /// State reported for endpoints missing from the snapshot
    pub fn unknown() -> Self {
        Self::disabled(DisableReason::Unknown)
    }
}

/// Entry as sent by the backend config service
#[derive(Debug, Clone, Deserialize)]
pub struct WireAvailability {
    pub enabled: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl From<WireAvailability> for EndpointAvailability {
    fn from(wire: WireAvailability) -> Self {
        if wire.enabled {
            EndpointAvailability::enabled()
        } else {
            let reason = wire
                .reason
                .as_deref()
                .map(DisableReason::from_wire)
                .unwrap_or(DisableReason::Unknown);
            EndpointAvailability::disabled(reason)
        }
    }
}

// ============================================================================
// Snapshot
// ============================================================================

/// One complete endpoint configuration, immutable once built
#[derive(Debug, Clone)]
pub struct EndpointSnapshot {
    endpoints: HashMap<String, EndpointAvailability>,
    loaded_at: DateTime<Utc>,
}

impl EndpointSnapshot {
    pub fn new(endpoints: HashMap<String, EndpointAvailability>) -> Self {
        Self {
            endpoints,
            loaded_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(HashMap::new())
    }

    pub fn from_wire(wire: HashMap<String, WireAvailability>) -> Self {
        Self::new(wire.into_iter().map(|(id, w)| (id, w.into())).collect())
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let wire: HashMap<String, WireAvailability> = serde_json::from_str(json)?;
        Ok(Self::from_wire(wire))
    }

    pub fn get(&self, endpoint_id: &str) -> EndpointAvailability {
        self.endpoints
            .get(endpoint_id)
            .copied()
            .unwrap_or_else(EndpointAvailability::unknown)
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

/// Summary of the current snapshot for diagnostics views
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDiagnostics {
    pub loaded_at: DateTime<Utc>,
    pub endpoint_count: usize,
    pub disabled: Vec<DisabledEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisabledEndpoint {
    pub id: String,
    pub reason: DisableReason,
}

// ============================================================================
// Registry
// ============================================================================

/// Holds the current snapshot; replaced wholesale on reconfiguration
pub struct EndpointRegistry {
    current: RwLock<Arc<EndpointSnapshot>>,
}

impl EndpointRegistry {
    pub fn new(snapshot: EndpointSnapshot) -> Self {
        Self {
            current: RwLock::new(Arc::new(snapshot)),
        }
    }

    /// Snapshot in effect right now. Hold on to it for consistent reads
    /// of several endpoints.
    pub fn snapshot(&self) -> Arc<EndpointSnapshot> {
        self.current.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn is_enabled(&self, endpoint_id: &str) -> EndpointAvailability {
        self.snapshot().get(endpoint_id)
    }

    pub fn any_enabled<'a>(&self, endpoint_ids: impl IntoIterator<Item = &'a str>) -> bool {
        let snapshot = self.snapshot();
        endpoint_ids.into_iter().any(|id| snapshot.get(id).enabled)
    }

    /// False for an empty id list
    pub fn all_enabled<'a>(&self, endpoint_ids: impl IntoIterator<Item = &'a str>) -> bool {
        let snapshot = self.snapshot();
        let mut seen = false;
        for id in endpoint_ids {
            if !snapshot.get(id).enabled {
                return false;
            }
            seen = true;
        }
        seen
    }

    pub fn replace(&self, snapshot: EndpointSnapshot) {
        let count = snapshot.len();
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(snapshot);
        info!(target: "endpoints", "endpoint snapshot replaced ({} endpoints)", count);
    }

    /// Disabled endpoints in the current snapshot, sorted by id
    pub fn disabled_endpoints(&self) -> Vec<(String, DisableReason)> {
        disabled_in(&self.snapshot())
    }

    pub fn diagnostics(&self) -> EndpointDiagnostics {
        let snapshot = self.snapshot();
        EndpointDiagnostics {
            loaded_at: snapshot.loaded_at(),
            endpoint_count: snapshot.len(),
            disabled: disabled_in(&snapshot)
                .into_iter()
                .map(|(id, reason)| DisabledEndpoint { id, reason })
                .collect(),
        }
    }
}

fn disabled_in(snapshot: &EndpointSnapshot) -> Vec<(String, DisableReason)> {
    let mut disabled: Vec<_> = snapshot
        .endpoints
        .iter()
        .filter(|(_, a)| !a.enabled)
        .map(|(id, a)| (id.clone(), a.reason))
        .collect();
    disabled.sort_by(|a, b| a.0.cmp(&b.0));
    disabled
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new(EndpointSnapshot::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: &[(&str, EndpointAvailability)]) -> EndpointSnapshot {
        EndpointSnapshot::new(entries.iter().map(|(id, a)| (id.to_string(), *a)).collect())
    }

    #[test]
    fn test_unknown_endpoint() {
        let registry = EndpointRegistry::default();
        let availability = registry.is_enabled("unknown-endpoint");
        assert!(!availability.enabled);
        assert_eq!(availability.reason, DisableReason::Unknown);
    }

    #[test]
    fn test_known_endpoints() {
        let registry = EndpointRegistry::new(snapshot(&[
            ("merge-pdfs", EndpointAvailability::enabled()),
            ("ocr-pdf", EndpointAvailability::disabled(DisableReason::Dependency)),
        ]));
        assert_eq!(registry.is_enabled("merge-pdfs"), EndpointAvailability::enabled());
        assert_eq!(
            registry.is_enabled("ocr-pdf").reason,
            DisableReason::Dependency
        );
    }

    #[test]
    fn test_disabled_none_becomes_unknown() {
        let availability = EndpointAvailability::disabled(DisableReason::None);
        assert_eq!(availability.reason, DisableReason::Unknown);
    }

    #[test]
    fn test_wire_normalization() {
        let snapshot = EndpointSnapshot::from_json(
            r#"{
                "merge-pdfs": {"enabled": true, "reason": "CONFIG"},
                "ocr-pdf": {"enabled": false, "reason": "DEPENDENCY"},
                "compress-pdf": {"enabled": false, "reason": "CONFIG"},
                "split-pdf": {"enabled": false},
                "rotate-pdf": {"enabled": false, "reason": null},
                "sign": {"enabled": false, "reason": "NONE"},
                "repair": {"enabled": false, "reason": "SOMETHING_NEW"}
            }"#,
        )
        .unwrap();

        assert_eq!(snapshot.get("merge-pdfs"), EndpointAvailability::enabled());
        assert_eq!(snapshot.get("ocr-pdf").reason, DisableReason::Dependency);
        assert_eq!(snapshot.get("compress-pdf").reason, DisableReason::Config);
        for id in ["split-pdf", "rotate-pdf", "sign", "repair"] {
            assert_eq!(snapshot.get(id), EndpointAvailability::unknown(), "{}", id);
        }
    }

    #[test]
    fn test_replace_is_wholesale() {
        let registry = EndpointRegistry::new(snapshot(&[
            ("a", EndpointAvailability::enabled()),
            ("b", EndpointAvailability::enabled()),
        ]));
        let before = registry.snapshot();

        registry.replace(snapshot(&[(
            "a",
            EndpointAvailability::disabled(DisableReason::Config),
        )]));

        // Old readers keep their complete snapshot
        assert!(before.get("a").enabled);
        assert!(before.get("b").enabled);

        // New readers see only the new one, "b" is gone rather than stale
        assert!(!registry.is_enabled("a").enabled);
        assert_eq!(registry.is_enabled("b"), EndpointAvailability::unknown());
    }

    #[test]
    fn test_group_helpers() {
        let registry = EndpointRegistry::new(snapshot(&[
            ("a", EndpointAvailability::enabled()),
            ("b", EndpointAvailability::disabled(DisableReason::Config)),
        ]));
        assert!(registry.any_enabled(["a", "b"]));
        assert!(!registry.any_enabled(["b", "missing"]));
        assert!(registry.all_enabled(["a"]));
        assert!(!registry.all_enabled(["a", "b"]));
        assert!(!registry.all_enabled(std::iter::empty()));
    }

    #[test]
    fn test_disabled_endpoints_listing() {
        let registry = EndpointRegistry::new(snapshot(&[
            ("z", EndpointAvailability::disabled(DisableReason::Dependency)),
            ("a", EndpointAvailability::enabled()),
            ("m", EndpointAvailability::unknown()),
        ]));
        assert_eq!(
            registry.disabled_endpoints(),
            vec![
                ("m".to_string(), DisableReason::Unknown),
                ("z".to_string(), DisableReason::Dependency),
            ]
        );
    }

    #[test]
    fn test_diagnostics_track_replacement() {
        let registry = EndpointRegistry::default();
        let initial = registry.diagnostics();
        assert_eq!(initial.endpoint_count, 0);
        assert!(initial.disabled.is_empty());

        registry.replace(snapshot(&[
            ("a", EndpointAvailability::enabled()),
            ("b", EndpointAvailability::disabled(DisableReason::Config)),
        ]));
        let after = registry.diagnostics();
        assert!(after.loaded_at >= initial.loaded_at);
        assert_eq!(after.endpoint_count, 2);
        assert_eq!(
            after.disabled,
            vec![DisabledEndpoint {
                id: "b".to_string(),
                reason: DisableReason::Config,
            }]
        );

        let json = serde_json::to_value(&after).unwrap();
        assert_eq!(json["endpointCount"], 2);
        assert_eq!(json["disabled"][0], serde_json::json!({"id": "b", "reason": "CONFIG"}));
        assert!(json["loadedAt"].is_string());
    }

    #[test]
    fn test_availability_serializes_for_frontend() {
        let json = serde_json::to_value(EndpointAvailability::unknown()).unwrap();
        assert_eq!(json, serde_json::json!({"enabled": false, "reason": "UNKNOWN"}));
    }
}
