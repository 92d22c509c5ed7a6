// Storage overrides for the cookie consent banner

use serde::{Deserialize, Serialize};

use crate::environment::ExecutionMode;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cookie: Option<CookieOverrides>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieOverrides {
    pub use_local_storage: bool,
}

/// Cookies do not survive the desktop webview lifecycle reliably, so desktop
/// builds persist consent in local storage. Web keeps the library defaults.
pub fn consent_overrides(mode: ExecutionMode) -> ConsentOverrides {
    match mode {
        ExecutionMode::Desktop => ConsentOverrides {
            cookie: Some(CookieOverrides {
                use_local_storage: true,
            }),
        },
        ExecutionMode::Web => ConsentOverrides::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desktop_uses_local_storage() {
        let json = serde_json::to_value(consent_overrides(ExecutionMode::Desktop)).unwrap();
        assert_eq!(json, serde_json::json!({"cookie": {"useLocalStorage": true}}));
    }

    #[test]
    fn test_web_has_no_overrides() {
        let json = serde_json::to_value(consent_overrides(ExecutionMode::Web)).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }
}
