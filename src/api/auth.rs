// Bearer token headers for backend requests

use keyring::Entry;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::{debug, warn};

use crate::error::Result;

const KEYCHAIN_SERVICE: &str = "docedit-bridge";

/// Fixed name of the credential slot holding the JWT
pub const AUTH_TOKEN_KEY: &str = "docedit_jwt";

pub const AUTHORIZATION_HEADER: &str = "Authorization";

/// Process-wide credential slot, written by the external login flow
pub trait CredentialSlot: Send + Sync {
    fn read(&self) -> Option<String>;
}

/// Token stored in the OS keychain
pub struct KeychainSlot {
    key: String,
}

impl KeychainSlot {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn entry(&self) -> Result<Entry> {
        Ok(Entry::new(KEYCHAIN_SERVICE, &self.key)?)
    }

    pub fn store(&self, token: &str) -> Result<()> {
        self.entry()?.set_password(token)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        // A missing entry is already cleared
        match self.entry()?.delete_password() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

impl Default for KeychainSlot {
    fn default() -> Self {
        Self::new(AUTH_TOKEN_KEY)
    }
}

impl CredentialSlot for KeychainSlot {
    fn read(&self) -> Option<String> {
        let entry = match self.entry() {
            Ok(entry) => entry,
            Err(e) => {
                warn!(target: "auth", "keychain unavailable: {}", e);
                return None;
            }
        };
        match entry.get_password() {
            Ok(token) => Some(token),
            Err(keyring::Error::NoEntry) => None,
            Err(e) => {
                warn!(target: "auth", "keychain read failed: {}", e);
                None
            }
        }
    }
}

/// In-memory slot
#[derive(Default)]
pub struct MemorySlot {
    token: RwLock<Option<String>>,
}

impl MemorySlot {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    pub fn store(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

impl CredentialSlot for MemorySlot {
    fn read(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Builds the auth headers callers merge into their own requests
#[derive(Clone)]
pub struct AuthHeaderProvider {
    slot: Arc<dyn CredentialSlot>,
}

impl AuthHeaderProvider {
    pub fn new(slot: Arc<dyn CredentialSlot>) -> Self {
        Self { slot }
    }

    pub fn keychain() -> Self {
        Self::new(Arc::new(KeychainSlot::default()))
    }

    pub fn anonymous() -> Self {
        Self::new(Arc::new(MemorySlot::default()))
    }

    /// `{"Authorization": "Bearer <token>"}`, or empty when no token is stored
    pub fn auth_headers(&self) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        match self.slot.read() {
            Some(token) if !token.is_empty() => {
                headers.insert(AUTHORIZATION_HEADER.to_string(), format!("Bearer {}", token));
            }
            _ => debug!(target: "auth", "no stored token, sending anonymous request"),
        }
        headers
    }

    pub fn apply(&self, mut request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        for (name, value) in self.auth_headers() {
            request = request.header(name, value);
        }
        request
    }
}
