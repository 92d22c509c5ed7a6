// Backend access: origin, credentials, configuration client

pub mod auth;
pub mod base_url;
pub mod client;

pub use auth::{AuthHeaderProvider, CredentialSlot, KeychainSlot, MemorySlot, AUTH_TOKEN_KEY};
pub use base_url::{resolve_base_url, ApiConfig, DEMO_BASE_URL};
pub use client::ApiClient;
