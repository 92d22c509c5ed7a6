// Error type for the fallible edges (keychain, settings file, backend)
//
// Core lookups (token, base URL, endpoint state, file keys) never fail; they
// return a defined absent/default value instead.

#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("Keychain error: {0}")]
    Keychain(#[from] keyring::Error),

    #[error("Settings file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },
}

pub type Result<T> = std::result::Result<T, BridgeError>;

impl From<BridgeError> for String {
    fn from(value: BridgeError) -> Self {
        value.to_string()
    }
}
