// Log subscriber setup

use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "DOCEDIT_LOG";

/// Install a fmt subscriber filtered by `DOCEDIT_LOG` (default `info`).
/// Safe to call more than once; only the first call installs anything.
pub fn init() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
