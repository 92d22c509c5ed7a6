// Execution mode detection (browser page vs desktop webview)

mod signals;

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::debug;

pub use signals::{parse_flag, BuildFeature, BuildMode, DesktopSignal, EnvMarker, Fixed};

/// Runtime variable set by embedders that load the web build inside a desktop shell
pub const DESKTOP_ENV_VAR: &str = "DOCEDIT_DESKTOP";

/// Set by the Tauri CLI for `tauri dev` / `tauri build` processes
pub const TAURI_PLATFORM_ENV_VAR: &str = "TAURI_ENV_PLATFORM";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    Web,
    Desktop,
}

impl ExecutionMode {
    /// Mode of the running process, classified once with the default signals
    pub fn current() -> Self {
        static MODE: OnceLock<ExecutionMode> = OnceLock::new();
        *MODE.get_or_init(|| EnvironmentClassifier::default().mode())
    }

    pub fn is_desktop(self) -> bool {
        self == ExecutionMode::Desktop
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExecutionMode::Web => "web",
            ExecutionMode::Desktop => "desktop",
        }
    }
}

/// Ordered list of desktop-indicating signals, combined with short-circuit OR.
///
/// New detection sources are added by pushing another [`DesktopSignal`];
/// callers only ever ask for [`EnvironmentClassifier::mode`].
pub struct EnvironmentClassifier {
    signals: Vec<Box<dyn DesktopSignal>>,
}

impl EnvironmentClassifier {
    pub fn new(signals: Vec<Box<dyn DesktopSignal>>) -> Self {
        Self { signals }
    }

    pub fn with_signal(mut self, signal: impl DesktopSignal + 'static) -> Self {
        self.signals.push(Box::new(signal));
        self
    }

    pub fn signal_names(&self) -> Vec<&str> {
        self.signals.iter().map(|s| s.name()).collect()
    }

    pub fn mode(&self) -> ExecutionMode {
        match self.signals.iter().find(|s| s.is_desktop()) {
            Some(signal) => {
                debug!(target: "environment", signal = signal.name(), "desktop signal matched");
                ExecutionMode::Desktop
            }
            None => ExecutionMode::Web,
        }
    }
}

impl Default for EnvironmentClassifier {
    fn default() -> Self {
        Self::new(vec![
            Box::new(BuildFeature),
            Box::new(BuildMode::from_build_env()),
            Box::new(EnvMarker::new(DESKTOP_ENV_VAR)),
            Box::new(EnvMarker::presence(TAURI_PLATFORM_ENV_VAR)),
        ])
    }
}
