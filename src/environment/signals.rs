// Individual desktop-detection signals

/// A single source of evidence that the process runs inside the desktop shell
pub trait DesktopSignal: Send + Sync {
    fn name(&self) -> &str;

    /// Must not fail; unset or malformed input reports `false`
    fn is_desktop(&self) -> bool;
}

/// Parse a boolean-ish flag value ("1", "true", "yes", "on")
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Compiled with the `desktop` cargo feature
pub struct BuildFeature;

impl DesktopSignal for BuildFeature {
    fn name(&self) -> &str {
        "build-feature"
    }

    fn is_desktop(&self) -> bool {
        cfg!(feature = "desktop")
    }
}

/// Build mode baked in at compile time through `DOCEDIT_BUILD_MODE`
pub struct BuildMode {
    mode: Option<&'static str>,
}

impl BuildMode {
    pub fn new(mode: Option<&'static str>) -> Self {
        Self { mode }
    }

    pub fn from_build_env() -> Self {
        Self::new(option_env!("DOCEDIT_BUILD_MODE"))
    }
}

impl DesktopSignal for BuildMode {
    fn name(&self) -> &str {
        "build-mode"
    }

    fn is_desktop(&self) -> bool {
        self.mode
            .map(|m| m.trim().eq_ignore_ascii_case("desktop"))
            .unwrap_or(false)
    }
}

/// Runtime environment variable marker
pub struct EnvMarker {
    var: String,
    presence_only: bool,
}

impl EnvMarker {
    /// Desktop when the variable holds a truthy flag
    pub fn new(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            presence_only: false,
        }
    }

    /// Desktop when the variable is set to any non-empty value
    pub fn presence(var: impl Into<String>) -> Self {
        Self {
            var: var.into(),
            presence_only: true,
        }
    }
}

impl DesktopSignal for EnvMarker {
    fn name(&self) -> &str {
        &self.var
    }

    fn is_desktop(&self) -> bool {
        match std::env::var(&self.var) {
            Ok(value) if self.presence_only => !value.trim().is_empty(),
            Ok(value) => parse_flag(&value),
            Err(_) => false,
        }
    }
}

/// Constant signal, for embedders that already know their host
pub struct Fixed {
    name: String,
    value: bool,
}

impl Fixed {
    pub fn new(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl DesktopSignal for Fixed {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_desktop(&self) -> bool {
        self.value
    }
}
