//! Resolves the build version substituted for the version placeholder.

/// Overrides the build version reported by [`EnvVersion`].
pub const BUILD_VERSION_ENV: &str = "TELEMETRY_BUILD_VERSION";

pub trait VersionSource {
    fn build_version(&self) -> String;
}

/// Reads `TELEMETRY_BUILD_VERSION`, falling back to this crate's version.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvVersion;

impl VersionSource for EnvVersion {
    fn build_version(&self) -> String {
        std::env::var(BUILD_VERSION_ENV)
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedVersion(pub String);

impl FixedVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl VersionSource for FixedVersion {
    fn build_version(&self) -> String {
        self.0.clone()
    }
}

pub fn build_version() -> String {
    EnvVersion.build_version()
}
