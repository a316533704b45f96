use duration_string::DurationString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::errors::TelemetryError;
use crate::version::{EnvVersion, FixedVersion, VersionSource};

/// How received logs are checked against an expectation document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssertionConfig {
    /// Replaces the build version reported by the environment
    pub build_version: Option<String>,
    #[serde(default = "default_receive_timeout")]
    pub receive_timeout: DurationString,
    #[serde(default = "default_poll_interval")]
    pub poll_interval: DurationString,
    #[serde(default = "default_true")]
    pub flatten_observed: bool,
    /// Require exactly the expected logs instead of a superset
    #[serde(default)]
    pub exact: bool,
}

fn default_receive_timeout() -> DurationString {
    DurationString::from(Duration::from_secs(10))
}

fn default_poll_interval() -> DurationString {
    DurationString::from(Duration::from_millis(100))
}

fn default_true() -> bool {
    true
}

impl Default for AssertionConfig {
    fn default() -> Self {
        Self {
            build_version: None,
            receive_timeout: default_receive_timeout(),
            poll_interval: default_poll_interval(),
            flatten_observed: true,
            exact: false,
        }
    }
}

impl AssertionConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TelemetryError> {
        let config: AssertionConfig = serde_yaml::from_str(yaml)
            .map_err(|e| TelemetryError::Configuration(e.to_string()))?;
        if config.poll_interval() > config.receive_timeout() {
            return Err(TelemetryError::Configuration(format!(
                "poll_interval {:?} exceeds receive_timeout {:?}",
                config.poll_interval(),
                config.receive_timeout()
            )));
        }
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TelemetryError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| TelemetryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&yaml)
    }

    pub fn receive_timeout(&self) -> Duration {
        self.receive_timeout.clone().into()
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval.clone().into()
    }

    pub fn version_source(&self) -> Box<dyn VersionSource> {
        match &self.build_version {
            Some(version) => Box::new(FixedVersion::new(version.clone())),
            None => Box::new(EnvVersion),
        }
    }
}
