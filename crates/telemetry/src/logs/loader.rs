use log::debug;
use std::path::Path;

use super::shapes::ResourceLogs;
use crate::errors::TelemetryError;
use crate::version::{EnvVersion, VersionSource};

impl ResourceLogs {
    /// Parses an expectation document, fills in the build version and validates it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, TelemetryError> {
        Self::from_yaml_str_with(yaml, &EnvVersion)
    }

    pub fn from_yaml_str_with(
        yaml: &str,
        version: &dyn VersionSource,
    ) -> Result<Self, TelemetryError> {
        let loaded: ResourceLogs = serde_yaml::from_str(yaml).map_err(TelemetryError::Yaml)?;
        let loaded = loaded.with_default_values(&version.build_version());
        loaded.validate()?;
        Ok(loaded)
    }

    /// Returns a ResourceLogs generated by parsing the yaml file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TelemetryError> {
        Self::load_with(path, &EnvVersion)
    }

    pub fn load_with(
        path: impl AsRef<Path>,
        version: &dyn VersionSource,
    ) -> Result<Self, TelemetryError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path).map_err(|source| TelemetryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let loaded = Self::from_yaml_str_with(&yaml, version)?;
        debug!(
            "loaded {} resources with {} logs from {}",
            loaded.resource_logs.len(),
            loaded.record_count(),
            path.display()
        );
        Ok(loaded)
    }

    /// Checks serde can't express: severity numbers must lie within the OTEL range.
    /// Unnamed instrumentation scopes are valid.
    pub fn validate(&self) -> Result<(), TelemetryError> {
        for resource_log in &self.resource_logs {
            for scope_logs in &resource_log.scope_logs {
                for log in &scope_logs.logs {
                    if let Some(severity) = log.severity.filter(|s| !s.is_valid()) {
                        return Err(TelemetryError::Validation(format!(
                            "severity {} out of range in instrumentation scope {}",
                            severity.0, scope_logs.scope
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn to_yaml_string(&self) -> Result<String, TelemetryError> {
        serde_yaml::to_string(self).map_err(|source| TelemetryError::Serialization {
            entity: "resource logs",
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::{
        AttributeValue, InstrumentationScope, LogBuilder, ResourceLogBuilder,
        BUILD_VERSION_PLACEHOLDER,
    };
    use crate::version::FixedVersion;
    use pretty_assertions::assert_eq;

    const EXPECTED: &str = r#"
resource_logs:
  - attributes:
      host: a
    scope_logs:
      - instrumentation_scope:
          name: s
          version: "<VERSION_FROM_BUILD>"
        logs:
          - severity_text: info
            body: x
            attributes:
              version: "<VERSION_FROM_BUILD>"
"#;

    #[test]
    fn test_from_yaml_fills_build_version() {
        let loaded =
            ResourceLogs::from_yaml_str_with(EXPECTED, &FixedVersion::new("1.2.3")).unwrap();

        let scope_logs = &loaded.resource_logs[0].scope_logs[0];
        assert_eq!(scope_logs.scope, InstrumentationScope::new("s", "1.2.3"));
        assert_eq!(
            scope_logs.logs[0].attributes.as_ref().unwrap().get("version"),
            Some(&AttributeValue::from("1.2.3"))
        );
        assert!(!loaded.to_yaml_string().unwrap().contains(BUILD_VERSION_PLACEHOLDER));
    }

    #[test]
    fn test_load_reads_file() {
        let path =
            std::env::temp_dir().join(format!("telemetry-loader-{}.yaml", std::process::id()));
        std::fs::write(&path, EXPECTED).unwrap();

        let loaded = ResourceLogs::load_with(&path, &FixedVersion::new("1.2.3")).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.record_count(), 1);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ResourceLogs::load_with("/nonexistent/expected.yaml", &FixedVersion::new("1"))
            .unwrap_err();
        assert!(matches!(err, TelemetryError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/expected.yaml"));
    }

    #[test]
    fn test_malformed_yaml_rejected() {
        let err = ResourceLogs::from_yaml_str_with(
            "resource_logs:\n  - scope_logs:\n      - logz: []\n",
            &FixedVersion::new("1"),
        )
        .unwrap_err();
        assert!(matches!(err, TelemetryError::Yaml(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range_severity() {
        let yaml = r#"
resource_logs:
  - scope_logs:
      - instrumentation_scope:
          name: s
        logs:
          - severity: 99
"#;
        let err = ResourceLogs::from_yaml_str_with(yaml, &FixedVersion::new("1")).unwrap_err();
        assert!(matches!(err, TelemetryError::Validation(_)));
        assert!(err.to_string().contains("severity 99"));
    }

    #[test]
    fn test_omitted_scope_matches_unnamed_scope() {
        let yaml = r#"
resource_logs:
  - scope_logs:
      - logs:
          - body: started
"#;
        let expected = ResourceLogs::from_yaml_str_with(yaml, &FixedVersion::new("1")).unwrap();
        assert_eq!(
            expected.resource_logs[0].scope_logs[0].scope,
            InstrumentationScope::new("", "")
        );

        let observed = ResourceLogs::new(vec![ResourceLogBuilder::empty()
            .with_scope_name("")
            .with_scope_version("")
            .add_log(LogBuilder::new().with_body("started").build())
            .build()]);
        observed.validate().unwrap();
        assert_eq!(observed.contains_all(&expected), Ok(()));
    }

    #[test]
    fn test_misspelled_scope_logs_rejected() {
        let yaml = r#"
resource_logs:
  - attributes:
      host: a
    scope_log:
      - instrumentation_scope:
          name: s
        logs:
          - body: never-emitted
"#;
        let err = ResourceLogs::from_yaml_str_with(yaml, &FixedVersion::new("1")).unwrap_err();
        assert!(matches!(err, TelemetryError::Yaml(_)));
        assert!(err.to_string().contains("scope_log"), "{}", err);
    }
}
