use log::debug;

use super::constants::BUILD_VERSION_PLACEHOLDER;
use super::shapes::{AttributeValue, ResourceLogs};

impl ResourceLogs {
    /// Replaces every scope version and every top level log attribute value equal to
    /// [`BUILD_VERSION_PLACEHOLDER`] with `build_version`. Running it again is a no-op.
    pub fn fill_default_values(&mut self, build_version: &str) {
        let mut replaced = 0usize;
        for resource_log in &mut self.resource_logs {
            for scope_logs in &mut resource_log.scope_logs {
                if scope_logs.scope.version == BUILD_VERSION_PLACEHOLDER {
                    scope_logs.scope.version = build_version.to_string();
                    replaced += 1;
                }
                for log in &mut scope_logs.logs {
                    let Some(attributes) = log.attributes.as_mut() else {
                        continue;
                    };
                    for value in attributes.values_mut() {
                        if value.as_str() == Some(BUILD_VERSION_PLACEHOLDER) {
                            *value = AttributeValue::from(build_version);
                            replaced += 1;
                        }
                    }
                }
            }
        }
        if replaced > 0 {
            debug!(
                "replaced {} build version placeholders with {}",
                replaced, build_version
            );
        }
    }

    pub fn with_default_values(mut self, build_version: &str) -> Self {
        self.fill_default_values(build_version);
        self
    }
}
