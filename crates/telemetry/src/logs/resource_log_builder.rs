use super::constants::{resource, scope};
use super::shapes::{
    AttributeValue, Attributes, InstrumentationScope, Log, Resource, ResourceLog, ScopeLogs,
};

/// Builder for creating ResourceLog structures
///
/// Provides a fluent API for building the resource/scope/log hierarchy
pub struct ResourceLogBuilder {
    resource_attributes: Attributes,
    scope_name: String,
    scope_version: String,
    logs: Vec<Log>,
}

impl ResourceLogBuilder {
    /// Create a new ResourceLog builder with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        let service_name: String = service_name.into();
        Self::empty().with_resource_attribute(resource::SERVICE_NAME, service_name)
    }

    /// Create a builder whose resource starts without any attributes
    pub fn empty() -> Self {
        Self {
            resource_attributes: Attributes::new(),
            scope_name: scope::DEFAULT_NAME.to_string(),
            scope_version: scope::DEFAULT_VERSION.to_string(),
            logs: Vec::new(),
        }
    }

    /// Add a resource attribute (e.g., deployment.environment, host.name)
    pub fn with_resource_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.resource_attributes.insert(key.into(), value.into());
        self
    }

    /// Set the instrumentation scope name
    pub fn with_scope_name(mut self, name: impl Into<String>) -> Self {
        self.scope_name = name.into();
        self
    }

    /// Set the instrumentation scope version
    pub fn with_scope_version(mut self, version: impl Into<String>) -> Self {
        self.scope_version = version.into();
        self
    }

    /// Add a single log
    pub fn add_log(mut self, log: Log) -> Self {
        self.logs.push(log);
        self
    }

    /// Add multiple logs
    pub fn add_logs(mut self, logs: Vec<Log>) -> Self {
        self.logs.extend(logs);
        self
    }

    /// Build the ResourceLog
    pub fn build(self) -> ResourceLog {
        ResourceLog {
            resource: Resource::new(self.resource_attributes),
            scope_logs: vec![ScopeLogs {
                scope: InstrumentationScope::new(self.scope_name, self.scope_version),
                logs: self.logs,
            }],
        }
    }
}
