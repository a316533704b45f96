use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub type Attributes = BTreeMap<String, AttributeValue>;

/// Top level collection, as loaded from an expectation file or received from a collector.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResourceLogs {
    #[serde(default)]
    pub resource_logs: Vec<ResourceLog>,
}

impl ResourceLogs {
    pub fn new(resource_logs: Vec<ResourceLog>) -> Self {
        Self { resource_logs }
    }

    /// Total number of log records across every resource and scope.
    pub fn record_count(&self) -> usize {
        self.resource_logs
            .iter()
            .flat_map(|rl| rl.scope_logs.iter())
            .map(|sl| sl.logs.len())
            .sum()
    }
}

impl From<Vec<ResourceLog>> for ResourceLogs {
    fn from(resource_logs: Vec<ResourceLog>) -> Self {
        Self::new(resource_logs)
    }
}

/// A Resource (set of attributes) and the scope groups it emitted.
///
/// The resource's attributes sit inline next to `scope_logs`. Both directions go
/// through `ResourceLogFields` so unknown keys at this level are rejected.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(from = "ResourceLogFields", into = "ResourceLogFields")]
pub struct ResourceLog {
    pub resource: Resource,
    pub scope_logs: Vec<ScopeLogs>,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ResourceLogFields {
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    scope_logs: Vec<ScopeLogs>,
}

impl From<ResourceLogFields> for ResourceLog {
    fn from(fields: ResourceLogFields) -> Self {
        Self {
            resource: Resource::new(fields.attributes),
            scope_logs: fields.scope_logs,
        }
    }
}

impl From<ResourceLog> for ResourceLogFields {
    fn from(resource_log: ResourceLog) -> Self {
        Self {
            attributes: resource_log.resource.attributes,
            scope_logs: resource_log.scope_logs,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Resource {
    #[serde(default)]
    pub attributes: Attributes,
}

impl Resource {
    pub fn new(attributes: Attributes) -> Self {
        Self { attributes }
    }

    /// Resources are the same logical resource only when their attribute sets are identical.
    pub fn matches(&self, other: &Resource) -> bool {
        self.attributes == other.attributes
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", key, value)?;
        }
        write!(f, "}}")
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScopeLogs {
    #[serde(rename = "instrumentation_scope", default)]
    pub scope: InstrumentationScope,
    #[serde(default)]
    pub logs: Vec<Log>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InstrumentationScope {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
}

impl InstrumentationScope {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for InstrumentationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}

/// A single log record. Every optional field distinguishes "not specified"
/// (`None`) from an explicitly provided value, including empty ones.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Log {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<SeverityNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity_text: Option<String>,
}

impl fmt::Display for Log {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let yaml = serde_yaml::to_string(self).map_err(|_| fmt::Error)?;
        write!(f, "{}", yaml.trim_end())
    }
}

/// Attribute and body values, mirroring the OTLP AnyValue kinds.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Array(Vec<AttributeValue>),
    Map(BTreeMap<String, AttributeValue>),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Null => write!(f, "null"),
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Int(i) => write!(f, "{}", i),
            AttributeValue::Double(d) => write!(f, "{}", d),
            AttributeValue::String(s) => write!(f, "{}", s),
            AttributeValue::Array(_) | AttributeValue::Map(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                write!(f, "{}", json)
            }
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

/// OpenTelemetry log severity number
/// https://opentelemetry.io/docs/specs/otel/logs/data-model/#field-severitynumber
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct SeverityNumber(pub i32);

impl SeverityNumber {
    pub const UNSPECIFIED: SeverityNumber = SeverityNumber(0);
    pub const TRACE: SeverityNumber = SeverityNumber(1);
    pub const DEBUG: SeverityNumber = SeverityNumber(5);
    pub const INFO: SeverityNumber = SeverityNumber(9);
    pub const WARN: SeverityNumber = SeverityNumber(13);
    pub const ERROR: SeverityNumber = SeverityNumber(17);
    pub const FATAL: SeverityNumber = SeverityNumber(21);
    pub const MAX: SeverityNumber = SeverityNumber(24);

    pub fn is_valid(&self) -> bool {
        (Self::UNSPECIFIED.0..=Self::MAX.0).contains(&self.0)
    }
}

impl fmt::Display for SeverityNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_valid() {
            return write!(f, "INVALID({})", self.0);
        }
        if *self == Self::UNSPECIFIED {
            return write!(f, "UNSPECIFIED");
        }
        let base = match (self.0 - 1) / 4 {
            0 => "TRACE",
            1 => "DEBUG",
            2 => "INFO",
            3 => "WARN",
            4 => "ERROR",
            _ => "FATAL",
        };
        // TRACE, TRACE2, TRACE3, TRACE4, DEBUG, ...
        match (self.0 - 1) % 4 {
            0 => write!(f, "{}", base),
            offset => write!(f, "{}{}", base, offset + 1),
        }
    }
}
