use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::logs::{InstrumentationScope, Log, Resource};

#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("failed to read `{path}`: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed resource logs: {0}")]
    Yaml(#[source] serde_yaml::Error),
    #[error("failed to serialize {entity} for its identity digest: {source}")]
    Serialization {
        entity: &'static str,
        source: serde_yaml::Error,
    },
    #[error("invalid resource logs: {0}")]
    Validation(String),
    #[error("invalid assertion configuration: {0}")]
    Configuration(String),
    #[error(transparent)]
    Containment(#[from] ContainmentError),
    #[error("expected logs not received within {waited:?}: {last}")]
    Timeout {
        waited: Duration,
        last: ContainmentError,
    },
}

/// A negative containment result. Carries the entities involved so callers can
/// inspect them; `Display` renders the diagnostic.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContainmentError {
    #[error(
        "observed resources don't contain all expected resources.\nmissing resources:\n{}\nexpected resources:\n{}\nobserved resources:\n{}",
        render(.missing), render(.expected), render(.observed)
    )]
    MissingResources {
        observed: Vec<Resource>,
        expected: Vec<Resource>,
        missing: Vec<Resource>,
    },
    #[error(
        "resource {resource} doesn't contain all expected instrumentation scopes.\nmissing scopes:\n{}\nexpected scopes:\n{}\nobserved scopes:\n{}",
        render(.missing), render(.expected), render(.observed)
    )]
    MissingScopes {
        resource: Resource,
        observed: Vec<InstrumentationScope>,
        expected: Vec<InstrumentationScope>,
        missing: Vec<InstrumentationScope>,
    },
    #[error(
        "instrumentation scope {scope} doesn't contain all expected logs.\nmissing logs:\n{}\nexpected logs:\n{}\nobserved logs:\n{}",
        render(.missing), render(.expected), render(.observed)
    )]
    MissingLogs {
        scope: InstrumentationScope,
        observed: Vec<Log>,
        expected: Vec<Log>,
        missing: Vec<Log>,
    },
    #[error("observed logs contain entries that were not expected: {0}")]
    Unexpected(Box<ContainmentError>),
}

impl ContainmentError {
    /// Number of entries reported missing at the level that failed.
    pub fn missing_count(&self) -> usize {
        match self {
            ContainmentError::MissingResources { missing, .. } => missing.len(),
            ContainmentError::MissingScopes { missing, .. } => missing.len(),
            ContainmentError::MissingLogs { missing, .. } => missing.len(),
            ContainmentError::Unexpected(inner) => inner.missing_count(),
        }
    }
}

fn render<T: serde::Serialize + std::fmt::Debug>(items: &[T]) -> String {
    serde_yaml::to_string(items).unwrap_or_else(|_| format!("{:?}", items))
}
