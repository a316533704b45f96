use chrono::{DateTime, Utc};

use super::shapes::{AttributeValue, Attributes, Log, SeverityNumber};

/// Builder for creating log records with a fluent API
///
/// Fields that are never set stay unset, which makes the built log a relaxed
/// expectation that only constrains what was provided.
///
/// # Example
/// ```
/// use telemetry::logs::{LogBuilder, SeverityNumber};
///
/// let log = LogBuilder::new()
///     .with_body("request completed")
///     .with_severity(SeverityNumber::INFO)
///     .with_severity_text("info")
///     .with_attribute("http.method", "POST")
///     .build();
/// assert!(log.timestamp.is_none());
/// ```
#[derive(Default)]
pub struct LogBuilder {
    log: Log,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, body: impl Into<AttributeValue>) -> Self {
        self.log.body = Some(body.into());
        self
    }

    /// Add a single attribute, creating the attribute map if needed
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue>,
    ) -> Self {
        self.log
            .attributes
            .get_or_insert_with(Attributes::new)
            .insert(key.into(), value.into());
        self
    }

    /// Replace the attribute map; an empty map still constrains matching
    pub fn with_attributes(mut self, attributes: Attributes) -> Self {
        self.log.attributes = Some(attributes);
        self
    }

    pub fn with_severity(mut self, severity: SeverityNumber) -> Self {
        self.log.severity = Some(severity);
        self
    }

    pub fn with_severity_text(mut self, severity_text: impl Into<String>) -> Self {
        self.log.severity_text = Some(severity_text.into());
        self
    }

    /// Set when the event occurred
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.log.timestamp = Some(timestamp);
        self
    }

    /// Set when the collector observed the event
    pub fn with_observed_timestamp(mut self, observed: DateTime<Utc>) -> Self {
        self.log.observed_timestamp = Some(observed);
        self
    }

    pub fn build(self) -> Log {
        self.log
    }
}
