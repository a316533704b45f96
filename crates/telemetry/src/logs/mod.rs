// Resource / scope / log record shapes
mod shapes;
// Comparison engine
mod constants;
mod contains;
mod defaults;
mod equality;
mod flatten;
mod identity;
mod loader;
// Construction helpers
mod log_builder;
mod resource_log_builder;
#[cfg(feature = "log-capture")]
mod sink;

#[cfg(all(test, feature = "log-capture"))]
mod tests;

pub use shapes::{
    AttributeValue, Attributes, InstrumentationScope, Log, Resource, ResourceLog, ResourceLogs,
    ScopeLogs, SeverityNumber,
};

pub use constants::*;
pub use equality::MatchPolicy;
pub use flatten::flatten_resource_logs;
pub use identity::{Digest, Identity};
pub use log_builder::LogBuilder;
pub use resource_log_builder::ResourceLogBuilder;
#[cfg(feature = "log-capture")]
pub use sink::LogSink;
