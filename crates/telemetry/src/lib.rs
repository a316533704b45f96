//! telemetry: loads expected log telemetry, flattens it into deduplicated
//! resource / scope / log hierarchies and checks observed telemetry against it.
//!
//! ```
//! use telemetry::logs::{LogBuilder, ResourceLogBuilder, ResourceLogs};
//!
//! let expected = ResourceLogs::new(vec![ResourceLogBuilder::new("checkout")
//!     .add_log(LogBuilder::new().with_severity_text("info").build())
//!     .build()]);
//! let observed = ResourceLogs::new(vec![ResourceLogBuilder::new("checkout")
//!     .add_log(LogBuilder::new().with_severity_text("info").with_body("started").build())
//!     .build()]);
//!
//! assert!(observed.flatten().unwrap().contains_all(&expected).is_ok());
//! ```

pub mod configuration;
pub mod errors;
pub mod logs;
pub mod version;

pub use errors::{ContainmentError, TelemetryError};
