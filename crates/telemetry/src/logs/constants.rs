/// Placeholder token an expectation file uses where the running build's version belongs
pub const BUILD_VERSION_PLACEHOLDER: &str = "<VERSION_FROM_BUILD>";

/// Resource attribute keys following OTEL semantic conventions
pub mod resource {
    /// Logical name of the service
    pub const SERVICE_NAME: &str = "service.name";
}

/// Instrumentation scope defaults
pub mod scope {
    pub const DEFAULT_NAME: &str = "telemetry.logs";

    pub const DEFAULT_VERSION: &str = "1.0.0";
}
