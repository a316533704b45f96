use log::{debug, warn};

use super::equality::MatchPolicy;
use super::shapes::{Log, ResourceLog, ResourceLogs, ScopeLogs};
use crate::errors::{ContainmentError, TelemetryError};

impl ResourceLogs {
    /// Determines if everything in `expected` is in the receiver (expected ⊆ received),
    /// comparing logs with [`MatchPolicy::Relaxed`]. This is neither an equivalence check
    /// nor a received ⊆ expected check.
    ///
    /// Both collections should be flattened first for reliable diagnostics.
    pub fn contains_all(&self, expected: &ResourceLogs) -> Result<(), ContainmentError> {
        self.contains_all_with(expected, MatchPolicy::Relaxed)
    }

    pub fn contains_all_with(
        &self,
        expected: &ResourceLogs,
        policy: MatchPolicy,
    ) -> Result<(), ContainmentError> {
        let mut missing_resources = Vec::new();

        for expected_resource_log in &expected.resource_logs {
            let matched: Vec<&ResourceLog> = self
                .resource_logs
                .iter()
                .filter(|rl| rl.resource.matches(&expected_resource_log.resource))
                .collect();
            if matched.is_empty() {
                warn!("expected resource {} not found", expected_resource_log.resource);
                missing_resources.push(expected_resource_log.resource.clone());
                continue;
            }
            check_resource(&matched, expected_resource_log, policy)?;
        }

        if !missing_resources.is_empty() {
            return Err(ContainmentError::MissingResources {
                observed: self
                    .resource_logs
                    .iter()
                    .map(|rl| rl.resource.clone())
                    .collect(),
                expected: expected
                    .resource_logs
                    .iter()
                    .map(|rl| rl.resource.clone())
                    .collect(),
                missing: missing_resources,
            });
        }

        debug!(
            "all {} expected logs found among {} observed",
            expected.record_count(),
            self.record_count()
        );
        Ok(())
    }

    /// Determines if the receiver holds exactly the logs in `expected`, compared with
    /// [`MatchPolicy::Strict`] after flattening both sides.
    pub fn equivalent(&self, expected: &ResourceLogs) -> Result<(), TelemetryError> {
        let observed = self.flatten()?;
        let expected = expected.flatten()?;

        observed.contains_all_with(&expected, MatchPolicy::Strict)?;
        expected
            .contains_all_with(&observed, MatchPolicy::Strict)
            .map_err(|e| ContainmentError::Unexpected(Box::new(e)))?;
        Ok(())
    }
}

/// Checks every expected scope of one resource against the observed groups sharing
/// its attributes. Once a scope can't be located, the remaining scopes are only
/// located, not searched for logs.
fn check_resource(
    observed: &[&ResourceLog],
    expected: &ResourceLog,
    policy: MatchPolicy,
) -> Result<(), ContainmentError> {
    let mut missing_scopes = Vec::new();

    for expected_scope_logs in &expected.scope_logs {
        let matched: Vec<&ScopeLogs> = observed
            .iter()
            .flat_map(|rl| rl.scope_logs.iter())
            .filter(|sl| sl.scope == expected_scope_logs.scope)
            .collect();
        if matched.is_empty() {
            warn!(
                "expected instrumentation scope {} not found in resource {}",
                expected_scope_logs.scope, expected.resource
            );
            missing_scopes.push(expected_scope_logs.scope.clone());
            continue;
        }
        if !missing_scopes.is_empty() {
            continue;
        }

        let observed_logs: Vec<&Log> = matched.iter().flat_map(|sl| sl.logs.iter()).collect();
        let missing_logs: Vec<Log> = expected_scope_logs
            .logs
            .iter()
            .filter(|expected_log| {
                !observed_logs
                    .iter()
                    .any(|log| expected_log.equals(log, policy))
            })
            .cloned()
            .collect();

        if !missing_logs.is_empty() {
            warn!(
                "{} of {} expected logs not found in instrumentation scope {}",
                missing_logs.len(),
                expected_scope_logs.logs.len(),
                expected_scope_logs.scope
            );
            return Err(ContainmentError::MissingLogs {
                scope: expected_scope_logs.scope.clone(),
                observed: observed_logs.into_iter().cloned().collect(),
                expected: expected_scope_logs.logs.clone(),
                missing: missing_logs,
            });
        }
    }

    if !missing_scopes.is_empty() {
        return Err(ContainmentError::MissingScopes {
            resource: expected.resource.clone(),
            observed: observed
                .iter()
                .flat_map(|rl| rl.scope_logs.iter())
                .map(|sl| sl.scope.clone())
                .collect(),
            expected: expected
                .scope_logs
                .iter()
                .map(|sl| sl.scope.clone())
                .collect(),
            missing: missing_scopes,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logs::{InstrumentationScope, LogBuilder, ResourceLogBuilder, SeverityNumber};
    use pretty_assertions::assert_eq;

    fn info(body: &str) -> Log {
        LogBuilder::new()
            .with_severity_text("info")
            .with_body(body)
            .build()
    }

    fn collection(host: &str, scope: &str, logs: Vec<Log>) -> ResourceLogs {
        ResourceLogs::new(vec![ResourceLogBuilder::empty()
            .with_resource_attribute("host", host)
            .with_scope_name(scope)
            .with_scope_version("1.0")
            .add_logs(logs)
            .build()])
    }

    #[test]
    fn test_contains_all_matches_on_constrained_fields() {
        let expected = collection("a", "s", vec![info("x")]);
        let observed = collection("a", "s", vec![info("y"), info("x")]);

        assert_eq!(observed.contains_all(&expected), Ok(()));
    }

    #[test]
    fn test_contains_all_reports_missing_logs() {
        let expected = collection("a", "s", vec![info("x")]);
        let debug = LogBuilder::new()
            .with_severity_text("debug")
            .with_body("x")
            .build();
        let observed = collection("a", "s", vec![debug.clone()]);

        let err = observed.contains_all(&expected).unwrap_err();

        assert_eq!(
            err,
            ContainmentError::MissingLogs {
                scope: InstrumentationScope::new("s", "1.0"),
                observed: vec![debug],
                expected: vec![info("x")],
                missing: vec![info("x")],
            }
        );
        let message = err.to_string();
        assert!(message.contains("missing logs:"));
        assert!(message.contains("severity_text: debug"));
    }

    #[test]
    fn test_contains_all_accumulates_missing_logs_per_scope() {
        let expected = collection("a", "s", vec![info("x"), info("y"), info("z")]);
        let observed = collection("a", "s", vec![info("y")]);

        let err = observed.contains_all(&expected).unwrap_err();
        assert_eq!(err.missing_count(), 2);
    }

    #[test]
    fn test_contains_all_reports_every_missing_resource() {
        let expected = ResourceLogs::new(vec![
            collection("b", "s", vec![]).resource_logs.remove(0),
            collection("a", "s", vec![info("x")]).resource_logs.remove(0),
            collection("c", "s", vec![]).resource_logs.remove(0),
        ]);
        let observed = collection("a", "s", vec![info("x")]);

        match observed.contains_all(&expected).unwrap_err() {
            ContainmentError::MissingResources { missing, .. } => {
                let hosts: Vec<String> = missing
                    .iter()
                    .map(|r| r.attributes["host"].to_string())
                    .collect();
                assert_eq!(hosts, vec!["b", "c"]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_scope_stops_log_checks_for_that_resource() {
        let mut expected = collection("a", "missing", vec![info("x")]);
        let extra_scope = collection("a", "s", vec![info("absent")]);
        let extra_scope = extra_scope.resource_logs[0].scope_logs[0].clone();
        expected.resource_logs[0].scope_logs.push(extra_scope);
        let observed = collection("a", "s", vec![info("x")]);

        match observed.contains_all(&expected).unwrap_err() {
            ContainmentError::MissingScopes {
                missing, observed, ..
            } => {
                assert_eq!(missing, vec![InstrumentationScope::new("missing", "1.0")]);
                assert_eq!(observed, vec![InstrumentationScope::new("s", "1.0")]);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_logs_reported_before_later_missing_scope() {
        let mut expected = collection("a", "s", vec![info("absent")]);
        let missing_scope = collection("a", "missing", vec![]);
        let missing_scope = missing_scope.resource_logs[0].scope_logs[0].clone();
        expected.resource_logs[0].scope_logs.push(missing_scope);
        let observed = collection("a", "s", vec![info("x")]);

        assert!(matches!(
            observed.contains_all(&expected),
            Err(ContainmentError::MissingLogs { .. })
        ));
    }

    #[test]
    fn test_contains_all_searches_unflattened_duplicates() {
        let expected = collection("a", "s", vec![info("x"), info("y")]);
        let mut observed = collection("a", "s", vec![info("x")]);
        observed
            .resource_logs
            .extend(collection("a", "s", vec![info("y")]).resource_logs);

        assert_eq!(observed.contains_all(&expected), Ok(()));
    }

    #[test]
    fn test_weakening_expectations_keeps_containment() {
        let full = LogBuilder::new()
            .with_body("x")
            .with_severity(SeverityNumber::INFO)
            .with_severity_text("info")
            .with_attribute("k", "v")
            .build();
        let observed = collection("a", "s", vec![full.clone()]);
        assert_eq!(
            observed.contains_all(&collection("a", "s", vec![full.clone()])),
            Ok(())
        );

        let mut weakened = vec![];
        for unset in 0..4 {
            let mut log = full.clone();
            match unset {
                0 => log.body = None,
                1 => log.severity = None,
                2 => log.severity_text = None,
                _ => log.attributes = None,
            }
            weakened.push(log);
        }
        assert_eq!(
            observed.contains_all(&collection("a", "s", weakened)),
            Ok(())
        );
        assert_eq!(
            observed.contains_all(&collection("a", "s", vec![Log::default()])),
            Ok(())
        );
    }

    #[test]
    fn test_empty_expectation_is_always_contained() {
        let observed = collection("a", "s", vec![info("x")]);
        assert_eq!(observed.contains_all(&ResourceLogs::default()), Ok(()));
    }

    #[test]
    fn test_equivalent_requires_the_same_logs() {
        let expected = collection("a", "s", vec![info("x"), info("y")]);
        let mut observed = collection("a", "s", vec![info("y"), info("x"), info("x")]);
        assert!(observed.equivalent(&expected).is_ok());

        observed.resource_logs[0].scope_logs[0].logs.push(info("z"));
        match observed.equivalent(&expected).unwrap_err() {
            TelemetryError::Containment(ContainmentError::Unexpected(inner)) => {
                assert_eq!(inner.missing_count(), 1);
                assert!(inner.to_string().contains("body: z"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_equivalent_is_strict() {
        let expected = collection("a", "s", vec![LogBuilder::new().with_body("x").build()]);
        let observed = collection("a", "s", vec![info("x")]);

        assert!(observed.contains_all(&expected).is_ok());
        assert!(matches!(
            observed.equivalent(&expected),
            Err(TelemetryError::Containment(
                ContainmentError::MissingLogs { .. }
            ))
        ));
    }
}
