use log::debug;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::identity::{Digest, Identity};
use super::shapes::{Log, ResourceLog, ResourceLogs, ScopeLogs};
use crate::errors::TelemetryError;

/// Insertion ordered groups keyed by identity digest. The first occurrence of a
/// key is its representative; children from every occurrence are appended to it.
struct Accumulator<'a, K, C> {
    index: HashMap<Digest, usize>,
    groups: Vec<(&'a K, Vec<C>)>,
}

impl<'a, K: Identity, C> Accumulator<'a, K, C> {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            groups: Vec::new(),
        }
    }

    fn push(
        &mut self,
        key: &'a K,
        children: impl IntoIterator<Item = C>,
    ) -> Result<(), TelemetryError> {
        let slot = match self.index.entry(key.digest()?) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                self.groups.push((key, Vec::new()));
                *entry.insert(self.groups.len() - 1)
            }
        };
        self.groups[slot].1.extend(children);
        Ok(())
    }

    fn into_groups(self) -> Vec<(&'a K, Vec<C>)> {
        self.groups
    }
}

/// Merges several collections into one, keeping only the first occurrence of each
/// resource, instrumentation scope and log, in the order they were first seen.
pub fn flatten_resource_logs<'a, I>(collections: I) -> Result<ResourceLogs, TelemetryError>
where
    I: IntoIterator<Item = &'a ResourceLogs>,
{
    let mut resources: Accumulator<_, &ScopeLogs> = Accumulator::new();
    let mut inputs = 0usize;
    for collection in collections {
        inputs += 1;
        for resource_log in &collection.resource_logs {
            resources.push(&resource_log.resource, resource_log.scope_logs.iter())?;
        }
    }

    let mut flattened = ResourceLogs::default();
    for (resource, scope_logs) in resources.into_groups() {
        let mut scopes: Accumulator<_, &Log> = Accumulator::new();
        for sl in scope_logs {
            scopes.push(&sl.scope, sl.logs.iter())?;
        }

        let mut resource_log = ResourceLog {
            resource: resource.clone(),
            scope_logs: Vec::new(),
        };
        for (scope, logs) in scopes.into_groups() {
            let mut records: Accumulator<_, ()> = Accumulator::new();
            for log in logs {
                records.push(log, None)?;
            }
            resource_log.scope_logs.push(ScopeLogs {
                scope: scope.clone(),
                logs: records
                    .into_groups()
                    .into_iter()
                    .map(|(log, _)| log.clone())
                    .collect(),
            });
        }
        flattened.resource_logs.push(resource_log);
    }

    debug!(
        "flattened {} collections into {} resources with {} logs",
        inputs,
        flattened.resource_logs.len(),
        flattened.record_count()
    );
    Ok(flattened)
}

impl ResourceLogs {
    /// Deduplicates this collection by resource, scope and log identity.
    pub fn flatten(&self) -> Result<ResourceLogs, TelemetryError> {
        flatten_resource_logs([self])
    }
}
