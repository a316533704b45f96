//! Content-addressed identities for resources, scopes and log records.
//!
//! An identity is the md5 of the entity's YAML serialization. Struct fields
//! serialize in declaration order and every map is a `BTreeMap`, so equal
//! entities always produce equal digests regardless of how they were built.

use serde::Serialize;
use std::fmt;

use super::shapes::{InstrumentationScope, Log, Resource};
use crate::errors::TelemetryError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Digest([u8; 16]);

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self)
    }
}

pub trait Identity {
    fn digest(&self) -> Result<Digest, TelemetryError>;
}

fn digest_of<T: Serialize>(entity: &'static str, value: &T) -> Result<Digest, TelemetryError> {
    let canonical = serde_yaml::to_string(value)
        .map_err(|source| TelemetryError::Serialization { entity, source })?;
    Ok(Digest(md5::compute(canonical.as_bytes()).0))
}

impl Identity for Resource {
    fn digest(&self) -> Result<Digest, TelemetryError> {
        digest_of("resource", self)
    }
}

impl Identity for InstrumentationScope {
    fn digest(&self) -> Result<Digest, TelemetryError> {
        digest_of("instrumentation scope", self)
    }
}

impl Identity for Log {
    fn digest(&self) -> Result<Digest, TelemetryError> {
        digest_of("log", self)
    }
}
