use super::shapes::Log;

/// How an expected log is compared against an observed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchPolicy {
    /// Every field must match, including the absence of a field.
    Strict,
    /// Only fields set on the expected side constrain the match.
    #[default]
    Relaxed,
}

impl MatchPolicy {
    fn is_strict(self) -> bool {
        self == MatchPolicy::Strict
    }
}

/// A field set on `expected` must be set and equal on `actual`. An unset field
/// requires an unset counterpart only when strict.
///
/// Attribute maps go through here whole, so they are never matched partially.
fn field_matches<T: PartialEq>(expected: &Option<T>, actual: &Option<T>, strict: bool) -> bool {
    match expected {
        Some(expected) => actual.as_ref() == Some(expected),
        None => !strict || actual.is_none(),
    }
}

impl Log {
    /// Compares the receiver, taken as the expectation, with `other`.
    /// Timestamps never participate.
    pub fn equals(&self, other: &Log, policy: MatchPolicy) -> bool {
        let strict = policy.is_strict();
        field_matches(&self.body, &other.body, strict)
            && field_matches(&self.severity_text, &other.severity_text, strict)
            && field_matches(&self.severity, &other.severity, strict)
            && field_matches(&self.attributes, &other.attributes, strict)
    }

    /// All fields, defined or not, must be equal.
    pub fn strict_equals(&self, other: &Log) -> bool {
        self.equals(other, MatchPolicy::Strict)
    }

    /// All fields defined on the receiver must be matched in `other`; unset ones are ignored.
    pub fn relaxed_equals(&self, other: &Log) -> bool {
        self.equals(other, MatchPolicy::Relaxed)
    }
}
