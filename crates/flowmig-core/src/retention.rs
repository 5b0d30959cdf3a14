//! Retention policy
//!
//! Maps a batch type string to a time-to-live. A completed historic
//! batch becomes cleanup-eligible once its end time is at least the
//! configured TTL in the past. Types without an entry, or configured
//! as [`TimeToLive::Never`], are never eligible.

use chrono::Duration;
use std::collections::HashMap;

/// Time-to-live for one batch type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeToLive {
    /// Record is retained forever
    Never,
    /// Record expires this long after its end time
    After(Duration),
}

/// Batch-type keyed retention configuration
#[derive(Debug, Clone, Default)]
pub struct RetentionPolicy {
    ttl_by_type: HashMap<String, TimeToLive>,
}

impl RetentionPolicy {
    /// Create empty policy (nothing ever expires)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the TTL for a batch type
    #[inline]
    #[must_use]
    pub fn with_ttl(mut self, batch_type: impl Into<String>, ttl: TimeToLive) -> Self {
        self.ttl_by_type.insert(batch_type.into(), ttl);
        self
    }

    /// Look up the TTL configured for a batch type
    #[inline]
    #[must_use]
    pub fn ttl(&self, batch_type: &str) -> Option<&TimeToLive> {
        self.ttl_by_type.get(batch_type)
    }

    /// Whether any type has a finite TTL configured
    #[must_use]
    pub fn has_finite_ttl(&self) -> bool {
        self.ttl_by_type
            .values()
            .any(|ttl| matches!(ttl, TimeToLive::After(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_type_has_no_ttl() {
        let policy = RetentionPolicy::new();
        assert!(policy.ttl("instance-migration").is_none());
    }

    #[test]
    fn configured_ttl_is_returned() {
        let policy =
            RetentionPolicy::new().with_ttl("instance-migration", TimeToLive::After(Duration::days(7)));
        assert_eq!(
            policy.ttl("instance-migration"),
            Some(&TimeToLive::After(Duration::days(7)))
        );
    }

    #[test]
    fn never_counts_as_infinite() {
        let policy = RetentionPolicy::new().with_ttl("instance-migration", TimeToLive::Never);
        assert!(!policy.has_finite_ttl());
    }
}
