//! Injectable time source
//!
//! Every "current time" read in the workspace routes through [`Clock`]
//! so history timestamps and retention math are deterministic in tests.

use chrono::{DateTime, Utc};

/// Time source abstraction
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time source
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    /// Create system clock
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
