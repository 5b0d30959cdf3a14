//! Flowmig Core - shared leaf types
//!
//! Foundation types used across the workspace:
//! - Batch and job identifiers
//! - Injectable clock for deterministic time
//! - Paging for bounded list queries
//! - Retention policy (batch type -> time-to-live)

#![warn(unreachable_pub)]

pub mod clock;
pub mod page;
pub mod retention;
pub mod types;

// Re-exports for convenience
pub use clock::{Clock, SystemClock};
pub use page::Page;
pub use retention::{RetentionPolicy, TimeToLive};
pub use types::{BatchId, JobId, TenantId};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
