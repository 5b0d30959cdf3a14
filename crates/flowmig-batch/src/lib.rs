//! Flowmig Batch - the live migration batch aggregate
//!
//! A batch partitions the target instance set into fixed-size chunks
//! and tracks job creation progress:
//! - Deterministic partitioning into disjoint chunks
//! - Seed fan-out (bounded job creation per seed round)
//! - Per-chunk execution with a bounded retry budget
//! - Suspension and cooperative cancellation
//!
//! The batch never spans a transaction across chunks; each chunk
//! commits its own migrations independently.

#![warn(unreachable_pub)]

pub mod batch;
pub mod error;
pub mod executor;
pub mod job;
pub mod partition;
pub mod state;

// Re-exports for convenience
pub use batch::{Batch, BatchConfig};
pub use error::{BatchError, MigrateError, StateError};
pub use executor::{ChunkExecutor, InstanceMigrator};
pub use job::{BatchJob, JobState};
pub use partition::partition;
pub use state::{allowed_transitions, validate_transition, BatchState};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
