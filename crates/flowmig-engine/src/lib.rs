//! Flowmig Engine - the batch migration coordinator
//!
//! Ties the pieces together: a validated plan is serialized into a new
//! batch, the historic start is recorded, seed rounds fan out chunk
//! jobs, chunks execute with bounded retries, and completion records
//! the historic end and deletes the runtime aggregate.
//!
//! Execution failures never surface as errors to the submitter; they
//! show up in the [`BatchRunReport`].

#![warn(unreachable_pub)]

pub mod engine;
pub mod error;

// Re-exports for convenience
pub use engine::{BatchMigrationEngine, BatchRunReport, MigrationRun, INSTANCE_MIGRATION};
pub use error::EngineError;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
