//! Flowmig History - durable batch lifecycle records
//!
//! The historic side of a batch run:
//! - History level gate deciding which lifecycle events are recorded
//! - Event producer seam building batch-start/batch-end payloads
//! - The append-only `HistoricBatch` projection
//! - `HistoricBatchManager` for creation, completion, queries, deletes
//! - Retention-driven cleanup sweep with dependents-first cascades

#![warn(unreachable_pub)]

pub mod cleanup;
pub mod error;
pub mod event;
pub mod historic_batch;
pub mod level;
pub mod manager;
pub mod query;
pub mod store;

// Re-exports for convenience
pub use cleanup::{cleanup_eligible, CleanupQueryParams, CleanupReport, HistoryCleanupSweep};
pub use error::HistoryError;
pub use event::{DefaultHistoryEventProducer, HistoryEvent, HistoryEventProducer};
pub use historic_batch::HistoricBatch;
pub use level::{
    HistoryEventType, HistoryLevel, HistoryLevelActivity, HistoryLevelAudit, HistoryLevelFull,
    HistoryLevelNone,
};
pub use manager::HistoricBatchManager;
pub use query::{HistoricBatchQuery, PermitAll, QueryAuthorizer};
pub use store::{HistoricBatchStore, HistoricIncidentStore, HistoricJobLogStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
