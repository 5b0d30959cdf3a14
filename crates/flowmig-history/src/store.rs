//! Persistence collaborator traits
//!
//! The history core issues typed, named operations and never owns
//! storage layout. Implementations must keep `select_ids_for_cleanup`
//! ordered ascending by end time; [`crate::cleanup::cleanup_eligible`]
//! is the eligibility contract they are expected to apply.

use crate::cleanup::CleanupQueryParams;
use crate::error::HistoryError;
use crate::historic_batch::HistoricBatch;
use crate::query::HistoricBatchQuery;
use flowmig_core::{BatchId, Page};

/// Storage for historic batch rows
pub trait HistoricBatchStore: Send + Sync {
    /// Insert a new row
    ///
    /// # Errors
    /// [`HistoryError::DuplicateRow`] when the id already exists.
    fn insert(&self, row: HistoricBatch) -> Result<(), HistoryError>;

    /// Replace an existing row
    ///
    /// # Errors
    /// [`HistoryError::RowMissing`] when the id is unknown.
    fn update(&self, row: HistoricBatch) -> Result<(), HistoryError>;

    /// Point lookup; absent is `None`, not an error
    fn select_by_id(&self, id: BatchId) -> Option<HistoricBatch>;

    /// Paged list of rows matching an already-authorized query
    fn select_by_query(&self, query: &HistoricBatchQuery, page: Page) -> Vec<HistoricBatch>;

    /// Count of rows matching an already-authorized query
    fn count_by_query(&self, query: &HistoricBatchQuery) -> usize;

    /// Ids of cleanup-eligible rows, oldest end time first, up to the limit
    fn select_ids_for_cleanup(&self, params: &CleanupQueryParams) -> Vec<BatchId>;

    /// Delete exactly one row; does not cascade
    ///
    /// # Errors
    /// [`HistoryError::RowMissing`] when the id is unknown.
    fn delete_by_id(&self, id: BatchId) -> Result<(), HistoryError>;

    /// Bulk delete; ids that match nothing are skipped silently so a
    /// retried sweep iteration stays idempotent
    ///
    /// # Errors
    /// [`HistoryError::Storage`] on storage failure.
    fn delete_by_ids(&self, ids: &[BatchId]) -> Result<(), HistoryError>;
}

/// Storage for historic incidents referencing batches
pub trait HistoricIncidentStore: Send + Sync {
    /// Delete all incidents referencing any of the batch ids
    ///
    /// # Errors
    /// [`HistoryError::Storage`] on storage failure.
    fn delete_by_batch_ids(&self, ids: &[BatchId]) -> Result<(), HistoryError>;
}

/// Storage for historic job log entries referencing batches
pub trait HistoricJobLogStore: Send + Sync {
    /// Delete all job log entries referencing any of the batch ids
    ///
    /// # Errors
    /// [`HistoryError::Storage`] on storage failure.
    fn delete_by_batch_ids(&self, ids: &[BatchId]) -> Result<(), HistoryError>;
}
