//! Historic batch manager
//!
//! Orchestrates the historic side of a batch run: gate-checked event
//! creation at start and end, authorized queries, and retention-driven
//! deletion with a dependents-first cascade.
//!
//! Collaborators are injected explicitly; there is no ambient context.
//! Start/end transitions are expected from a single logical owner (the
//! batch coordinator), so no writers race on one historic batch id.

use crate::cleanup::CleanupQueryParams;
use crate::error::HistoryError;
use crate::event::{HistoryEvent, HistoryEventProducer};
use crate::historic_batch::HistoricBatch;
use crate::level::{HistoryEventType, HistoryLevel};
use crate::query::{HistoricBatchQuery, QueryAuthorizer};
use crate::store::{HistoricBatchStore, HistoricIncidentStore, HistoricJobLogStore};
use flowmig_batch::Batch;
use flowmig_core::{BatchId, Clock, Page, RetentionPolicy};
use std::sync::Arc;

/// Manages historic batch lifecycle, queries, and cleanup deletes
pub struct HistoricBatchManager {
    store: Arc<dyn HistoricBatchStore>,
    incidents: Arc<dyn HistoricIncidentStore>,
    job_logs: Arc<dyn HistoricJobLogStore>,
    authorizer: Arc<dyn QueryAuthorizer>,
    clock: Arc<dyn Clock>,
    history_level: Arc<dyn HistoryLevel>,
    producer: Arc<dyn HistoryEventProducer>,
}

impl HistoricBatchManager {
    /// Create manager with explicit collaborators
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        store: Arc<dyn HistoricBatchStore>,
        incidents: Arc<dyn HistoricIncidentStore>,
        job_logs: Arc<dyn HistoricJobLogStore>,
        authorizer: Arc<dyn QueryAuthorizer>,
        clock: Arc<dyn Clock>,
        history_level: Arc<dyn HistoryLevel>,
        producer: Arc<dyn HistoryEventProducer>,
    ) -> Self {
        Self {
            store,
            incidents,
            job_logs,
            authorizer,
            clock,
            history_level,
            producer,
        }
    }

    /// Record the start of a batch if the gate allows it
    ///
    /// At-most-one call per batch id is a caller contract; double
    /// creation surfaces as [`HistoryError::DuplicateRow`].
    ///
    /// # Errors
    /// [`HistoryError`] from the store.
    pub fn create_historic_batch(&self, batch: &Batch) -> Result<(), HistoryError> {
        let Some(event) = self.emit_if(HistoryEventType::BatchStart, |producer, now| {
            producer.create_batch_start_event(batch, now)
        }) else {
            return Ok(());
        };

        tracing::debug!(batch_id = %batch.id(), "historic batch created");
        self.store.insert(event.entity)
    }

    /// Record the end of a batch if the gate allows it
    ///
    /// Sets the end time on the existing row. When no start row exists
    /// (start events were suppressed), inserts one with both times set
    /// so history stays queryable.
    ///
    /// # Errors
    /// [`HistoryError`] from the store.
    pub fn complete_historic_batch(&self, batch: &Batch) -> Result<(), HistoryError> {
        let Some(event) = self.emit_if(HistoryEventType::BatchEnd, |producer, now| {
            producer.create_batch_end_event(batch, now)
        }) else {
            return Ok(());
        };

        tracing::debug!(batch_id = %batch.id(), "historic batch completed");
        match self.store.select_by_id(batch.id()) {
            Some(mut row) => {
                row.end_time = event.entity.end_time;
                self.store.update(row)
            }
            None => self.store.insert(event.entity),
        }
    }

    /// Count rows matching the criteria, after authorization filtering
    #[must_use]
    pub fn find_batch_count_by_query_criteria(&self, mut query: HistoricBatchQuery) -> usize {
        self.authorizer.configure_query(&mut query);
        self.store.count_by_query(&query)
    }

    /// List rows matching the criteria, after authorization filtering
    #[must_use]
    pub fn find_batches_by_query_criteria(
        &self,
        mut query: HistoricBatchQuery,
        page: Page,
    ) -> Vec<HistoricBatch> {
        self.authorizer.configure_query(&mut query);
        self.store.select_by_query(&query, page)
    }

    /// Point lookup; absent is `None`, not an error
    #[must_use]
    pub fn find_historic_batch_by_id(&self, id: BatchId) -> Option<HistoricBatch> {
        self.store.select_by_id(id)
    }

    /// Ids eligible for deletion, oldest end time first
    ///
    /// Only rows whose end time plus the TTL for their type is in the
    /// past qualify; open-ended rows and unconfigured types never do.
    #[must_use]
    pub fn find_historic_batch_ids_for_cleanup(
        &self,
        batch_size: usize,
        policy: &RetentionPolicy,
    ) -> Vec<BatchId> {
        let params = CleanupQueryParams::new(self.clock.now(), policy.clone(), batch_size);
        self.store.select_ids_for_cleanup(&params)
    }

    /// Delete exactly one row without cascading
    ///
    /// The caller must have removed dependents already or accepts the
    /// dangling-reference risk.
    ///
    /// # Errors
    /// [`HistoryError::RowMissing`] when the id is unknown.
    pub fn delete_historic_batch_by_id(&self, id: BatchId) -> Result<(), HistoryError> {
        self.store.delete_by_id(id)
    }

    /// Bulk delete with dependents-first cascade
    ///
    /// Incidents and job log entries referencing any of the ids are
    /// removed before the batch rows. An interruption between steps
    /// leaves dangling dependents pointing at a still-present batch,
    /// never dependents of a deleted batch.
    ///
    /// # Errors
    /// [`HistoryError`] from the first failing delete; the batch rows
    /// stay in place when a dependent delete fails.
    pub fn delete_historic_batch_by_ids(&self, ids: &[BatchId]) -> Result<(), HistoryError> {
        self.incidents.delete_by_batch_ids(ids)?;
        self.job_logs.delete_by_batch_ids(ids)?;
        self.store.delete_by_ids(ids)?;

        tracing::debug!(count = ids.len(), "historic batches deleted");
        Ok(())
    }

    /// Gate-checked event creation
    ///
    /// No event object is built when the gate is closed.
    fn emit_if<F>(&self, event_type: HistoryEventType, factory: F) -> Option<HistoryEvent>
    where
        F: FnOnce(&dyn HistoryEventProducer, chrono::DateTime<chrono::Utc>) -> HistoryEvent,
    {
        if !self.history_level.is_history_event_produced(event_type) {
            return None;
        }
        Some(factory(self.producer.as_ref(), self.clock.now()))
    }
}

impl std::fmt::Debug for HistoricBatchManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoricBatchManager").finish_non_exhaustive()
    }
}
