//! Retention cleanup
//!
//! A completed historic batch becomes eligible once its end time plus
//! the TTL for its type is in the past. Rows without an end time and
//! types without a finite TTL are never eligible, so the sweep can run
//! concurrently with new batch creation without false deletes.

use crate::error::HistoryError;
use crate::historic_batch::HistoricBatch;
use crate::manager::HistoricBatchManager;
use chrono::{DateTime, Utc};
use flowmig_core::{RetentionPolicy, TimeToLive};

/// Typed parameters for the cleanup id query
#[derive(Debug, Clone)]
pub struct CleanupQueryParams {
    /// Reference time for TTL math
    pub now: DateTime<Utc>,
    /// Type-keyed retention configuration
    pub policy: RetentionPolicy,
    /// Maximum ids returned
    pub limit: usize,
}

impl CleanupQueryParams {
    /// Create new params
    #[inline]
    #[must_use]
    pub fn new(now: DateTime<Utc>, policy: RetentionPolicy, limit: usize) -> Self {
        Self { now, policy, limit }
    }
}

/// Eligibility contract shared by every store implementation
///
/// A row qualifies only when it has ended and its type's TTL has fully
/// elapsed since the end time.
#[must_use]
pub fn cleanup_eligible(row: &HistoricBatch, now: DateTime<Utc>, policy: &RetentionPolicy) -> bool {
    let Some(end_time) = row.end_time else {
        return false;
    };
    match policy.ttl(&row.batch_type) {
        Some(TimeToLive::After(ttl)) => now.signed_duration_since(end_time) >= *ttl,
        Some(TimeToLive::Never) | None => false,
    }
}

/// Result of one sweep run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Rows removed across all iterations
    pub deleted: usize,
    /// Find-then-delete iterations performed
    pub iterations: usize,
    /// Whether the run stopped because nothing was left
    pub drained: bool,
}

/// Periodic retention sweep
///
/// Repeats "find eligible ids, bulk-delete" with a bounded page size
/// until nothing is left or the iteration budget is exhausted. The
/// bounds keep a single pass from holding locks or blocking writers
/// indefinitely.
#[derive(Debug, Clone, Copy)]
pub struct HistoryCleanupSweep {
    page_size: usize,
    max_iterations: usize,
}

impl HistoryCleanupSweep {
    /// Create sweep with the given page size and iteration budget
    #[inline]
    #[must_use]
    pub fn new(page_size: usize, max_iterations: usize) -> Self {
        Self {
            page_size,
            max_iterations,
        }
    }

    /// Run one sweep
    ///
    /// Safe to retry: a repeated iteration deletes nothing extra since
    /// already-removed dependents and rows simply match nothing.
    ///
    /// # Errors
    /// [`HistoryError`] from the first failing delete; the owning rows
    /// of that iteration remain in place (dependents-first ordering).
    pub fn run(
        &self,
        manager: &HistoricBatchManager,
        policy: &RetentionPolicy,
    ) -> Result<CleanupReport, HistoryError> {
        let mut report = CleanupReport::default();

        while report.iterations < self.max_iterations {
            let ids = manager.find_historic_batch_ids_for_cleanup(self.page_size, policy);
            report.iterations += 1;

            if ids.is_empty() {
                report.drained = true;
                break;
            }

            manager.delete_historic_batch_by_ids(&ids)?;
            report.deleted += ids.len();

            tracing::debug!(
                deleted = ids.len(),
                iteration = report.iterations,
                "cleanup page removed"
            );
        }

        tracing::info!(
            deleted = report.deleted,
            iterations = report.iterations,
            drained = report.drained,
            "history cleanup sweep finished"
        );
        Ok(report)
    }
}
