//! Historic batch projection
//!
//! Copy-on-start of the live aggregate: created once with `end_time`
//! unset, updated exactly once at completion, then immutable until a
//! retention sweep deletes it.

use chrono::{DateTime, Utc};
use flowmig_batch::Batch;
use flowmig_core::{BatchId, TenantId};
use serde::{Deserialize, Serialize};

/// Durable record of one batch's lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoricBatch {
    /// Same id as the live batch, 1:1
    pub id: BatchId,
    /// Batch type string, keys the retention policy
    pub batch_type: String,
    /// Total jobs the batch was partitioned into
    pub total_jobs: usize,
    /// Seed fan-out factor
    pub jobs_per_seed: usize,
    /// Instances per execution job
    pub invocations_per_batch_job: usize,
    /// When the batch started
    pub start_time: DateTime<Utc>,
    /// When the batch finished; `None` while still running
    pub end_time: Option<DateTime<Utc>>,
    /// Owning tenant
    pub tenant_id: Option<TenantId>,
}

impl HistoricBatch {
    /// Project a live batch at start time
    #[must_use]
    pub fn from_batch(batch: &Batch, start_time: DateTime<Utc>) -> Self {
        Self {
            id: batch.id(),
            batch_type: batch.batch_type().to_string(),
            total_jobs: batch.total_jobs(),
            jobs_per_seed: batch.jobs_per_seed(),
            invocations_per_batch_job: batch.invocations_per_batch_job(),
            start_time,
            end_time: None,
            tenant_id: batch.tenant_id().map(String::from),
        }
    }

    /// Whether the batch run has ended
    #[inline]
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.end_time.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmig_batch::BatchConfig;

    #[test]
    fn projection_copies_batch_fields() {
        let batch = Batch::new(
            BatchConfig::new("instance-migration")
                .with_invocations_per_batch_job(10)
                .with_jobs_per_seed(5)
                .with_tenant("tenant-a"),
            String::new(),
            &(0..30).map(|i| format!("inst-{i}")).collect::<Vec<_>>(),
        );
        let now = Utc::now();
        let row = HistoricBatch::from_batch(&batch, now);

        assert_eq!(row.id, batch.id());
        assert_eq!(row.batch_type, "instance-migration");
        assert_eq!(row.total_jobs, 3);
        assert_eq!(row.jobs_per_seed, 5);
        assert_eq!(row.invocations_per_batch_job, 10);
        assert_eq!(row.start_time, now);
        assert_eq!(row.tenant_id.as_deref(), Some("tenant-a"));
        assert!(!row.is_completed());
    }
}
