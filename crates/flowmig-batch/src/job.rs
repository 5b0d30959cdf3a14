//! Batch execution jobs
//!
//! One job per chunk. Jobs are independent units of work: a failing
//! job never blocks its siblings, and a completed job's migrations are
//! permanent regardless of what happens to the rest of the batch.

use flowmig_core::{BatchId, JobId};
use serde::{Deserialize, Serialize};

/// Execution state of one chunk job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobState {
    /// Created, not yet dispatched
    Pending,
    /// Currently applying the plan to its chunk
    Running,
    /// All instances in the chunk migrated and committed
    Completed,
    /// Retry budget exhausted
    Failed,
}

/// One independently committed partition of the instance set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJob {
    /// Job id
    pub id: JobId,
    /// Owning batch
    pub batch_id: BatchId,
    /// Disjoint subset of instances this job migrates
    pub instance_ids: Vec<String>,
    /// Attempts made so far (including the first run)
    pub attempts: u32,
    /// Current state
    pub state: JobState,
    /// Last failure reason, kept for batch status reporting
    pub failure: Option<String>,
}

impl BatchJob {
    /// Create pending job for one chunk
    #[inline]
    #[must_use]
    pub fn new(batch_id: BatchId, instance_ids: Vec<String>) -> Self {
        Self {
            id: JobId::new(),
            batch_id,
            instance_ids,
            attempts: 0,
            state: JobState::Pending,
            failure: None,
        }
    }

    /// Whether the job reached a terminal state
    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, JobState::Completed | JobState::Failed)
    }
}
