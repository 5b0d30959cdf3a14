//! The live batch aggregate
//!
//! Owned exclusively by the batch-execution side while running; once
//! every job finishes (or the batch is canceled) the aggregate is
//! deleted and only the historic projection survives.

use crate::error::StateError;
use crate::job::BatchJob;
use crate::partition::partition;
use crate::state::{validate_transition, BatchState};
use flowmig_core::{BatchId, JobId, TenantId};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Batch sizing and retry configuration
///
/// Chunk sizes are configuration, never derived from plan size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Batch type string, keys the retention policy
    pub batch_type: String,
    /// Jobs created per seed round
    pub jobs_per_seed: usize,
    /// Instances processed per execution job
    pub invocations_per_batch_job: usize,
    /// Chunk retries after the first failed attempt
    pub retry_budget: u32,
    /// Owning tenant, if any
    pub tenant_id: Option<TenantId>,
}

impl BatchConfig {
    /// Create config for a batch type with default sizing
    #[inline]
    #[must_use]
    pub fn new(batch_type: impl Into<String>) -> Self {
        Self {
            batch_type: batch_type.into(),
            jobs_per_seed: 100,
            invocations_per_batch_job: 1,
            retry_budget: 3,
            tenant_id: None,
        }
    }

    /// With seed fan-out
    #[inline]
    #[must_use]
    pub fn with_jobs_per_seed(mut self, jobs_per_seed: usize) -> Self {
        self.jobs_per_seed = jobs_per_seed;
        self
    }

    /// With chunk size
    #[inline]
    #[must_use]
    pub fn with_invocations_per_batch_job(mut self, invocations: usize) -> Self {
        self.invocations_per_batch_job = invocations;
        self
    }

    /// With chunk retry budget
    #[inline]
    #[must_use]
    pub fn with_retry_budget(mut self, retry_budget: u32) -> Self {
        self.retry_budget = retry_budget;
        self
    }

    /// With tenant
    #[inline]
    #[must_use]
    pub fn with_tenant(mut self, tenant_id: impl Into<TenantId>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }
}

/// Live aggregate tracking one bulk asynchronous operation
#[derive(Debug, Clone)]
pub struct Batch {
    id: BatchId,
    batch_type: String,
    total_jobs: usize,
    jobs_created: usize,
    jobs_per_seed: usize,
    invocations_per_batch_job: usize,
    retry_budget: u32,
    /// Serialized plan plus filters, opaque to this aggregate
    configuration: String,
    seed_job_id: JobId,
    monitor_job_id: Option<JobId>,
    suspended: bool,
    tenant_id: Option<TenantId>,
    state: BatchState,
    pending_chunks: VecDeque<Vec<String>>,
}

impl Batch {
    /// Create batch over the given instance set
    ///
    /// Partitions the instances immediately so `total_jobs` is fixed at
    /// creation; jobs themselves are created lazily by seed rounds.
    #[must_use]
    pub fn new(config: BatchConfig, configuration: String, instance_ids: &[String]) -> Self {
        let chunks = partition(instance_ids, config.invocations_per_batch_job);
        let total_jobs = chunks.len();
        let id = BatchId::new();

        tracing::info!(
            batch_id = %id,
            batch_type = %config.batch_type,
            total_jobs,
            "batch created"
        );

        Self {
            id,
            batch_type: config.batch_type,
            total_jobs,
            jobs_created: 0,
            jobs_per_seed: config.jobs_per_seed,
            invocations_per_batch_job: config.invocations_per_batch_job,
            retry_budget: config.retry_budget,
            configuration,
            seed_job_id: JobId::new(),
            monitor_job_id: None,
            suspended: false,
            tenant_id: config.tenant_id,
            state: BatchState::Created,
            pending_chunks: chunks.into(),
        }
    }

    /// Batch id
    #[inline]
    #[must_use]
    pub fn id(&self) -> BatchId {
        self.id
    }

    /// Batch type string
    #[inline]
    #[must_use]
    pub fn batch_type(&self) -> &str {
        &self.batch_type
    }

    /// Total jobs the batch will create
    #[inline]
    #[must_use]
    pub fn total_jobs(&self) -> usize {
        self.total_jobs
    }

    /// Jobs created so far
    #[inline]
    #[must_use]
    pub fn jobs_created(&self) -> usize {
        self.jobs_created
    }

    /// Seed fan-out factor
    #[inline]
    #[must_use]
    pub fn jobs_per_seed(&self) -> usize {
        self.jobs_per_seed
    }

    /// Instances per execution job
    #[inline]
    #[must_use]
    pub fn invocations_per_batch_job(&self) -> usize {
        self.invocations_per_batch_job
    }

    /// Chunk retry budget
    #[inline]
    #[must_use]
    pub fn retry_budget(&self) -> u32 {
        self.retry_budget
    }

    /// Serialized plan plus filters
    #[inline]
    #[must_use]
    pub fn configuration(&self) -> &str {
        &self.configuration
    }

    /// Seed job id
    #[inline]
    #[must_use]
    pub fn seed_job_id(&self) -> JobId {
        self.seed_job_id
    }

    /// Monitor job id, set once execution starts
    #[inline]
    #[must_use]
    pub fn monitor_job_id(&self) -> Option<JobId> {
        self.monitor_job_id
    }

    /// Whether job creation is paused
    #[inline]
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Owning tenant
    #[inline]
    #[must_use]
    pub fn tenant_id(&self) -> Option<&str> {
        self.tenant_id.as_deref()
    }

    /// Current lifecycle state
    #[inline]
    #[must_use]
    pub fn state(&self) -> BatchState {
        self.state
    }

    /// Whether every chunk has been turned into a job
    #[inline]
    #[must_use]
    pub fn is_fully_seeded(&self) -> bool {
        self.pending_chunks.is_empty()
    }

    /// Begin executing: `Created -> Executing`
    ///
    /// # Errors
    /// [`StateError`] if the batch is not in `Created`.
    pub fn start(&mut self) -> Result<(), StateError> {
        self.transition(BatchState::Executing)?;
        self.monitor_job_id = Some(JobId::new());
        Ok(())
    }

    /// Create the next wave of jobs, at most `jobs_per_seed`
    ///
    /// Returns no jobs while suspended; already-created jobs keep
    /// running, only further creation pauses.
    pub fn seed(&mut self) -> Vec<BatchJob> {
        if self.suspended || self.state != BatchState::Executing {
            return Vec::new();
        }

        let wave = self.jobs_per_seed.min(self.pending_chunks.len());
        let mut jobs = Vec::with_capacity(wave);
        for _ in 0..wave {
            // partition() guarantees non-empty pending chunks
            if let Some(chunk) = self.pending_chunks.pop_front() {
                jobs.push(BatchJob::new(self.id, chunk));
            }
        }
        self.jobs_created += jobs.len();

        tracing::debug!(
            batch_id = %self.id,
            created = jobs.len(),
            total_created = self.jobs_created,
            total_jobs = self.total_jobs,
            "seed round"
        );

        jobs
    }

    /// Pause job creation: `Executing -> Suspended`
    ///
    /// # Errors
    /// [`StateError`] if the batch is not executing.
    pub fn suspend(&mut self) -> Result<(), StateError> {
        self.transition(BatchState::Suspended)?;
        self.suspended = true;
        Ok(())
    }

    /// Resume job creation: `Suspended -> Executing`
    ///
    /// # Errors
    /// [`StateError`] if the batch is not suspended.
    pub fn resume(&mut self) -> Result<(), StateError> {
        self.transition(BatchState::Executing)?;
        self.suspended = false;
        Ok(())
    }

    /// Mark all work done: `Executing -> Completed`
    ///
    /// # Errors
    /// [`StateError`] if the batch is not executing.
    pub fn complete(&mut self) -> Result<(), StateError> {
        self.transition(BatchState::Completed)
    }

    /// Cooperative cancellation
    ///
    /// Drops not-yet-started chunks and returns how many were dropped.
    /// Already-dispatched chunks run to completion or failure and their
    /// migrations remain valid, permanent, partial progress.
    ///
    /// # Errors
    /// [`StateError`] if the batch is already deleted.
    pub fn cancel(&mut self) -> Result<usize, StateError> {
        self.transition(BatchState::Deleted)?;
        let dropped = self.pending_chunks.len();
        self.pending_chunks.clear();

        tracing::info!(batch_id = %self.id, dropped, "batch canceled");
        Ok(dropped)
    }

    /// Delete the finished aggregate: `Completed -> Deleted`
    ///
    /// # Errors
    /// [`StateError`] if the batch has not completed.
    pub fn delete(&mut self) -> Result<(), StateError> {
        self.transition(BatchState::Deleted)
    }

    fn transition(&mut self, to: BatchState) -> Result<(), StateError> {
        validate_transition(self.state, to)?;
        self.state = to;
        Ok(())
    }
}
