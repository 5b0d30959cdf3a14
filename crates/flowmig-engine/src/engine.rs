//! Batch migration coordinator
//!
//! The coordinator is the single logical owner of the batch and its
//! historic row transitions. Chunk execution itself is handed to the
//! injected [`InstanceMigrator`]; each chunk commits independently and
//! there is no transaction spanning chunks.

use crate::error::EngineError;
use flowmig_batch::{
    Batch, BatchConfig, BatchJob, BatchState, ChunkExecutor, InstanceMigrator, JobState,
};
use flowmig_core::{BatchId, JobId};
use flowmig_history::HistoricBatchManager;
use flowmig_migration::MigrationPlan;
use std::sync::Arc;

/// Batch type string for process-instance migrations
pub const INSTANCE_MIGRATION: &str = "instance-migration";

/// One submitted migration run
///
/// Owns the live batch, the shared read-only plan, and every job
/// created so far.
#[derive(Debug)]
pub struct MigrationRun {
    batch: Batch,
    plan: Arc<MigrationPlan>,
    jobs: Vec<BatchJob>,
}

impl MigrationRun {
    /// Batch id
    #[inline]
    #[must_use]
    pub fn id(&self) -> BatchId {
        self.batch.id()
    }

    /// The live batch aggregate
    #[inline]
    #[must_use]
    pub fn batch(&self) -> &Batch {
        &self.batch
    }

    /// Mutable batch access for suspension and cancellation
    #[inline]
    pub fn batch_mut(&mut self) -> &mut Batch {
        &mut self.batch
    }

    /// The immutable plan every job applies
    #[inline]
    #[must_use]
    pub fn plan(&self) -> &MigrationPlan {
        &self.plan
    }

    /// Jobs created so far, finished or not
    #[inline]
    #[must_use]
    pub fn jobs(&self) -> &[BatchJob] {
        &self.jobs
    }
}

/// Outcome of driving a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRunReport {
    /// Chunks the batch was partitioned into
    pub total_jobs: usize,
    /// Jobs that committed their whole chunk
    pub jobs_completed: usize,
    /// Jobs that exhausted their retry budget
    pub jobs_failed: usize,
    /// Chunks never turned into jobs (canceled or still pending)
    pub jobs_dropped: usize,
    /// Failure reasons per failed job
    pub failures: Vec<(JobId, String)>,
}

/// Coordinates submission, execution, and historic lifecycle
pub struct BatchMigrationEngine {
    history: Arc<HistoricBatchManager>,
}

impl BatchMigrationEngine {
    /// Create engine around a historic batch manager
    #[inline]
    #[must_use]
    pub fn new(history: Arc<HistoricBatchManager>) -> Self {
        Self { history }
    }

    /// Submit a validated plan over a target instance set
    ///
    /// Serializes the plan into the batch configuration, creates the
    /// live batch, and records the historic start (gate permitting).
    /// The submitter returns immediately; execution is asynchronous.
    ///
    /// # Errors
    /// [`EngineError`] when the configuration cannot be serialized or
    /// the historic start cannot be recorded.
    pub fn submit(
        &self,
        plan: MigrationPlan,
        instance_ids: &[String],
        config: BatchConfig,
    ) -> Result<MigrationRun, EngineError> {
        let configuration = serde_json::to_string(&plan)?;
        let batch = Batch::new(config, configuration, instance_ids);
        self.history.create_historic_batch(&batch)?;

        tracing::info!(
            batch_id = %batch.id(),
            source = plan.source_definition_id(),
            target = plan.target_definition_id(),
            instances = instance_ids.len(),
            total_jobs = batch.total_jobs(),
            "migration batch submitted"
        );

        Ok(MigrationRun {
            batch,
            plan: Arc::new(plan),
            jobs: Vec::new(),
        })
    }

    /// Drive the run until it completes or pauses
    ///
    /// Seed rounds create at most `jobs_per_seed` jobs each; every job
    /// in a wave executes concurrently and commits independently. A
    /// suspended run returns early with partial progress intact; call
    /// again after [`Batch::resume`]. On completion the historic end is
    /// recorded and the runtime aggregate is deleted.
    ///
    /// # Errors
    /// [`EngineError`] on illegal state transitions or history failures.
    /// Chunk failures are not errors; they appear in the report.
    pub async fn run_to_completion(
        &self,
        run: &mut MigrationRun,
        migrator: &dyn InstanceMigrator,
    ) -> Result<BatchRunReport, EngineError> {
        if run.batch.state() == BatchState::Created {
            run.batch.start()?;
        }

        let executor = ChunkExecutor::new(run.batch.retry_budget());
        while run.batch.state() == BatchState::Executing {
            let mut wave = run.batch.seed();
            if wave.is_empty() {
                break;
            }

            let executions = wave
                .iter_mut()
                .map(|job| executor.execute(job, &run.plan, migrator));
            futures::future::join_all(executions).await;
            run.jobs.append(&mut wave);
        }

        if run.batch.state() == BatchState::Executing && run.batch.is_fully_seeded() {
            run.batch.complete()?;
            self.history.complete_historic_batch(&run.batch)?;
            run.batch.delete()?;

            tracing::info!(batch_id = %run.batch.id(), "migration batch completed");
        }

        Ok(self.report(run))
    }

    /// Cancel the run cooperatively
    ///
    /// Pending chunks are dropped; committed chunks stay migrated. The
    /// historic end is recorded so the record reflects when the batch
    /// stopped.
    ///
    /// # Errors
    /// [`EngineError`] when the batch is already deleted.
    pub fn cancel(&self, run: &mut MigrationRun) -> Result<usize, EngineError> {
        let dropped = run.batch.cancel()?;
        self.history.complete_historic_batch(&run.batch)?;
        Ok(dropped)
    }

    fn report(&self, run: &MigrationRun) -> BatchRunReport {
        let jobs_completed = run
            .jobs
            .iter()
            .filter(|job| job.state == JobState::Completed)
            .count();
        let failures: Vec<(JobId, String)> = run
            .jobs
            .iter()
            .filter(|job| job.state == JobState::Failed)
            .map(|job| (job.id, job.failure.clone().unwrap_or_default()))
            .collect();

        BatchRunReport {
            total_jobs: run.batch.total_jobs(),
            jobs_completed,
            jobs_failed: failures.len(),
            jobs_dropped: run.batch.total_jobs() - run.batch.jobs_created(),
            failures,
        }
    }
}

impl std::fmt::Debug for BatchMigrationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchMigrationEngine").finish_non_exhaustive()
    }
}
