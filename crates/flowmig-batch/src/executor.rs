//! Chunk execution
//!
//! A chunk is retried as a whole: a concurrent structural change on
//! one instance fails the attempt, and the next attempt re-applies the
//! plan to the remaining instances. Instances already migrated in an
//! earlier attempt must be skipped or tolerated by the migrator, which
//! owns per-instance commit semantics.

use crate::error::MigrateError;
use crate::job::{BatchJob, JobState};
use flowmig_migration::MigrationPlan;
use std::sync::Arc;

/// Workflow-runtime seam: advances one instance to the target version
///
/// How a token actually moves is out of scope here; implementations
/// commit each instance independently.
#[async_trait::async_trait]
pub trait InstanceMigrator: Send + Sync {
    /// Apply the plan to one running instance
    ///
    /// # Errors
    /// [`MigrateError`] when the instance cannot be migrated, e.g. its
    /// activity instance tree no longer matches the expected shape.
    async fn apply(&self, plan: &MigrationPlan, instance_id: &str) -> Result<(), MigrateError>;
}

/// Executes one job's chunk with a bounded retry budget
#[derive(Debug, Clone, Copy)]
pub struct ChunkExecutor {
    retry_budget: u32,
}

impl ChunkExecutor {
    /// Create executor with the given retry budget
    #[inline]
    #[must_use]
    pub fn new(retry_budget: u32) -> Self {
        Self { retry_budget }
    }

    /// Run the job to a terminal state
    ///
    /// The whole chunk is attempted up to `1 + retry_budget` times.
    /// Exhaustion marks the job [`JobState::Failed`] and records the
    /// last failure; sibling jobs are unaffected.
    pub async fn execute(
        &self,
        job: &mut BatchJob,
        plan: &Arc<MigrationPlan>,
        migrator: &dyn InstanceMigrator,
    ) -> JobState {
        job.state = JobState::Running;
        let max_attempts = self.retry_budget.saturating_add(1);

        while job.attempts < max_attempts {
            job.attempts += 1;
            match self.run_attempt(job, plan, migrator).await {
                Ok(()) => {
                    job.state = JobState::Completed;
                    job.failure = None;
                    tracing::debug!(
                        job_id = %job.id,
                        batch_id = %job.batch_id,
                        attempts = job.attempts,
                        "chunk completed"
                    );
                    return job.state;
                }
                Err(err) => {
                    tracing::warn!(
                        job_id = %job.id,
                        batch_id = %job.batch_id,
                        attempt = job.attempts,
                        error = %err,
                        "chunk attempt failed"
                    );
                    job.failure = Some(err.to_string());
                }
            }
        }

        job.state = JobState::Failed;
        tracing::warn!(
            job_id = %job.id,
            batch_id = %job.batch_id,
            attempts = job.attempts,
            "chunk retry budget exhausted"
        );
        job.state
    }

    async fn run_attempt(
        &self,
        job: &BatchJob,
        plan: &Arc<MigrationPlan>,
        migrator: &dyn InstanceMigrator,
    ) -> Result<(), MigrateError> {
        for instance_id in &job.instance_ids {
            migrator.apply(plan, instance_id).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmig_core::BatchId;
    use flowmig_migration::{MigrationPlan, ProcessDefinition, SameTypeCompatibility};
    use std::sync::atomic::{AtomicU32, Ordering};

    fn plan() -> Arc<MigrationPlan> {
        let source = ProcessDefinition::new("p:1").with_activity("a", "user-task");
        let target = ProcessDefinition::new("p:2").with_activity("a2", "user-task");
        Arc::new(
            MigrationPlan::builder("p:1", "p:2")
                .map_activity("a", "a2")
                .build(&source, &target, &SameTypeCompatibility)
                .unwrap(),
        )
    }

    struct AlwaysOk;

    #[async_trait::async_trait]
    impl InstanceMigrator for AlwaysOk {
        async fn apply(&self, _: &MigrationPlan, _: &str) -> Result<(), MigrateError> {
            Ok(())
        }
    }

    /// Fails the first `failures` calls, then succeeds
    struct FailNTimes {
        failures: u32,
        calls: AtomicU32,
    }

    #[async_trait::async_trait]
    impl InstanceMigrator for FailNTimes {
        async fn apply(&self, _: &MigrationPlan, instance_id: &str) -> Result<(), MigrateError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                Err(MigrateError::new(instance_id, "concurrent change"))
            } else {
                Ok(())
            }
        }
    }

    fn job(instances: usize) -> BatchJob {
        BatchJob::new(
            BatchId::new(),
            (0..instances).map(|i| format!("inst-{i}")).collect(),
        )
    }

    #[tokio::test]
    async fn chunk_completes_on_first_attempt() {
        let mut job = job(3);
        let state = ChunkExecutor::new(3).execute(&mut job, &plan(), &AlwaysOk).await;
        assert_eq!(state, JobState::Completed);
        assert_eq!(job.attempts, 1);
        assert!(job.failure.is_none());
    }

    #[tokio::test]
    async fn chunk_retries_then_succeeds() {
        let migrator = FailNTimes {
            failures: 2,
            calls: AtomicU32::new(0),
        };
        let mut job = job(1);
        let state = ChunkExecutor::new(3).execute(&mut job, &plan(), &migrator).await;
        assert_eq!(state, JobState::Completed);
        assert_eq!(job.attempts, 3);
    }

    #[tokio::test]
    async fn chunk_fails_after_budget_exhausted() {
        let migrator = FailNTimes {
            failures: u32::MAX,
            calls: AtomicU32::new(0),
        };
        let mut job = job(1);
        let state = ChunkExecutor::new(2).execute(&mut job, &plan(), &migrator).await;
        assert_eq!(state, JobState::Failed);
        assert_eq!(job.attempts, 3);
        assert!(job.failure.as_deref().unwrap().contains("concurrent change"));
    }

    #[tokio::test]
    async fn zero_budget_means_single_attempt() {
        let migrator = FailNTimes {
            failures: 1,
            calls: AtomicU32::new(0),
        };
        let mut job = job(1);
        let state = ChunkExecutor::new(0).execute(&mut job, &plan(), &migrator).await;
        assert_eq!(state, JobState::Failed);
        assert_eq!(job.attempts, 1);
    }
}
