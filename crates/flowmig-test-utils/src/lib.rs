//! Testing utilities for the flowmig workspace
//!
//! Shared fixtures: a settable clock, an in-memory history store, and
//! scripted instance migrators.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use flowmig_batch::{InstanceMigrator, MigrateError};
use flowmig_core::{BatchId, Clock, Page};
use flowmig_history::{
    cleanup_eligible, CleanupQueryParams, HistoricBatch, HistoricBatchQuery, HistoricBatchStore,
    HistoricIncidentStore, HistoricJobLogStore, HistoryError, QueryAuthorizer,
};
use flowmig_migration::{
    MigrationPlan, ProcessDefinition, SameTypeCompatibility,
};
use parking_lot::Mutex;
use std::collections::HashSet;

/// Clock fixed at a point in time, advanced explicitly by tests
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn at_epoch() -> Self {
        Self::new(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock() += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        *self.now.lock() = to;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// In-memory history storage implementing all three store traits
///
/// Dependent rows (incidents, job logs) are modeled as flat lists of
/// batch references so cascade ordering is observable.
#[derive(Debug, Default)]
pub struct InMemoryHistoryStore {
    rows: DashMap<BatchId, HistoricBatch>,
    incidents: Mutex<Vec<BatchId>>,
    job_logs: Mutex<Vec<BatchId>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Seed a historic incident referencing the batch
    pub fn add_incident(&self, batch_id: BatchId) {
        self.incidents.lock().push(batch_id);
    }

    /// Seed a historic job log entry referencing the batch
    pub fn add_job_log(&self, batch_id: BatchId) {
        self.job_logs.lock().push(batch_id);
    }

    pub fn incident_count_for(&self, batch_id: BatchId) -> usize {
        self.incidents.lock().iter().filter(|id| **id == batch_id).count()
    }

    pub fn job_log_count_for(&self, batch_id: BatchId) -> usize {
        self.job_logs.lock().iter().filter(|id| **id == batch_id).count()
    }
}

impl HistoricBatchStore for InMemoryHistoryStore {
    fn insert(&self, row: HistoricBatch) -> Result<(), HistoryError> {
        if self.rows.contains_key(&row.id) {
            return Err(HistoryError::DuplicateRow(row.id));
        }
        self.rows.insert(row.id, row);
        Ok(())
    }

    fn update(&self, row: HistoricBatch) -> Result<(), HistoryError> {
        if !self.rows.contains_key(&row.id) {
            return Err(HistoryError::RowMissing(row.id));
        }
        self.rows.insert(row.id, row);
        Ok(())
    }

    fn select_by_id(&self, id: BatchId) -> Option<HistoricBatch> {
        self.rows.get(&id).map(|entry| entry.clone())
    }

    fn select_by_query(&self, query: &HistoricBatchQuery, page: Page) -> Vec<HistoricBatch> {
        let mut matched: Vec<HistoricBatch> = self
            .rows
            .iter()
            .filter(|entry| query.matches(entry.value()))
            .map(|entry| entry.clone())
            .collect();
        matched.sort_by_key(|row| (row.start_time, row.id));
        page.slice(&matched).to_vec()
    }

    fn count_by_query(&self, query: &HistoricBatchQuery) -> usize {
        self.rows.iter().filter(|entry| query.matches(entry.value())).count()
    }

    fn select_ids_for_cleanup(&self, params: &CleanupQueryParams) -> Vec<BatchId> {
        let mut eligible: Vec<HistoricBatch> = self
            .rows
            .iter()
            .filter(|entry| cleanup_eligible(entry.value(), params.now, &params.policy))
            .map(|entry| entry.clone())
            .collect();
        // oldest-overdue first, per the store contract
        eligible.sort_by_key(|row| (row.end_time, row.id));
        eligible.truncate(params.limit);
        eligible.into_iter().map(|row| row.id).collect()
    }

    fn delete_by_id(&self, id: BatchId) -> Result<(), HistoryError> {
        self.rows
            .remove(&id)
            .map(|_| ())
            .ok_or(HistoryError::RowMissing(id))
    }

    fn delete_by_ids(&self, ids: &[BatchId]) -> Result<(), HistoryError> {
        for id in ids {
            self.rows.remove(id);
        }
        Ok(())
    }
}

impl HistoricIncidentStore for InMemoryHistoryStore {
    fn delete_by_batch_ids(&self, ids: &[BatchId]) -> Result<(), HistoryError> {
        self.incidents.lock().retain(|id| !ids.contains(id));
        Ok(())
    }
}

impl HistoricJobLogStore for InMemoryHistoryStore {
    fn delete_by_batch_ids(&self, ids: &[BatchId]) -> Result<(), HistoryError> {
        self.job_logs.lock().retain(|id| !ids.contains(id));
        Ok(())
    }
}

/// Incident store whose deletes always fail, for cascade-error tests
#[derive(Debug, Default)]
pub struct FailingIncidentStore;

impl HistoricIncidentStore for FailingIncidentStore {
    fn delete_by_batch_ids(&self, _ids: &[BatchId]) -> Result<(), HistoryError> {
        Err(HistoryError::Storage("incident delete failed".to_string()))
    }
}

/// Authorizer restricting queries to a fixed tenant set
#[derive(Debug, Clone)]
pub struct TenantAuthorizer {
    pub tenants: Vec<String>,
}

impl TenantAuthorizer {
    pub fn new(tenants: Vec<String>) -> Self {
        Self { tenants }
    }
}

impl QueryAuthorizer for TenantAuthorizer {
    fn configure_query(&self, query: &mut HistoricBatchQuery) {
        query.tenant_ids = Some(self.tenants.clone());
    }
}

/// Migrator that records every applied instance and always succeeds
#[derive(Debug, Default)]
pub struct CountingMigrator {
    applied: Mutex<Vec<String>>,
}

impl CountingMigrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn applied(&self) -> Vec<String> {
        self.applied.lock().clone()
    }

    pub fn applied_count(&self) -> usize {
        self.applied.lock().len()
    }
}

#[async_trait]
impl InstanceMigrator for CountingMigrator {
    async fn apply(&self, _plan: &MigrationPlan, instance_id: &str) -> Result<(), MigrateError> {
        self.applied.lock().push(instance_id.to_string());
        Ok(())
    }
}

/// Migrator that permanently rejects a fixed set of instances
#[derive(Debug, Default)]
pub struct RejectingMigrator {
    rejected: HashSet<String>,
}

impl RejectingMigrator {
    pub fn rejecting<I, S>(instances: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rejected: instances.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl InstanceMigrator for RejectingMigrator {
    async fn apply(&self, _plan: &MigrationPlan, instance_id: &str) -> Result<(), MigrateError> {
        if self.rejected.contains(instance_id) {
            Err(MigrateError::new(instance_id, "concurrent structural change"))
        } else {
            Ok(())
        }
    }
}

/// Two-activity source/target definitions used across tests
pub fn sample_definitions() -> (ProcessDefinition, ProcessDefinition) {
    let source = ProcessDefinition::new("order:1")
        .with_activity("review", "user-task")
        .with_activity("ship", "service-task");
    let target = ProcessDefinition::new("order:2")
        .with_activity("review_v2", "user-task")
        .with_activity("ship_v2", "service-task");
    (source, target)
}

/// Validated plan over [`sample_definitions`]
pub fn sample_plan() -> MigrationPlan {
    let (source, target) = sample_definitions();
    MigrationPlan::builder("order:1", "order:2")
        .map_activity("review", "review_v2")
        .map_activity("ship", "ship_v2")
        .build(&source, &target, &SameTypeCompatibility)
        .expect("sample plan is valid")
}

/// Sequential instance ids `inst-0..inst-n`
pub fn instance_ids(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("inst-{i}")).collect()
}
