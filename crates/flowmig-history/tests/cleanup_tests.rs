//! Retention cleanup sweep integration tests

use chrono::Duration;
use flowmig_batch::{Batch, BatchConfig};
use flowmig_core::{RetentionPolicy, TimeToLive};
use flowmig_history::{
    DefaultHistoryEventProducer, HistoricBatchManager, HistoryCleanupSweep, HistoryLevelAudit,
    PermitAll,
};
use flowmig_test_utils::{instance_ids, FixedClock, InMemoryHistoryStore};
use std::sync::Arc;

fn manager(store: Arc<InMemoryHistoryStore>, clock: Arc<FixedClock>) -> HistoricBatchManager {
    HistoricBatchManager::new(
        store.clone(),
        store.clone(),
        store,
        Arc::new(PermitAll),
        clock,
        Arc::new(HistoryLevelAudit),
        Arc::new(DefaultHistoryEventProducer),
    )
}

/// Creates and completes one batch, advancing the clock between rows
fn completed_batch(
    manager: &HistoricBatchManager,
    clock: &FixedClock,
    batch_type: &str,
) -> flowmig_core::BatchId {
    let batch = Batch::new(BatchConfig::new(batch_type), String::new(), &instance_ids(1));
    manager.create_historic_batch(&batch).unwrap();
    clock.advance(Duration::hours(1));
    manager.complete_historic_batch(&batch).unwrap();
    batch.id()
}

fn policy_7d() -> RetentionPolicy {
    RetentionPolicy::new().with_ttl("instance-migration", TimeToLive::After(Duration::days(7)))
}

#[test]
fn cleanup_ids_come_back_oldest_first_and_truncated() {
    let store = Arc::new(InMemoryHistoryStore::new());
    let clock = Arc::new(FixedClock::at_epoch());
    let manager = manager(store, clock.clone());

    // three rows completed an hour apart, all long past TTL
    let oldest = completed_batch(&manager, &clock, "instance-migration");
    let middle = completed_batch(&manager, &clock, "instance-migration");
    let newest = completed_batch(&manager, &clock, "instance-migration");
    clock.advance(Duration::days(30));

    let ids = manager.find_historic_batch_ids_for_cleanup(10, &policy_7d());
    assert_eq!(ids, vec![oldest, middle, newest]);

    let truncated = manager.find_historic_batch_ids_for_cleanup(2, &policy_7d());
    assert_eq!(truncated, vec![oldest, middle]);
}

#[test]
fn open_and_recent_and_unconfigured_rows_are_not_selected() {
    let store = Arc::new(InMemoryHistoryStore::new());
    let clock = Arc::new(FixedClock::at_epoch());
    let manager = manager(store, clock.clone());

    // completed but unconfigured type
    completed_batch(&manager, &clock, "bulk-deletion");

    // still running
    let open = Batch::new(
        BatchConfig::new("instance-migration"),
        String::new(),
        &instance_ids(1),
    );
    manager.create_historic_batch(&open).unwrap();

    // completed but within TTL
    let recent = completed_batch(&manager, &clock, "instance-migration");
    clock.advance(Duration::days(6));

    let ids = manager.find_historic_batch_ids_for_cleanup(10, &policy_7d());
    assert!(ids.is_empty());

    // never-expire configuration is equally excluded
    let never = RetentionPolicy::new().with_ttl("instance-migration", TimeToLive::Never);
    clock.advance(Duration::days(365));
    assert!(manager.find_historic_batch_ids_for_cleanup(10, &never).is_empty());

    // sanity: with the finite policy the recent row is now overdue
    let ids = manager.find_historic_batch_ids_for_cleanup(10, &policy_7d());
    assert_eq!(ids, vec![recent]);
}

#[test]
fn sweep_drains_in_bounded_pages() {
    let store = Arc::new(InMemoryHistoryStore::new());
    let clock = Arc::new(FixedClock::at_epoch());
    let manager = manager(store.clone(), clock.clone());

    for _ in 0..7 {
        let id = completed_batch(&manager, &clock, "instance-migration");
        store.add_incident(id);
    }
    clock.advance(Duration::days(30));

    let report = HistoryCleanupSweep::new(3, 10).run(&manager, &policy_7d()).unwrap();
    assert_eq!(report.deleted, 7);
    assert!(report.drained);
    // 3 + 3 + 1 + empty page
    assert_eq!(report.iterations, 4);
    assert_eq!(store.row_count(), 0);
}

#[test]
fn sweep_stops_at_its_iteration_budget() {
    let store = Arc::new(InMemoryHistoryStore::new());
    let clock = Arc::new(FixedClock::at_epoch());
    let manager = manager(store.clone(), clock.clone());

    for _ in 0..10 {
        completed_batch(&manager, &clock, "instance-migration");
    }
    clock.advance(Duration::days(30));

    let report = HistoryCleanupSweep::new(2, 3).run(&manager, &policy_7d()).unwrap();
    assert_eq!(report.deleted, 6);
    assert!(!report.drained);
    assert_eq!(report.iterations, 3);
    assert_eq!(store.row_count(), 4);
}

#[test]
fn sweep_on_empty_history_is_a_noop() {
    let store = Arc::new(InMemoryHistoryStore::new());
    let clock = Arc::new(FixedClock::at_epoch());
    let manager = manager(store, clock);

    let report = HistoryCleanupSweep::new(10, 10).run(&manager, &policy_7d()).unwrap();
    assert_eq!(report.deleted, 0);
    assert!(report.drained);
    assert_eq!(report.iterations, 1);
}

#[test]
fn new_rows_created_mid_sweep_are_never_falsely_swept() {
    let store = Arc::new(InMemoryHistoryStore::new());
    let clock = Arc::new(FixedClock::at_epoch());
    let manager = manager(store.clone(), clock.clone());

    completed_batch(&manager, &clock, "instance-migration");
    clock.advance(Duration::days(30));

    // a fresh batch appears concurrently with the sweep
    let fresh = Batch::new(
        BatchConfig::new("instance-migration"),
        String::new(),
        &instance_ids(1),
    );
    manager.create_historic_batch(&fresh).unwrap();

    let report = HistoryCleanupSweep::new(10, 10).run(&manager, &policy_7d()).unwrap();
    assert_eq!(report.deleted, 1);
    assert!(manager.find_historic_batch_by_id(fresh.id()).is_some());
}
