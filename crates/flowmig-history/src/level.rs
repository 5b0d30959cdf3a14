//! History level gate
//!
//! A pure policy answering "should this event type be recorded?". The
//! gate must be consulted before an event object is built or persisted;
//! when it is closed for batch-start, no historic row exists while the
//! batch runs.

/// Batch lifecycle event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HistoryEventType {
    /// Batch was created
    BatchStart,
    /// Batch finished or was canceled
    BatchEnd,
}

/// Configured history verbosity
pub trait HistoryLevel: Send + Sync {
    /// Whether events of this type are recorded
    fn is_history_event_produced(&self, event_type: HistoryEventType) -> bool;
}

/// Records nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryLevelNone;

impl HistoryLevel for HistoryLevelNone {
    fn is_history_event_produced(&self, _event_type: HistoryEventType) -> bool {
        false
    }
}

/// Records activity-level events only; batch lifecycle is not recorded
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryLevelActivity;

impl HistoryLevel for HistoryLevelActivity {
    fn is_history_event_produced(&self, _event_type: HistoryEventType) -> bool {
        false
    }
}

/// Records audit-level events, including batch lifecycle
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryLevelAudit;

impl HistoryLevel for HistoryLevelAudit {
    fn is_history_event_produced(&self, event_type: HistoryEventType) -> bool {
        matches!(
            event_type,
            HistoryEventType::BatchStart | HistoryEventType::BatchEnd
        )
    }
}

/// Records everything
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryLevelFull;

impl HistoryLevel for HistoryLevelFull {
    fn is_history_event_produced(&self, _event_type: HistoryEventType) -> bool {
        true
    }
}
