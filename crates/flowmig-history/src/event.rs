//! History events and their producer seam
//!
//! The manager never inspects event internals; it only asks the gate
//! whether producing one is authorized, then hands the payload to the
//! store. Producers are pure: batch in, event out.

use crate::historic_batch::HistoricBatch;
use crate::level::HistoryEventType;
use chrono::{DateTime, Utc};
use flowmig_batch::Batch;

/// One produced lifecycle event
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    /// What happened
    pub event_type: HistoryEventType,
    /// Row payload derived from the live batch
    pub entity: HistoricBatch,
}

/// Builds concrete event payloads for batch lifecycle transitions
pub trait HistoryEventProducer: Send + Sync {
    /// Event recording that a batch started
    fn create_batch_start_event(&self, batch: &Batch, now: DateTime<Utc>) -> HistoryEvent;

    /// Event recording that a batch ended
    ///
    /// The payload carries both timestamps so a row can still be
    /// materialized when the start event was suppressed.
    fn create_batch_end_event(&self, batch: &Batch, now: DateTime<Utc>) -> HistoryEvent;
}

/// Straightforward projection-based producer
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultHistoryEventProducer;

impl HistoryEventProducer for DefaultHistoryEventProducer {
    fn create_batch_start_event(&self, batch: &Batch, now: DateTime<Utc>) -> HistoryEvent {
        HistoryEvent {
            event_type: HistoryEventType::BatchStart,
            entity: HistoricBatch::from_batch(batch, now),
        }
    }

    fn create_batch_end_event(&self, batch: &Batch, now: DateTime<Utc>) -> HistoryEvent {
        let mut entity = HistoricBatch::from_batch(batch, now);
        entity.end_time = Some(now);
        HistoryEvent {
            event_type: HistoryEventType::BatchEnd,
            entity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowmig_batch::BatchConfig;

    fn batch() -> Batch {
        Batch::new(
            BatchConfig::new("instance-migration"),
            String::new(),
            &["inst-1".to_string()],
        )
    }

    #[test]
    fn start_event_has_open_end() {
        let now = Utc::now();
        let event = DefaultHistoryEventProducer.create_batch_start_event(&batch(), now);
        assert_eq!(event.event_type, HistoryEventType::BatchStart);
        assert_eq!(event.entity.start_time, now);
        assert!(event.entity.end_time.is_none());
    }

    #[test]
    fn end_event_carries_both_timestamps() {
        let now = Utc::now();
        let event = DefaultHistoryEventProducer.create_batch_end_event(&batch(), now);
        assert_eq!(event.event_type, HistoryEventType::BatchEnd);
        assert_eq!(event.entity.start_time, now);
        assert_eq!(event.entity.end_time, Some(now));
    }
}
