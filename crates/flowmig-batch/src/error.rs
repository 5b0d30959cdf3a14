//! Error types for batch execution

use crate::state::BatchState;

/// Batch aggregate errors
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Illegal state machine transition
    #[error("batch state error: {0}")]
    State(#[from] StateError),

    /// A chunk exhausted its retry budget
    #[error("chunk failed after {attempts} attempt(s): {reason}")]
    ChunkExhausted {
        /// Attempts made including the first run
        attempts: u32,
        /// Last failure reason
        reason: String,
    },
}

/// State machine errors
#[derive(Debug, Clone, Copy, thiserror::Error)]
pub enum StateError {
    /// Transition not allowed by the batch lifecycle
    #[error("illegal state transition: {from:?} -> {to:?}")]
    IllegalTransition {
        /// Current state
        from: BatchState,
        /// Requested state
        to: BatchState,
    },
}

/// Failure applying the plan to one instance
///
/// Typically a concurrent structural change: the instance progressed
/// past the mapped activity while the chunk was in flight.
#[derive(Debug, Clone, thiserror::Error)]
#[error("instance {instance_id}: {reason}")]
pub struct MigrateError {
    /// The instance that could not be migrated
    pub instance_id: String,
    /// Collaborator-supplied reason
    pub reason: String,
}

impl MigrateError {
    /// Create new migration failure
    #[inline]
    #[must_use]
    pub fn new(instance_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            reason: reason.into(),
        }
    }
}
