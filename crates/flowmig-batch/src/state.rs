//! Batch state machine
//!
//! `Created -> Executing -> Completed | Suspended -> Executing | Deleted`
//!
//! Suspension pauses job creation without losing completed progress.
//! Deletion is reachable from every live state because cancellation is
//! cooperative: committed chunks stay valid, pending ones are dropped.

use crate::error::StateError;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BatchState {
    /// Submitted, no jobs dispatched yet
    Created,
    /// Seed rounds are producing jobs, chunks are running
    Executing,
    /// Job creation paused
    Suspended,
    /// All jobs finished (successfully or exhausted)
    Completed,
    /// Canceled or cleaned up; only the historic projection survives
    Deleted,
}

/// Validates a state transition.
pub fn validate_transition(from: BatchState, to: BatchState) -> Result<(), StateError> {
    if allowed(from, to) {
        Ok(())
    } else {
        Err(StateError::IllegalTransition { from, to })
    }
}

/// States reachable from `from`
pub fn allowed_transitions(from: BatchState) -> Vec<BatchState> {
    use BatchState::*;
    match from {
        Created => vec![Executing, Deleted],
        Executing => vec![Completed, Suspended, Deleted],
        Suspended => vec![Executing, Deleted],
        Completed => vec![Deleted],
        Deleted => vec![],
    }
}

fn allowed(from: BatchState, to: BatchState) -> bool {
    allowed_transitions(from).into_iter().any(|s| s == to)
}
