//! Error types for the migration coordinator

use flowmig_batch::{BatchError, StateError};
use flowmig_history::HistoryError;

/// Coordinator errors
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Plan could not be serialized into the batch configuration
    #[error("configuration serialization failed: {0}")]
    Configuration(#[from] serde_json::Error),

    /// Batch aggregate error
    #[error("batch error: {0}")]
    Batch(#[from] BatchError),

    /// Illegal batch state transition
    #[error("state error: {0}")]
    State(#[from] StateError),

    /// Historic record error
    #[error("history error: {0}")]
    History(#[from] HistoryError),
}
