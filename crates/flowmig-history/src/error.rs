//! Error types for history persistence

use flowmig_core::BatchId;

/// History persistence errors
///
/// Not-found on point lookups is a normal empty result, never an
/// error; `RowMissing` only occurs for updates that require a row.
#[derive(Debug, Clone, thiserror::Error)]
pub enum HistoryError {
    /// Update targeted a row that does not exist
    #[error("historic batch not found: {0}")]
    RowMissing(BatchId),

    /// Row insert collided with an existing id
    #[error("historic batch already recorded: {0}")]
    DuplicateRow(BatchId),

    /// Underlying storage failure
    #[error("storage error: {0}")]
    Storage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_includes_id() {
        let id = BatchId::new();
        let err = HistoryError::RowMissing(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
