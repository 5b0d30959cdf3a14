//! Migration instruction value object

use serde::{Deserialize, Serialize};

/// One source-activity-to-target-activity mapping
///
/// Immutable after construction; all structural checks happen during
/// plan validation so a single report can list every problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MigrationInstruction {
    source_activity_id: String,
    target_activity_id: String,
}

impl MigrationInstruction {
    /// Create new instruction
    #[inline]
    #[must_use]
    pub fn new(source_activity_id: impl Into<String>, target_activity_id: impl Into<String>) -> Self {
        Self {
            source_activity_id: source_activity_id.into(),
            target_activity_id: target_activity_id.into(),
        }
    }

    /// Activity id in the source definition
    #[inline]
    #[must_use]
    pub fn source_activity_id(&self) -> &str {
        &self.source_activity_id
    }

    /// Activity id in the target definition
    #[inline]
    #[must_use]
    pub fn target_activity_id(&self) -> &str {
        &self.target_activity_id
    }
}

impl std::fmt::Display for MigrationInstruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.source_activity_id, self.target_activity_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instruction_accessors() {
        let instr = MigrationInstruction::new("review", "review_v2");
        assert_eq!(instr.source_activity_id(), "review");
        assert_eq!(instr.target_activity_id(), "review_v2");
    }

    #[test]
    fn instruction_display() {
        let instr = MigrationInstruction::new("a", "b");
        assert_eq!(instr.to_string(), "a -> b");
    }
}
