//! Error types for plan validation

use crate::validation::InstructionViolation;

/// Structured multi-violation validation failure
///
/// Carries every violation found in one pass so the plan can be fixed
/// in a single round trip.
#[derive(Debug, Clone, thiserror::Error)]
#[error("migration plan invalid: {} violation(s)", violations.len())]
pub struct PlanValidationError {
    /// Every violation found, in instruction order
    pub violations: Vec<InstructionViolation>,
}

impl PlanValidationError {
    /// Create from collected violations
    #[inline]
    #[must_use]
    pub fn new(violations: Vec<InstructionViolation>) -> Self {
        Self { violations }
    }

    /// Number of violations
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Whether the report is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::MigrationInstruction;
    use crate::validation::ViolationKind;

    #[test]
    fn error_display_counts_violations() {
        let err = PlanValidationError::new(vec![InstructionViolation {
            index: 0,
            instruction: MigrationInstruction::new("a", "b"),
            kind: ViolationKind::SourceActivityNotFound,
        }]);
        assert!(err.to_string().contains("1 violation"));
    }
}
