//! Migration plan
//!
//! Built through [`MigrationPlanBuilder`], validated once, then shared
//! read-only by every job in a batch.

use crate::definition::DefinitionDescriptor;
use crate::error::PlanValidationError;
use crate::instruction::MigrationInstruction;
use crate::validation::{validate_instructions, InstructionCompatibility};
use serde::{Deserialize, Serialize};

/// Validated, immutable migration plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationPlan {
    source_definition_id: String,
    target_definition_id: String,
    instructions: Vec<MigrationInstruction>,
}

impl MigrationPlan {
    /// Start building a plan between two definition versions
    #[inline]
    #[must_use]
    pub fn builder(
        source_definition_id: impl Into<String>,
        target_definition_id: impl Into<String>,
    ) -> MigrationPlanBuilder {
        MigrationPlanBuilder {
            source_definition_id: source_definition_id.into(),
            target_definition_id: target_definition_id.into(),
            instructions: Vec::new(),
        }
    }

    /// Source definition id
    #[inline]
    #[must_use]
    pub fn source_definition_id(&self) -> &str {
        &self.source_definition_id
    }

    /// Target definition id
    #[inline]
    #[must_use]
    pub fn target_definition_id(&self) -> &str {
        &self.target_definition_id
    }

    /// Ordered instructions
    #[inline]
    #[must_use]
    pub fn instructions(&self) -> &[MigrationInstruction] {
        &self.instructions
    }

    /// Instruction migrating the given source activity, if any
    #[must_use]
    pub fn instruction_for(&self, source_activity_id: &str) -> Option<&MigrationInstruction> {
        self.instructions
            .iter()
            .find(|i| i.source_activity_id() == source_activity_id)
    }
}

/// Accumulates mappings before validation
#[derive(Debug, Clone)]
pub struct MigrationPlanBuilder {
    source_definition_id: String,
    target_definition_id: String,
    instructions: Vec<MigrationInstruction>,
}

impl MigrationPlanBuilder {
    /// Map one source activity to one target activity
    #[inline]
    #[must_use]
    pub fn map_activity(
        mut self,
        source_activity_id: impl Into<String>,
        target_activity_id: impl Into<String>,
    ) -> Self {
        self.instructions
            .push(MigrationInstruction::new(source_activity_id, target_activity_id));
        self
    }

    /// Validate against both definitions and freeze the plan
    ///
    /// Fails fast, before any batch exists, and returns every violation
    /// found rather than only the first.
    ///
    /// # Errors
    /// [`PlanValidationError`] listing all offending instructions.
    pub fn build(
        self,
        source: &dyn DefinitionDescriptor,
        target: &dyn DefinitionDescriptor,
        compatibility: &dyn InstructionCompatibility,
    ) -> Result<MigrationPlan, PlanValidationError> {
        let violations = validate_instructions(&self.instructions, source, target, compatibility);
        if violations.is_empty() {
            Ok(MigrationPlan {
                source_definition_id: self.source_definition_id,
                target_definition_id: self.target_definition_id,
                instructions: self.instructions,
            })
        } else {
            Err(PlanValidationError::new(violations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ProcessDefinition;
    use crate::validation::{SameTypeCompatibility, ViolationKind};
    use pretty_assertions::assert_eq;

    fn defs() -> (ProcessDefinition, ProcessDefinition) {
        let source = ProcessDefinition::new("order:1")
            .with_activity("review", "user-task")
            .with_activity("ship", "service-task");
        let target = ProcessDefinition::new("order:2")
            .with_activity("review_v2", "user-task")
            .with_activity("ship_v2", "service-task");
        (source, target)
    }

    #[test]
    fn build_validates_and_freezes() {
        let (source, target) = defs();
        let plan = MigrationPlan::builder("order:1", "order:2")
            .map_activity("review", "review_v2")
            .map_activity("ship", "ship_v2")
            .build(&source, &target, &SameTypeCompatibility)
            .unwrap();

        assert_eq!(plan.source_definition_id(), "order:1");
        assert_eq!(plan.target_definition_id(), "order:2");
        assert_eq!(plan.instructions().len(), 2);
        assert_eq!(
            plan.instruction_for("review").unwrap().target_activity_id(),
            "review_v2"
        );
        assert!(plan.instruction_for("unknown").is_none());
    }

    #[test]
    fn build_reports_all_violations_at_once() {
        let (source, target) = defs();
        let err = MigrationPlan::builder("order:1", "order:2")
            .map_activity("missing_a", "review_v2")
            .map_activity("missing_b", "review_v2")
            .build(&source, &target, &SameTypeCompatibility)
            .unwrap_err();

        assert_eq!(err.len(), 2);
        assert!(err
            .violations
            .iter()
            .all(|v| v.kind == ViolationKind::SourceActivityNotFound));
    }

    #[test]
    fn plan_serde_roundtrip() {
        let (source, target) = defs();
        let plan = MigrationPlan::builder("order:1", "order:2")
            .map_activity("review", "review_v2")
            .build(&source, &target, &SameTypeCompatibility)
            .unwrap();

        let json = serde_json::to_string(&plan).unwrap();
        let back: MigrationPlan = serde_json::from_str(&json).unwrap();
        assert_eq!(plan, back);
    }
}
