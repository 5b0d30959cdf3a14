//! Plan validation
//!
//! Validation is a pure computation over the supplied definition
//! descriptors: no side effects, no batch exists yet. It never stops
//! at the first problem; every offending instruction is reported with
//! its position and the reason.

use crate::definition::DefinitionDescriptor;
use crate::instruction::MigrationInstruction;
use std::collections::HashMap;

/// Why an instruction was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Source activity id is empty
    EmptySourceActivityId,
    /// Target activity id is empty
    EmptyTargetActivityId,
    /// Source activity does not exist in the source definition
    SourceActivityNotFound,
    /// Target activity does not exist in the target definition
    TargetActivityNotFound,
    /// Another instruction already migrates the same source activity
    DuplicateSourceActivity {
        /// Index of the instruction seen first
        first_index: usize,
    },
    /// The runtime collaborator reported the pair as incompatible
    Incompatible {
        /// Collaborator-supplied reason
        reason: String,
    },
}

impl std::fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptySourceActivityId => write!(f, "source activity id is empty"),
            Self::EmptyTargetActivityId => write!(f, "target activity id is empty"),
            Self::SourceActivityNotFound => write!(f, "source activity not found"),
            Self::TargetActivityNotFound => write!(f, "target activity not found"),
            Self::DuplicateSourceActivity { first_index } => {
                write!(f, "source activity already mapped by instruction {first_index}")
            }
            Self::Incompatible { reason } => write!(f, "incompatible mapping: {reason}"),
        }
    }
}

/// One violation, uniquely identifying its offending instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionViolation {
    /// Position of the instruction in the plan
    pub index: usize,
    /// The offending instruction
    pub instruction: MigrationInstruction,
    /// What is wrong with it
    pub kind: ViolationKind,
}

impl std::fmt::Display for InstructionViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "instruction {} ({}): {}", self.index, self.instruction, self.kind)
    }
}

/// Structural compatibility check owned by the workflow runtime
///
/// The plan core rejects whatever this collaborator rejects; it does
/// not interpret the reason.
pub trait InstructionCompatibility: Send + Sync {
    /// Check one mapping whose activities both exist
    ///
    /// # Errors
    /// A human-readable reason when the pair cannot be migrated.
    fn check(
        &self,
        instruction: &MigrationInstruction,
        source: &dyn DefinitionDescriptor,
        target: &dyn DefinitionDescriptor,
    ) -> Result<(), String>;
}

/// Default compatibility rule: activities must share a behavioral type
#[derive(Debug, Clone, Copy, Default)]
pub struct SameTypeCompatibility;

impl InstructionCompatibility for SameTypeCompatibility {
    fn check(
        &self,
        instruction: &MigrationInstruction,
        source: &dyn DefinitionDescriptor,
        target: &dyn DefinitionDescriptor,
    ) -> Result<(), String> {
        let source_type = source.activity_type(instruction.source_activity_id());
        let target_type = target.activity_type(instruction.target_activity_id());
        match (source_type, target_type) {
            (Some(s), Some(t)) if s == t => Ok(()),
            (Some(s), Some(t)) => Err(format!("behavioral type mismatch: {s} vs {t}")),
            // Existence is validated separately; nothing to check here
            _ => Ok(()),
        }
    }
}

/// Validate instructions against both definitions, collecting every violation
pub(crate) fn validate_instructions(
    instructions: &[MigrationInstruction],
    source: &dyn DefinitionDescriptor,
    target: &dyn DefinitionDescriptor,
    compatibility: &dyn InstructionCompatibility,
) -> Vec<InstructionViolation> {
    let mut violations = Vec::new();
    let mut seen_sources: HashMap<&str, usize> = HashMap::new();

    for (index, instruction) in instructions.iter().enumerate() {
        let mut structurally_sound = true;

        if instruction.source_activity_id().is_empty() {
            violations.push(InstructionViolation {
                index,
                instruction: instruction.clone(),
                kind: ViolationKind::EmptySourceActivityId,
            });
            structurally_sound = false;
        } else if !source.has_activity(instruction.source_activity_id()) {
            violations.push(InstructionViolation {
                index,
                instruction: instruction.clone(),
                kind: ViolationKind::SourceActivityNotFound,
            });
            structurally_sound = false;
        }

        if instruction.target_activity_id().is_empty() {
            violations.push(InstructionViolation {
                index,
                instruction: instruction.clone(),
                kind: ViolationKind::EmptyTargetActivityId,
            });
            structurally_sound = false;
        } else if !target.has_activity(instruction.target_activity_id()) {
            violations.push(InstructionViolation {
                index,
                instruction: instruction.clone(),
                kind: ViolationKind::TargetActivityNotFound,
            });
            structurally_sound = false;
        }

        if !instruction.source_activity_id().is_empty() {
            match seen_sources.entry(instruction.source_activity_id()) {
                std::collections::hash_map::Entry::Occupied(first) => {
                    violations.push(InstructionViolation {
                        index,
                        instruction: instruction.clone(),
                        kind: ViolationKind::DuplicateSourceActivity {
                            first_index: *first.get(),
                        },
                    });
                }
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(index);
                }
            }
        }

        // Compatibility is only meaningful once both activities resolve
        if structurally_sound {
            if let Err(reason) = compatibility.check(instruction, source, target) {
                violations.push(InstructionViolation {
                    index,
                    instruction: instruction.clone(),
                    kind: ViolationKind::Incompatible { reason },
                });
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ProcessDefinition;

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
    fn valid_instructions_produce_no_violations() {
        let (source, target) = defs();
        let instructions = vec![
            MigrationInstruction::new("review", "review_v2"),
            MigrationInstruction::new("ship", "ship_v2"),
        ];
        let violations =
            validate_instructions(&instructions, &source, &target, &SameTypeCompatibility);
        assert!(violations.is_empty());
    }

    #[test]
    fn every_invalid_instruction_is_reported() {
        let (source, target) = defs();
        let instructions = vec![
            MigrationInstruction::new("missing", "review_v2"),
            MigrationInstruction::new("review", "missing"),
            MigrationInstruction::new("review", "ship_v2"),
        ];
        let violations =
            validate_instructions(&instructions, &source, &target, &SameTypeCompatibility);

        // one per invalid instruction: bad source, bad target, duplicate
        // source plus the type mismatch on the third mapping
        assert_eq!(violations.len(), 4);
        assert_eq!(violations[0].kind, ViolationKind::SourceActivityNotFound);
        assert_eq!(violations[0].index, 0);
        assert_eq!(violations[1].kind, ViolationKind::TargetActivityNotFound);
        assert_eq!(violations[1].index, 1);
        assert_eq!(
            violations[2].kind,
            ViolationKind::DuplicateSourceActivity { first_index: 1 }
        );
    }

    #[test]
    fn empty_ids_are_violations() {
        let (source, target) = defs();
        let instructions = vec![MigrationInstruction::new("", "")];
        let violations =
            validate_instructions(&instructions, &source, &target, &SameTypeCompatibility);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].kind, ViolationKind::EmptySourceActivityId);
        assert_eq!(violations[1].kind, ViolationKind::EmptyTargetActivityId);
    }

    #[test]
    fn same_type_compatibility_rejects_mismatch() {
        let (source, target) = defs();
        let instr = MigrationInstruction::new("review", "ship_v2");
        let result = SameTypeCompatibility.check(&instr, &source, &target);
        assert!(result.is_err());
    }
}
