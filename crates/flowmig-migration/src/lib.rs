//! Flowmig Migration - plans and plan validation
//!
//! A migration plan maps activities of a source process definition to
//! activities of a target definition. Plans are validated once,
//! synchronously, before any batch work is created, and are read-only
//! afterwards. Validation collects every violation instead of stopping
//! at the first so a caller can correct the whole plan in one round
//! trip.

#![warn(unreachable_pub)]

pub mod definition;
pub mod error;
pub mod instruction;
pub mod plan;
pub mod validation;

// Re-exports for convenience
pub use definition::{DefinitionDescriptor, ProcessDefinition};
pub use error::PlanValidationError;
pub use instruction::MigrationInstruction;
pub use plan::{MigrationPlan, MigrationPlanBuilder};
pub use validation::{
    InstructionCompatibility, InstructionViolation, SameTypeCompatibility, ViolationKind,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
