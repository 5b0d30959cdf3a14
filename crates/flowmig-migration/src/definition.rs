//! Process definition descriptors
//!
//! The migration core only needs two facts about a definition: whether
//! an activity exists and what behavioral type it has. Everything else
//! about the modeling language stays with the workflow runtime.

use indexmap::IndexMap;

/// Read-only view of one process definition version
pub trait DefinitionDescriptor: Send + Sync {
    /// Definition identifier
    fn definition_id(&self) -> &str;

    /// Whether the definition contains the activity
    fn has_activity(&self, activity_id: &str) -> bool;

    /// Behavioral type of the activity, if it exists
    fn activity_type(&self, activity_id: &str) -> Option<&str>;
}

/// In-memory definition descriptor
///
/// Activities keep insertion order so validation output is stable.
#[derive(Debug, Clone)]
pub struct ProcessDefinition {
    id: String,
    activities: IndexMap<String, String>,
}

impl ProcessDefinition {
    /// Create empty definition
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            activities: IndexMap::new(),
        }
    }

    /// Add an activity with its behavioral type
    #[inline]
    #[must_use]
    pub fn with_activity(
        mut self,
        activity_id: impl Into<String>,
        activity_type: impl Into<String>,
    ) -> Self {
        self.activities.insert(activity_id.into(), activity_type.into());
        self
    }

    /// Number of activities
    #[inline]
    #[must_use]
    pub fn activity_count(&self) -> usize {
        self.activities.len()
    }
}

impl DefinitionDescriptor for ProcessDefinition {
    fn definition_id(&self) -> &str {
        &self.id
    }

    fn has_activity(&self, activity_id: &str) -> bool {
        self.activities.contains_key(activity_id)
    }

    fn activity_type(&self, activity_id: &str) -> Option<&str> {
        self.activities.get(activity_id).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn definition_lookups() {
        let def = ProcessDefinition::new("order:1")
            .with_activity("review", "user-task")
            .with_activity("archive", "service-task");

        assert_eq!(def.definition_id(), "order:1");
        assert!(def.has_activity("review"));
        assert!(!def.has_activity("missing"));
        assert_eq!(def.activity_type("archive"), Some("service-task"));
        assert_eq!(def.activity_type("missing"), None);
        assert_eq!(def.activity_count(), 2);
    }
}
