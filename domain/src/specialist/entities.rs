//! Specialist entities and the registry

use super::role::SpecialistRole;
use std::collections::HashMap;

/// A specialist bound to a concrete model identifier (Entity)
///
/// Immutable after creation; the bound model id is fixed for the life of
/// the owning orchestrator.
#[derive(Debug, Clone)]
pub struct Specialist {
    role: SpecialistRole,
    model_id: String,
}

impl Specialist {
    pub fn new(role: SpecialistRole, model_id: impl Into<String>) -> Self {
        Self {
            role,
            model_id: model_id.into(),
        }
    }

    pub fn role(&self) -> SpecialistRole {
        self.role
    }

    pub fn display_name(&self) -> &'static str {
        self.role.display_name()
    }

    pub fn instruction(&self) -> &'static str {
        self.role.instruction()
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Role → model id mapping used at orchestrator construction
///
/// Roles without an explicit assignment fall back to the default model.
#[derive(Debug, Clone)]
pub struct ModelAssignments {
    assignments: HashMap<SpecialistRole, String>,
    default_model: String,
}

impl ModelAssignments {
    pub fn new(default_model: impl Into<String>) -> Self {
        Self {
            assignments: HashMap::new(),
            default_model: default_model.into(),
        }
    }

    pub fn assign(mut self, role: SpecialistRole, model_id: impl Into<String>) -> Self {
        self.assignments.insert(role, model_id.into());
        self
    }

    pub fn model_for(&self, role: SpecialistRole) -> &str {
        self.assignments
            .get(&role)
            .map(String::as_str)
            .unwrap_or(&self.default_model)
    }

    pub fn default_model(&self) -> &str {
        &self.default_model
    }
}

impl Default for ModelAssignments {
    fn default() -> Self {
        Self::new("llama3.2")
    }
}

/// Fixed-size role → specialist mapping, populated once at construction
///
/// The roster never changes over an orchestrator's life. Lookups that miss
/// are a configuration error surfaced by the orchestrator, not here.
#[derive(Debug, Clone)]
pub struct SpecialistRegistry {
    specialists: HashMap<SpecialistRole, Specialist>,
}

impl SpecialistRegistry {
    /// Build a registry covering every built-in role.
    pub fn new(assignments: &ModelAssignments) -> Self {
        Self::with_roles(&SpecialistRole::ALL, assignments)
    }

    /// Build a registry covering only the given roles.
    pub fn with_roles(roles: &[SpecialistRole], assignments: &ModelAssignments) -> Self {
        let specialists = roles
            .iter()
            .map(|&role| (role, Specialist::new(role, assignments.model_for(role))))
            .collect();
        Self { specialists }
    }

    pub fn get(&self, role: SpecialistRole) -> Option<&Specialist> {
        self.specialists.get(&role)
    }

    pub fn contains(&self, role: SpecialistRole) -> bool {
        self.specialists.contains_key(&role)
    }

    pub fn len(&self) -> usize {
        self.specialists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specialists.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assignments_fall_back_to_default() {
        let assignments =
            ModelAssignments::new("llama3.2").assign(SpecialistRole::Technical, "qwen2.5");

        assert_eq!(assignments.model_for(SpecialistRole::Technical), "qwen2.5");
        assert_eq!(assignments.model_for(SpecialistRole::Style), "llama3.2");
    }

    #[test]
    fn registry_covers_all_roles() {
        let registry = SpecialistRegistry::new(&ModelAssignments::default());
        assert_eq!(registry.len(), SpecialistRole::ALL.len());
        for role in SpecialistRole::ALL {
            let specialist = registry.get(role).unwrap();
            assert_eq!(specialist.role(), role);
            assert_eq!(specialist.model_id(), "llama3.2");
        }
    }

    #[test]
    fn partial_registry_misses_unlisted_roles() {
        let registry = SpecialistRegistry::with_roles(
            &[SpecialistRole::Style],
            &ModelAssignments::default(),
        );
        assert!(registry.contains(SpecialistRole::Style));
        assert!(!registry.contains(SpecialistRole::Critic));
    }
}
