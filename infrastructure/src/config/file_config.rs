//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file and
//! convert into the domain/application types the rest of the system uses.

use atelier_application::OrchestratorSettings;
use atelier_domain::{ModelAssignments, SpecialistRole};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Role-based model assignments
    pub models: FileModelsConfig,
    /// Orchestrator tuning
    pub orchestrator: FileOrchestratorConfig,
    /// Ollama endpoint
    pub ollama: FileOllamaConfig,
    /// ComfyUI endpoint
    pub comfyui: FileComfyUiConfig,
}

/// A problem detected while validating the configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.models.default.trim().is_empty() {
            issues.push(ConfigIssue {
                field: "models.default".to_string(),
                message: "default model name must not be empty".to_string(),
            });
        }
        for (role, assignment) in self.models.overrides() {
            if let Some(model) = assignment
                && model.trim().is_empty()
            {
                issues.push(ConfigIssue {
                    field: format!("models.{role}"),
                    message: "model name must not be empty".to_string(),
                });
            }
        }

        if self.orchestrator.rounds_per_phase == 0 {
            issues.push(ConfigIssue {
                field: "orchestrator.rounds_per_phase".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.orchestrator.history_window == 0 {
            issues.push(ConfigIssue {
                field: "orchestrator.history_window".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        issues
    }
}

/// Model selection per specialist role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Fallback for roles without an explicit assignment.
    pub default: String,
    pub style: Option<String>,
    pub composition: Option<String>,
    pub story: Option<String>,
    pub technical: Option<String>,
    pub critic: Option<String>,
}

impl FileModelsConfig {
    fn overrides(&self) -> [(SpecialistRole, &Option<String>); 5] {
        [
            (SpecialistRole::Style, &self.style),
            (SpecialistRole::Composition, &self.composition),
            (SpecialistRole::Story, &self.story),
            (SpecialistRole::Technical, &self.technical),
            (SpecialistRole::Critic, &self.critic),
        ]
    }

    pub fn to_assignments(&self) -> ModelAssignments {
        self.to_assignments_with_default(self.default.clone())
    }

    /// Build assignments with a different fallback model, keeping the
    /// per-role overrides from the file.
    pub fn to_assignments_with_default(
        &self,
        default_model: impl Into<String>,
    ) -> ModelAssignments {
        let mut assignments = ModelAssignments::new(default_model);
        for (role, assignment) in self.overrides() {
            if let Some(model) = assignment {
                assignments = assignments.assign(role, model.clone());
            }
        }
        assignments
    }
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            default: "llama3.2".to_string(),
            style: None,
            composition: None,
            story: None,
            technical: None,
            critic: None,
        }
    }
}

/// Orchestrator tuning knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    pub rounds_per_phase: u32,
    pub history_window: usize,
}

impl FileOrchestratorConfig {
    pub fn to_settings(&self) -> OrchestratorSettings {
        OrchestratorSettings {
            rounds_per_phase: self.rounds_per_phase,
            history_window: self.history_window,
        }
    }
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        let defaults = OrchestratorSettings::default();
        Self {
            rounds_per_phase: defaults.rounds_per_phase,
            history_window: defaults.history_window,
        }
    }
}

/// Ollama endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOllamaConfig {
    pub base_url: String,
}

impl Default for FileOllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
        }
    }
}

/// ComfyUI endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileComfyUiConfig {
    pub base_url: String,
}

impl Default for FileComfyUiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8188".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
        assert_eq!(config.models.default, "llama3.2");
        assert_eq!(config.orchestrator.rounds_per_phase, 3);
        assert_eq!(config.orchestrator.history_window, 10);
    }

    #[test]
    fn assignments_use_overrides_where_present() {
        let config: FileConfig = toml::from_str(
            r#"
            [models]
            default = "llama3.2"
            technical = "qwen2.5-coder"
            "#,
        )
        .unwrap();

        let assignments = config.models.to_assignments();
        assert_eq!(
            assignments.model_for(SpecialistRole::Technical),
            "qwen2.5-coder"
        );
        assert_eq!(assignments.model_for(SpecialistRole::Style), "llama3.2");
    }

    #[test]
    fn empty_model_names_are_flagged() {
        let config: FileConfig = toml::from_str(
            r#"
            [models]
            default = ""
            critic = " "
            "#,
        )
        .unwrap();

        let issues = config.validate();
        assert_eq!(issues.len(), 2);
        assert!(issues.iter().any(|i| i.field == "models.default"));
        assert!(issues.iter().any(|i| i.field == "models.critic"));
    }

    #[test]
    fn zero_thresholds_are_flagged() {
        let config: FileConfig = toml::from_str(
            r#"
            [orchestrator]
            rounds_per_phase = 0
            history_window = 0
            "#,
        )
        .unwrap();

        let issues = config.validate();
        assert_eq!(issues.len(), 2);
    }
}
