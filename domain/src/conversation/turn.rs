//! A single contribution to the conversation

use crate::specialist::role::SpecialistRole;
use serde::{Deserialize, Serialize};

/// Who produced a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Specialist(SpecialistRole),
}

impl Speaker {
    pub fn is_user(&self) -> bool {
        matches!(self, Speaker::User)
    }
}

/// One speaker's contribution, appended to history (Entity)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    speaker: Speaker,
    display_name: String,
    text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            display_name: "User".to_string(),
            text: text.into(),
        }
    }

    pub fn specialist(role: SpecialistRole, text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Specialist(role),
            display_name: role.display_name().to_string(),
            text: text.into(),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Render this turn as a single prompt line.
    pub fn render(&self) -> String {
        format!("{}: {}", self.display_name, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_turn_renders_with_user_label() {
        let turn = Turn::user("a quiet harbor at dawn");
        assert!(turn.speaker().is_user());
        assert_eq!(turn.render(), "User: a quiet harbor at dawn");
    }

    #[test]
    fn specialist_turn_renders_with_persona_name() {
        let turn = Turn::specialist(SpecialistRole::Style, "muted pastels");
        assert_eq!(turn.render(), "Luna: muted pastels");
        assert_eq!(
            turn.speaker(),
            Speaker::Specialist(SpecialistRole::Style)
        );
    }
}
