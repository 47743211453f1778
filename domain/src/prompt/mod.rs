//! Prompt assembly shared by all specialists
//!
//! Every specialist uses the same prompt shape: a rendered slice of recent
//! history, the current request, and a closing line naming the persona.
//! The role's fixed instruction travels on the system channel and is never
//! part of the prompt body.

use crate::conversation::ConversationHistory;
use crate::specialist::entities::Specialist;

/// Build the prompt for one specialist turn.
///
/// `window` bounds how many of the most recent turns are included, oldest
/// first. The history is expected to already contain the current user
/// message, so the first specialist of a round sees it in context as well.
pub fn build_specialist_prompt(
    specialist: &Specialist,
    history: &ConversationHistory,
    user_message: &str,
    window: usize,
) -> String {
    format!(
        "Previous conversation:\n{}\n\nCurrent request: {}\n\nRespond as {}, focusing on your specialty.",
        history.render_window(window),
        user_message,
        specialist.display_name(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specialist::role::SpecialistRole;

    #[test]
    fn prompt_contains_window_request_and_persona() {
        let mut history = ConversationHistory::new();
        history.push_user("a fox in snow");
        history.push_specialist(SpecialistRole::Style, "cold whites, one warm accent");

        let specialist = Specialist::new(SpecialistRole::Composition, "llama3.2");
        let prompt = build_specialist_prompt(&specialist, &history, "a fox in snow", 10);

        assert!(prompt.starts_with("Previous conversation:\nUser: a fox in snow\n"));
        assert!(prompt.contains("Luna: cold whites, one warm accent\n"));
        assert!(prompt.contains("Current request: a fox in snow"));
        assert!(prompt.ends_with("Respond as Frame, focusing on your specialty."));
    }

    #[test]
    fn prompt_window_drops_oldest_turns() {
        let mut history = ConversationHistory::new();
        for i in 0..12 {
            history.push_user(format!("idea {i}"));
        }

        let specialist = Specialist::new(SpecialistRole::Story, "llama3.2");
        let prompt = build_specialist_prompt(&specialist, &history, "idea 11", 10);

        assert!(!prompt.contains("idea 0\n"));
        assert!(!prompt.contains("idea 1\n"));
        assert!(prompt.contains("idea 2\n"));
    }
}
