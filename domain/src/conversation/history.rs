//! Append-only conversation history

use super::turn::Turn;
use crate::specialist::role::SpecialistRole;

/// Ordered sequence of turns, owned exclusively by one orchestrator
///
/// Grows monotonically for the orchestrator's lifetime; turns are never
/// reordered or removed. Truncation happens only in the context-window
/// computation, never in the history itself.
#[derive(Debug, Clone, Default)]
pub struct ConversationHistory {
    turns: Vec<Turn>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    pub fn push_specialist(&mut self, role: SpecialistRole, text: impl Into<String>) {
        self.turns.push(Turn::specialist(role, text));
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The last `window` turns, oldest first.
    pub fn window(&self, window: usize) -> &[Turn] {
        let start = self.turns.len().saturating_sub(window);
        &self.turns[start..]
    }

    /// Render the last `window` turns as prompt lines, one per turn.
    pub fn render_window(&self, window: usize) -> String {
        let mut out = String::new();
        for turn in self.window(window) {
            out.push_str(&turn.render());
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_with(n: usize) -> ConversationHistory {
        let mut history = ConversationHistory::new();
        for i in 0..n {
            history.push_user(format!("message {i}"));
        }
        history
    }

    #[test]
    fn push_appends_in_order() {
        let mut history = ConversationHistory::new();
        history.push_user("hello");
        history.push_specialist(SpecialistRole::Story, "once upon a time");

        assert_eq!(history.len(), 2);
        assert_eq!(history.turns()[0].text(), "hello");
        assert_eq!(history.turns()[1].display_name(), "Saga");
    }

    #[test]
    fn window_keeps_most_recent_oldest_first() {
        let history = history_with(15);
        let window = history.window(10);
        assert_eq!(window.len(), 10);
        assert_eq!(window[0].text(), "message 5");
        assert_eq!(window[9].text(), "message 14");
    }

    #[test]
    fn window_larger_than_history_returns_everything() {
        let history = history_with(3);
        assert_eq!(history.window(10).len(), 3);
    }

    #[test]
    fn render_window_is_one_line_per_turn() {
        let mut history = ConversationHistory::new();
        history.push_user("a lighthouse");
        history.push_specialist(SpecialistRole::Style, "stormy blues");

        assert_eq!(
            history.render_window(10),
            "User: a lighthouse\nLuna: stormy blues\n"
        );
    }
}
