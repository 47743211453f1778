//! Conversation history
//!
//! The append-only record of everything said in a session. Ordering is
//! chronological and significant: it defines the context window each
//! specialist sees.

pub mod history;
pub mod turn;

pub use history::ConversationHistory;
pub use turn::{Speaker, Turn};
