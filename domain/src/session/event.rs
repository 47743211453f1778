//! Events the orchestrator emits to its caller
//!
//! The caller (transport/persistence layer) surfaces all of these to the
//! end client, e.g. over an SSE channel, and durably stores the
//! `SpecialistTurnFinished` payloads as specialist messages. Serialized
//! with a `type` tag so the wire shape matches the event name.

use crate::phase::Phase;
use crate::specialist::role::SpecialistRole;
use serde::{Deserialize, Serialize};

/// One event in an orchestrator round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// The user's message was accepted and appended to history.
    UserMessage { text: String },
    /// A specialist's turn is beginning.
    SpecialistTurnStarted {
        role: SpecialistRole,
        display_name: String,
    },
    /// One fragment of a specialist's in-progress response.
    SpecialistTurnProgress {
        role: SpecialistRole,
        display_name: String,
        fragment: String,
    },
    /// A specialist's turn completed; `full_text` is the durable payload.
    SpecialistTurnFinished {
        role: SpecialistRole,
        display_name: String,
        full_text: String,
    },
    /// The session advanced to a new phase.
    PhaseChanged { phase: Phase },
}

impl SessionEvent {
    pub fn specialist_turn_started(role: SpecialistRole) -> Self {
        SessionEvent::SpecialistTurnStarted {
            role,
            display_name: role.display_name().to_string(),
        }
    }

    pub fn specialist_turn_progress(role: SpecialistRole, fragment: impl Into<String>) -> Self {
        SessionEvent::SpecialistTurnProgress {
            role,
            display_name: role.display_name().to_string(),
            fragment: fragment.into(),
        }
    }

    pub fn specialist_turn_finished(role: SpecialistRole, full_text: impl Into<String>) -> Self {
        SessionEvent::SpecialistTurnFinished {
            role,
            display_name: role.display_name().to_string(),
            full_text: full_text.into(),
        }
    }
}
