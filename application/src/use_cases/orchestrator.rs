//! Session orchestrator
//!
//! The orchestrator is the state machine at the heart of a creative
//! session. It owns the conversation history, drives one round of
//! specialist turns per user message, streams fragments out to the caller
//! as they arrive, and advances the phase once enough rounds have passed.
//!
//! One orchestrator instance per conversation, accessed by a single
//! driving task at a time. Different conversations are fully independent.

use crate::ports::generation::{GatewayError, GenerationGateway, StreamHandle};
use atelier_domain::{
    ConversationHistory, Phase, SessionEvent, SpecialistRegistry, SpecialistRole, StreamEvent,
    build_specialist_prompt,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Errors that can occur while driving a session
#[derive(Error, Debug)]
pub enum OrchestratorError {
    /// A phase roster names a role the registry does not contain.
    /// Raised at construction, never at runtime.
    #[error("No specialist registered for role '{0}'")]
    UnknownRole(SpecialistRole),

    /// The generation backend failed mid-turn. The round is aborted;
    /// earlier completed turns in the round remain in history.
    #[error("Generation failed for '{role}'")]
    Generation {
        role: SpecialistRole,
        #[source]
        source: GatewayError,
    },

    /// The caller stopped consuming events. The in-flight turn, if any,
    /// was not committed to history.
    #[error("Event receiver dropped; round aborted")]
    Cancelled,
}

/// Tunable parameters of the orchestrator
///
/// The upstream defaults (3 rounds per phase, a 10-turn context window)
/// carry no particular rationale, so both are configurable.
#[derive(Debug, Clone, Copy)]
pub struct OrchestratorSettings {
    /// Rounds in a phase before it advances to its successor.
    pub rounds_per_phase: u32,
    /// How many of the most recent turns each specialist sees.
    pub history_window: usize,
}

impl Default for OrchestratorSettings {
    fn default() -> Self {
        Self {
            rounds_per_phase: 3,
            history_window: 10,
        }
    }
}

/// Per-conversation session orchestrator
pub struct Orchestrator<G: GenerationGateway> {
    gateway: Arc<G>,
    registry: SpecialistRegistry,
    settings: OrchestratorSettings,
    phase: Phase,
    round_count: u32,
    history: ConversationHistory,
}

impl<G: GenerationGateway> Orchestrator<G> {
    /// Create an orchestrator in the initial phase.
    ///
    /// Fails fast if any phase roster names a role missing from the
    /// registry; a mismatched roster is a configuration error, never
    /// something to skip silently at runtime.
    pub fn new(
        gateway: Arc<G>,
        registry: SpecialistRegistry,
        settings: OrchestratorSettings,
    ) -> Result<Self, OrchestratorError> {
        for phase in Phase::ALL {
            for &role in phase.roster() {
                if !registry.contains(role) {
                    return Err(OrchestratorError::UnknownRole(role));
                }
            }
        }

        Ok(Self {
            gateway,
            registry,
            settings,
            phase: Phase::Ideation,
            round_count: 0,
            history: ConversationHistory::new(),
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round_count(&self) -> u32 {
        self.round_count
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    /// Process one user message: run a full round of specialist turns,
    /// emitting every event to `events` as it happens.
    ///
    /// Specialists run strictly in roster order; each one's prompt includes
    /// every turn committed earlier in the same round. A failure in one
    /// specialist aborts the rest of the roster but keeps the turns already
    /// committed.
    pub async fn process_user_message(
        &mut self,
        text: &str,
        events: &mpsc::Sender<SessionEvent>,
    ) -> Result<(), OrchestratorError> {
        // Committed before any specialist runs, so the first specialist of
        // the round sees it in context.
        self.history.push_user(text);
        self.emit(
            events,
            SessionEvent::UserMessage {
                text: text.to_string(),
            },
        )
        .await?;

        let roster = self.phase.roster();
        debug!(
            phase = %self.phase,
            roster_len = roster.len(),
            "Starting specialist round"
        );

        for &role in roster {
            self.run_specialist_turn(role, text, events).await?;
        }

        self.round_count += 1;

        if self.round_count >= self.settings.rounds_per_phase {
            let previous = self.phase;
            self.advance_phase();
            if self.phase != previous {
                info!(from = %previous, to = %self.phase, "Phase advanced");
                self.emit(events, SessionEvent::PhaseChanged { phase: self.phase })
                    .await?;
            }
        }

        Ok(())
    }

    /// Advance to the table-defined successor phase, resetting the round
    /// counter. A no-op at the terminal phase.
    pub fn advance_phase(&mut self) -> Phase {
        let next = self.phase.next();
        if next != self.phase {
            self.phase = next;
            self.round_count = 0;
        }
        self.phase
    }

    /// Append a user turn to history without triggering a specialist round.
    ///
    /// Used for asynchronous interjection between rounds; leaves the round
    /// counter and phase untouched.
    pub fn inject_user_message(&mut self, text: &str) {
        self.history.push_user(text);
    }

    async fn run_specialist_turn(
        &mut self,
        role: SpecialistRole,
        user_message: &str,
        events: &mpsc::Sender<SessionEvent>,
    ) -> Result<(), OrchestratorError> {
        let (model_id, instruction, prompt) = {
            let specialist = self
                .registry
                .get(role)
                .ok_or(OrchestratorError::UnknownRole(role))?;
            let prompt = build_specialist_prompt(
                specialist,
                &self.history,
                user_message,
                self.settings.history_window,
            );
            (
                specialist.model_id().to_string(),
                specialist.instruction(),
                prompt,
            )
        };

        self.emit(events, SessionEvent::specialist_turn_started(role))
            .await?;

        let stream = self
            .gateway
            .generate(&model_id, &prompt, instruction)
            .await
            .map_err(|source| {
                warn!(%role, "Generation request failed");
                OrchestratorError::Generation { role, source }
            })?;

        let full_text = self.drain_stream(role, stream, events).await?;

        // Commit only after the stream is fully exhausted. An abandoned or
        // failed stream must never leave a partial turn in history.
        self.history.push_specialist(role, full_text.clone());
        self.emit(
            events,
            SessionEvent::specialist_turn_finished(role, full_text),
        )
        .await?;

        Ok(())
    }

    /// Drive one fragment stream to exhaustion, forwarding every fragment
    /// in arrival order and concatenating them into the full turn text.
    async fn drain_stream(
        &self,
        role: SpecialistRole,
        mut stream: StreamHandle,
        events: &mpsc::Sender<SessionEvent>,
    ) -> Result<String, OrchestratorError> {
        let mut full_text = String::new();
        loop {
            match stream.recv().await {
                Some(StreamEvent::Delta(fragment)) => {
                    full_text.push_str(&fragment);
                    self.emit(events, SessionEvent::specialist_turn_progress(role, fragment))
                        .await?;
                }
                Some(StreamEvent::Completed) | None => return Ok(full_text),
                Some(StreamEvent::Error(message)) => {
                    // Every fragment received so far has already been
                    // forwarded; no silent truncation.
                    warn!(%role, "Generation stream failed mid-turn");
                    return Err(OrchestratorError::Generation {
                        role,
                        source: GatewayError::StreamFailed(message),
                    });
                }
            }
        }
    }

    async fn emit(
        &self,
        events: &mpsc::Sender<SessionEvent>,
        event: SessionEvent,
    ) -> Result<(), OrchestratorError> {
        events
            .send(event)
            .await
            .map_err(|_| OrchestratorError::Cancelled)
    }
}
