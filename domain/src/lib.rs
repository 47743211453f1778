//! Domain layer for atelier
//!
//! This crate contains the core business types for the creative session
//! orchestrator. It has no dependencies on infrastructure or presentation
//! concerns.
//!
//! # Core Concepts
//!
//! ## Phase
//!
//! A creative session moves through a fixed sequence of phases (ideation →
//! refinement → synthesis → review → generating → complete). Each phase
//! gates which specialists participate.
//!
//! ## Specialist
//!
//! A fixed-persona text-generation role (style, composition, story,
//! technical, critic). Each specialist is bound to a model identifier at
//! construction and responds in character, one at a time, within a round.

pub mod conversation;
pub mod core;
pub mod phase;
pub mod prompt;
pub mod session;
pub mod specialist;

// Re-export commonly used types
pub use conversation::{ConversationHistory, Speaker, Turn};
pub use core::error::DomainError;
pub use phase::Phase;
pub use prompt::build_specialist_prompt;
pub use session::{event::SessionEvent, stream::StreamEvent};
pub use specialist::{
    entities::{ModelAssignments, Specialist, SpecialistRegistry},
    role::SpecialistRole,
};
