//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Unknown specialist role: {0}")]
    UnknownRole(String),

    #[error("Unknown phase: {0}")]
    UnknownPhase(String),
}
