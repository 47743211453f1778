//! Application layer for atelier
//!
//! This crate contains the orchestrator state machine, port definitions,
//! and the image-generation use case. It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::generation::{GatewayError, GenerationGateway, StreamHandle};
pub use ports::image_queue::{ImageQueue, JobHandle, JobProgress, QueueError};
pub use use_cases::orchestrator::{Orchestrator, OrchestratorError, OrchestratorSettings};
pub use use_cases::run_generation::{
    GenerationProgressNotifier, NoGenerationProgress, RunGenerationError, RunGenerationUseCase,
};
