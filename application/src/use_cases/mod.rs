//! Use cases for the atelier application layer

pub mod orchestrator;
pub mod run_generation;
