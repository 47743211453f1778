//! Session-level streaming types
//!
//! [`stream::StreamEvent`] carries fragments of a single in-progress
//! specialist response; [`event::SessionEvent`] is what the orchestrator
//! emits to its caller (the transport/persistence layer).

pub mod event;
pub mod stream;
