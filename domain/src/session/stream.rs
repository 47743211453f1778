//! Streaming events for a single generation request
//!
//! [`StreamEvent`] bridges infrastructure-level streaming (e.g. NDJSON
//! chunks from Ollama) to the application layer. A stream is a finite
//! sequence of `Delta` events terminated by either `Completed` or `Error`;
//! it is never restartable.

/// An event in a streaming generation response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// An incremental text fragment from the model.
    Delta(String),
    /// The stream finished normally (all fragments delivered).
    Completed,
    /// The stream terminated abnormally.
    Error(String),
}

impl StreamEvent {
    /// Returns the fragment text if this is a Delta event.
    pub fn text(&self) -> Option<&str> {
        match self {
            StreamEvent::Delta(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true if this event signals the end of the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StreamEvent::Completed | StreamEvent::Error(_))
    }
}
