//! Generation gateway port
//!
//! Defines the interface for the text-generation backend. Implementations
//! (adapters) live in the infrastructure layer.

use async_trait::async_trait;
use atelier_domain::StreamEvent;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during generation gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Stream failed: {0}")]
    StreamFailed(String),
}

/// Gateway for streaming text generation
///
/// Each call to `generate` produces a fresh, finite, non-restartable
/// fragment stream. Partial consumption is allowed; the producer's failure
/// arrives as a terminal [`StreamEvent::Error`] on the stream.
#[async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Start a streaming generation for the given model.
    ///
    /// `system` is the fixed behavioral instruction, delivered on the
    /// backend's system channel rather than in the prompt body.
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        system: &str,
    ) -> Result<StreamHandle, GatewayError>;

    /// List the model identifiers the backend currently serves.
    async fn list_models(&self) -> Result<Vec<String>, GatewayError>;

    /// Whether the backend is reachable.
    async fn check_health(&self) -> bool;
}

/// Handle for receiving streaming events from a generation request.
///
/// Wraps an `mpsc::Receiver<StreamEvent>` and provides convenience methods
/// for consuming the stream.
pub struct StreamHandle {
    receiver: mpsc::Receiver<StreamEvent>,
}

impl StreamHandle {
    pub fn new(receiver: mpsc::Receiver<StreamEvent>) -> Self {
        Self { receiver }
    }

    /// Pull the next event. `None` means the producer went away without a
    /// terminal event, which consumers treat as normal completion.
    pub async fn recv(&mut self) -> Option<StreamEvent> {
        self.receiver.recv().await
    }

    /// Consume the stream and collect all fragments into a single string.
    ///
    /// Useful when streaming at the transport level is wanted but only the
    /// final text matters.
    pub async fn collect_text(mut self) -> Result<String, GatewayError> {
        let mut full_text = String::new();
        while let Some(event) = self.receiver.recv().await {
            match event {
                StreamEvent::Delta(chunk) => full_text.push_str(&chunk),
                StreamEvent::Completed => return Ok(full_text),
                StreamEvent::Error(e) => return Err(GatewayError::StreamFailed(e)),
            }
        }
        // Channel closed without a terminal event - return what we have
        Ok(full_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle_with(events: Vec<StreamEvent>) -> StreamHandle {
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            tx.try_send(event).unwrap();
        }
        StreamHandle::new(rx)
    }

    #[tokio::test]
    async fn collect_text_concatenates_deltas() {
        let handle = handle_with(vec![
            StreamEvent::Delta("warm ".to_string()),
            StreamEvent::Delta("ambers".to_string()),
            StreamEvent::Completed,
        ]);
        assert_eq!(handle.collect_text().await.unwrap(), "warm ambers");
    }

    #[tokio::test]
    async fn collect_text_propagates_stream_error() {
        let handle = handle_with(vec![
            StreamEvent::Delta("partial".to_string()),
            StreamEvent::Error("backend died".to_string()),
        ]);
        let err = handle.collect_text().await.unwrap_err();
        assert!(matches!(err, GatewayError::StreamFailed(_)));
    }

    #[tokio::test]
    async fn closed_channel_counts_as_completion() {
        let handle = handle_with(vec![StreamEvent::Delta("tail".to_string())]);
        assert_eq!(handle.collect_text().await.unwrap(), "tail");
    }
}
