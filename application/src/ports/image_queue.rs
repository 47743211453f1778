//! Image generation queue port
//!
//! Defines the interface for the image-generation backend: a workflow is
//! queued, yielding a job handle, and progress is polled until the job
//! completes. Building the workflow itself is an infrastructure concern.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during image queue operations
#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Opaque handle for a queued generation job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle(String);

impl JobHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn id(&self) -> &str {
        &self.0
    }
}

/// Progress of a queued job
#[derive(Debug, Clone, PartialEq)]
pub enum JobProgress {
    /// Still in the backend's queue or being rendered.
    Running,
    /// Finished; `outputs` is the backend's output description
    /// (filenames, subfolders) as returned by its history endpoint.
    Complete { outputs: Value },
}

/// Queue for image generation jobs
#[async_trait]
pub trait ImageQueue: Send + Sync {
    /// Queue a workflow and return a pollable job handle.
    async fn queue(&self, workflow: &Value) -> Result<JobHandle, QueueError>;

    /// Poll the current progress of a job.
    async fn progress(&self, job: &JobHandle) -> Result<JobProgress, QueueError>;

    /// Fetch the bytes of a generated image.
    async fn fetch_image(
        &self,
        filename: &str,
        subfolder: &str,
        folder_type: &str,
    ) -> Result<Vec<u8>, QueueError>;

    /// Whether the backend is reachable.
    async fn check_health(&self) -> bool;
}
