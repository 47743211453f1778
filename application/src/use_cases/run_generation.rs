//! Run Generation use case
//!
//! Queues an image-generation workflow and polls the queue until the job
//! completes, reporting estimated progress along the way. Timeout and
//! retry policy live here, not in the queue adapter.

use crate::ports::image_queue::{ImageQueue, JobHandle, JobProgress, QueueError};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while running a generation job
#[derive(Error, Debug)]
pub enum RunGenerationError {
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("Generation timed out after {attempts} polls")]
    TimedOut { attempts: u32 },
}

/// Callback for progress updates while a job renders
///
/// Implementations live in the presentation layer.
pub trait GenerationProgressNotifier: Send + Sync {
    /// Called once the workflow is accepted by the queue.
    fn on_queued(&self, job: &JobHandle);

    /// Called with an estimated completion percentage on each poll.
    fn on_progress(&self, percent: u32);

    /// Called when the job finishes with the backend's output description.
    fn on_complete(&self, outputs: &Value);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoGenerationProgress;

impl GenerationProgressNotifier for NoGenerationProgress {
    fn on_queued(&self, _job: &JobHandle) {}
    fn on_progress(&self, _percent: u32) {}
    fn on_complete(&self, _outputs: &Value) {}
}

/// Use case for running one image-generation job to completion
pub struct RunGenerationUseCase<Q: ImageQueue> {
    queue: Arc<Q>,
    poll_interval: Duration,
    max_attempts: u32,
}

impl<Q: ImageQueue> RunGenerationUseCase<Q> {
    pub fn new(queue: Arc<Q>) -> Self {
        Self {
            queue,
            poll_interval: Duration::from_secs(1),
            max_attempts: 300,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, workflow: &Value) -> Result<Value, RunGenerationError> {
        self.execute_with_progress(workflow, &NoGenerationProgress)
            .await
    }

    /// Queue the workflow and poll until it completes or times out.
    ///
    /// The reported percentage is estimated from elapsed polls and capped
    /// at 95 until the job actually finishes; the queue backend does not
    /// report fine-grained progress.
    pub async fn execute_with_progress(
        &self,
        workflow: &Value,
        progress: &dyn GenerationProgressNotifier,
    ) -> Result<Value, RunGenerationError> {
        let job = self.queue.queue(workflow).await?;
        info!(job_id = job.id(), "Workflow queued");
        progress.on_queued(&job);

        for attempt in 0..self.max_attempts {
            match self.queue.progress(&job).await? {
                JobProgress::Complete { outputs } => {
                    info!(job_id = job.id(), "Generation complete");
                    progress.on_progress(100);
                    progress.on_complete(&outputs);
                    return Ok(outputs);
                }
                JobProgress::Running => {
                    let estimated = (attempt * 100 / self.max_attempts).min(95);
                    debug!(job_id = job.id(), attempt, estimated, "Still rendering");
                    progress.on_progress(estimated);
                }
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        Err(RunGenerationError::TimedOut {
            attempts: self.max_attempts,
        })
    }

    /// Download every image named in a completed job's outputs.
    ///
    /// Returns `(filename, bytes)` pairs in output order. Nodes without an
    /// `images` list are skipped.
    pub async fn download_outputs(
        &self,
        outputs: &Value,
    ) -> Result<Vec<(String, Vec<u8>)>, RunGenerationError> {
        let mut images = Vec::new();

        for node in outputs.as_object().map(|o| o.values()).into_iter().flatten() {
            for image in node["images"].as_array().into_iter().flatten() {
                let Some(filename) = image["filename"].as_str() else {
                    continue;
                };
                let subfolder = image["subfolder"].as_str().unwrap_or("");
                let folder_type = image["type"].as_str().unwrap_or("output");

                let bytes = self
                    .queue
                    .fetch_image(filename, subfolder, folder_type)
                    .await?;
                images.push((filename.to_string(), bytes));
            }
        }

        Ok(images)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Queue that reports Running for a fixed number of polls, then
    /// Complete.
    struct CountdownQueue {
        polls_until_done: Mutex<u32>,
    }

    impl CountdownQueue {
        fn new(polls: u32) -> Self {
            Self {
                polls_until_done: Mutex::new(polls),
            }
        }
    }

    #[async_trait]
    impl ImageQueue for CountdownQueue {
        async fn queue(&self, _workflow: &Value) -> Result<JobHandle, QueueError> {
            Ok(JobHandle::new("job-1"))
        }

        async fn progress(&self, _job: &JobHandle) -> Result<JobProgress, QueueError> {
            let mut remaining = self.polls_until_done.lock().unwrap();
            if *remaining == 0 {
                Ok(JobProgress::Complete {
                    outputs: json!({"9": {"images": [{"filename": "out.png"}]}}),
                })
            } else {
                *remaining -= 1;
                Ok(JobProgress::Running)
            }
        }

        async fn fetch_image(
            &self,
            filename: &str,
            _subfolder: &str,
            _folder_type: &str,
        ) -> Result<Vec<u8>, QueueError> {
            Ok(filename.as_bytes().to_vec())
        }

        async fn check_health(&self) -> bool {
            true
        }
    }

    fn fast_use_case(queue: CountdownQueue, max_attempts: u32) -> RunGenerationUseCase<CountdownQueue> {
        RunGenerationUseCase::new(Arc::new(queue))
            .with_poll_interval(Duration::from_millis(1))
            .with_max_attempts(max_attempts)
    }

    #[tokio::test]
    async fn completes_and_returns_outputs() {
        let use_case = fast_use_case(CountdownQueue::new(2), 10);
        let outputs = use_case.execute(&json!({})).await.unwrap();
        assert!(outputs.get("9").is_some());
    }

    #[tokio::test]
    async fn download_outputs_fetches_each_named_image() {
        let use_case = fast_use_case(CountdownQueue::new(0), 10);
        let outputs = json!({
            "9": {
                "images": [
                    {"filename": "a.png", "subfolder": "", "type": "output"},
                    {"filename": "b.png", "subfolder": "batch", "type": "output"}
                ]
            },
            "11": { "text": "not an image node" }
        });

        let images = use_case.download_outputs(&outputs).await.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].0, "a.png");
        assert_eq!(images[1].1, b"b.png".to_vec());
    }

    #[tokio::test]
    async fn times_out_when_job_never_finishes() {
        let use_case = fast_use_case(CountdownQueue::new(u32::MAX), 3);
        let err = use_case.execute(&json!({})).await.unwrap_err();
        assert!(matches!(
            err,
            RunGenerationError::TimedOut { attempts: 3 }
        ));
    }

    #[tokio::test]
    async fn progress_is_estimated_and_capped() {
        struct Capture(Mutex<Vec<u32>>);
        impl GenerationProgressNotifier for Capture {
            fn on_queued(&self, _job: &JobHandle) {}
            fn on_progress(&self, percent: u32) {
                self.0.lock().unwrap().push(percent);
            }
            fn on_complete(&self, _outputs: &Value) {}
        }

        let use_case = fast_use_case(CountdownQueue::new(4), 4);
        let capture = Capture(Mutex::new(Vec::new()));
        // 4 polls of Running exhausts max_attempts before completion.
        let result = use_case
            .execute_with_progress(&json!({}), &capture)
            .await;
        assert!(result.is_err());

        let seen = capture.0.lock().unwrap();
        assert_eq!(seen.as_slice(), &[0, 25, 50, 75]);
        assert!(seen.iter().all(|p| *p <= 95));
    }
}
