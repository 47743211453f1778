//! ComfyUI HTTP client
//!
//! Implements the image queue port against the ComfyUI REST API: queue a
//! workflow on `/prompt`, decide completion from `/history/{id}`, and pull
//! image bytes from `/view`.

use async_trait::async_trait;
use atelier_application::ports::image_queue::{ImageQueue, JobHandle, JobProgress, QueueError};
use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

const QUEUE_TIMEOUT: Duration = Duration::from_secs(300);

/// Image queue backed by a ComfyUI server
pub struct ComfyClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct QueueResponse {
    prompt_id: String,
}

impl ComfyClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, QueueError> {
        let client = reqwest::Client::builder()
            .timeout(QUEUE_TIMEOUT)
            .build()
            .map_err(|e| QueueError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl ImageQueue for ComfyClient {
    async fn queue(&self, workflow: &Value) -> Result<JobHandle, QueueError> {
        let response = self
            .client
            .post(self.url("/prompt"))
            .json(&json!({ "prompt": workflow }))
            .send()
            .await
            .map_err(|e| QueueError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QueueError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let queued: QueueResponse = response
            .json()
            .await
            .map_err(|e| QueueError::MalformedResponse(e.to_string()))?;

        debug!(prompt_id = queued.prompt_id, "Workflow queued on ComfyUI");
        Ok(JobHandle::new(queued.prompt_id))
    }

    async fn progress(&self, job: &JobHandle) -> Result<JobProgress, QueueError> {
        let response = self
            .client
            .get(self.url(&format!("/history/{}", job.id())))
            .send()
            .await
            .map_err(|e| QueueError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QueueError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let history: Value = response
            .json()
            .await
            .map_err(|e| QueueError::MalformedResponse(e.to_string()))?;

        // The job shows up in history only once it has finished.
        match history.get(job.id()) {
            Some(entry) => Ok(JobProgress::Complete {
                outputs: entry.get("outputs").cloned().unwrap_or_else(|| json!({})),
            }),
            None => Ok(JobProgress::Running),
        }
    }

    async fn fetch_image(
        &self,
        filename: &str,
        subfolder: &str,
        folder_type: &str,
    ) -> Result<Vec<u8>, QueueError> {
        let response = self
            .client
            .get(self.url("/view"))
            .query(&[
                ("filename", filename),
                ("subfolder", subfolder),
                ("type", folder_type),
            ])
            .send()
            .await
            .map_err(|e| QueueError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(QueueError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| QueueError::MalformedResponse(e.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn check_health(&self) -> bool {
        match self.client.get(self.url("/system_stats")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
