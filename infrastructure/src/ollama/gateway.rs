//! Streaming generation over the Ollama HTTP API
//!
//! POSTs `/api/generate` with `stream: true` and bridges the NDJSON
//! response body into the port's fragment stream: each chunk's `response`
//! field becomes a `Delta`, `done: true` terminates the stream, and any
//! transport or parse failure becomes a terminal `Error` event.

use async_trait::async_trait;
use atelier_application::ports::generation::{GatewayError, GenerationGateway, StreamHandle};
use atelier_domain::StreamEvent;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

const GENERATE_TIMEOUT: Duration = Duration::from_secs(120);
const STREAM_CHANNEL_CAPACITY: usize = 32;

/// Generation gateway backed by a local Ollama server
pub struct OllamaGateway {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

#[derive(Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<TagModel>,
}

#[derive(Deserialize)]
struct TagModel {
    name: String,
}

impl OllamaGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(GENERATE_TIMEOUT)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

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
impl GenerationGateway for OllamaGateway {
    async fn generate(
        &self,
        model_id: &str,
        prompt: &str,
        system: &str,
    ) -> Result<StreamHandle, GatewayError> {
        let request = GenerateRequest {
            model: model_id,
            prompt,
            system: (!system.is_empty()).then_some(system),
            stream: true,
        };

        let response = self
            .client
            .post(self.url("/api/generate"))
            .json(&request)
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(model_id.to_string()));
        }
        if !status.is_success() {
            return Err(GatewayError::RequestFailed(format!("HTTP {status}")));
        }

        debug!(model = model_id, "Generation stream opened");

        let (tx, rx) = mpsc::channel(STREAM_CHANNEL_CAPACITY);
        tokio::spawn(async move {
            let mut body = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = body.next().await {
                let bytes = match chunk {
                    Ok(bytes) => bytes,
                    Err(e) => {
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&bytes));
                for line in drain_lines(&mut buffer) {
                    match serde_json::from_str::<GenerateChunk>(&line) {
                        Ok(parsed) => {
                            if !parsed.response.is_empty()
                                && tx.send(StreamEvent::Delta(parsed.response)).await.is_err()
                            {
                                // Consumer abandoned the stream.
                                return;
                            }
                            if parsed.done {
                                let _ = tx.send(StreamEvent::Completed).await;
                                return;
                            }
                        }
                        Err(e) => {
                            let _ = tx
                                .send(StreamEvent::Error(format!("malformed chunk: {e}")))
                                .await;
                            return;
                        }
                    }
                }
            }

            // Body ended without a done marker; treat as normal completion.
            let _ = tx.send(StreamEvent::Completed).await;
        });

        Ok(StreamHandle::new(rx))
    }

    async fn list_models(&self) -> Result<Vec<String>, GatewayError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}",
                response.status()
            )));
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::RequestFailed(e.to_string()))?;

        Ok(tags.models.into_iter().map(|m| m.name).collect())
    }

    async fn check_health(&self) -> bool {
        match self.client.get(self.url("/api/tags")).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

/// Split complete newline-terminated lines out of `buffer`, leaving any
/// trailing partial line in place for the next chunk.
fn drain_lines(buffer: &mut String) -> Vec<String> {
    let mut lines = Vec::new();
    while let Some(pos) = buffer.find('\n') {
        let line = buffer[..pos].trim().to_string();
        buffer.drain(..=pos);
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_lines_keeps_partial_tail() {
        let mut buffer = "{\"response\":\"a\"}\n{\"response\":\"b\"}\n{\"resp".to_string();
        let lines = drain_lines(&mut buffer);
        assert_eq!(lines.len(), 2);
        assert_eq!(buffer, "{\"resp");
    }

    #[test]
    fn drain_lines_skips_blank_lines() {
        let mut buffer = "\n\n{\"done\":true}\n".to_string();
        let lines = drain_lines(&mut buffer);
        assert_eq!(lines, vec!["{\"done\":true}"]);
        assert!(buffer.is_empty());
    }

    #[test]
    fn generate_chunk_parses_ollama_shape() {
        let chunk: GenerateChunk =
            serde_json::from_str("{\"model\":\"llama3.2\",\"response\":\"hi\",\"done\":false}")
                .unwrap();
        assert_eq!(chunk.response, "hi");
        assert!(!chunk.done);

        let last: GenerateChunk = serde_json::from_str("{\"done\":true}").unwrap();
        assert!(last.response.is_empty());
        assert!(last.done);
    }

    #[test]
    fn request_omits_empty_system() {
        let request = GenerateRequest {
            model: "llama3.2",
            prompt: "hello",
            system: None,
            stream: true,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("system").is_none());
        assert_eq!(json["stream"], true);
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let gateway = OllamaGateway::new("http://localhost:11434/").unwrap();
        assert_eq!(gateway.url("/api/tags"), "http://localhost:11434/api/tags");
    }
}
