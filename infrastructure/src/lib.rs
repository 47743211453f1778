//! Infrastructure layer for atelier
//!
//! Adapters for the generation and image-queue ports, plus configuration
//! loading. Implementations here talk to external services (Ollama,
//! ComfyUI) and are injected into the application layer at startup.

pub mod comfy;
pub mod config;
pub mod ollama;

// Re-export commonly used types
pub use comfy::client::ComfyClient;
pub use comfy::workflow::{Txt2ImgParams, build_txt2img_workflow};
pub use config::{ConfigLoader, FileConfig};
pub use ollama::OllamaGateway;
