//! Ollama adapter for the generation gateway port

pub mod gateway;

pub use gateway::OllamaGateway;
