//! HTTP clients for the local inference server.

pub mod ollama_api_client;

pub use ollama_api_client::OllamaApiClient;
