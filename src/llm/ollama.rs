//! Ollama chat client.

use crate::llm::client::LLMClient;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use ollama_rs::{
    generation::chat::{request::ChatMessageRequest, ChatMessage},
    Ollama,
};

/// Split a base URL like `http://localhost:11434` into the host part
/// (scheme included) and the port, defaulting to Ollama's 11434 when no
/// port is given. A URL without an http(s) scheme is rejected up front.
pub(crate) fn parse_base_url(base_url: &str) -> Result<(String, u16)> {
    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(AppError::Initialization(format!(
            "Invalid Ollama URL '{}': expected an http(s) URL",
            base_url
        )));
    }

    match base_url.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) && !port.is_empty() => {
            let port = port.parse().map_err(|_| {
                AppError::Initialization(format!("Invalid port in Ollama URL '{}'", base_url))
            })?;
            Ok((host.to_string(), port))
        }
        _ => Ok((base_url.trim_end_matches('/').to_string(), 11434)),
    }
}

/// Client for a local Ollama server.
pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    /// Connect to the Ollama server at `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: &str, model: String) -> Result<Self> {
        let (host, port) = parse_base_url(base_url)?;
        let client = Ollama::new(host, port);

        Ok(Self { client, model })
    }
}

#[async_trait]
impl LLMClient for OllamaClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let messages = vec![ChatMessage::user(prompt.to_string())];

        let request = ChatMessageRequest::new(self.model.clone(), messages);

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| AppError::Generation(format!("Ollama error: {}", e)))?;

        Ok(response.message.content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_parsing_full() {
        let (host, port) = parse_base_url("http://localhost:11434").unwrap();
        assert_eq!(host, "http://localhost");
        assert_eq!(port, 11434);
    }

    #[test]
    fn test_url_parsing_no_port() {
        let (host, port) = parse_base_url("http://localhost").unwrap();
        assert_eq!(host, "http://localhost");
        assert_eq!(port, 11434);
    }

    #[test]
    fn test_url_parsing_custom_port() {
        let (host, port) = parse_base_url("http://192.168.1.100:8080").unwrap();
        assert_eq!(host, "http://192.168.1.100");
        assert_eq!(port, 8080);
    }

    #[test]
    fn test_url_without_scheme_rejected() {
        let result = parse_base_url("localhost:11434");
        assert!(matches!(result, Err(AppError::Initialization(_))));
    }

    #[test]
    fn test_client_construction() {
        let client = OllamaClient::new("http://localhost:11434", "llama3.1".to_string()).unwrap();
        assert_eq!(client.model_name(), "llama3.1");
    }
}
