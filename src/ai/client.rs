//! Generation Client Abstraction
//!
//! Defines the `GenerationClient` trait consumed by the documenters.
//! A client turns a model identifier and an ordered message sequence into
//! generated text, failing with `DocError::RateLimited` when the service
//! throttles and `DocError::Service` for anything else.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::Result;

/// One chat message in a generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Shared generation client for concurrent use across the hierarchy walk.
pub type SharedClient = Arc<dyn GenerationClient>;

/// Opaque generation capability.
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// Generate text for the given model and message sequence.
    async fn generate(&self, model: &str, messages: &[ChatMessage]) -> Result<String>;

    /// Client name for logging.
    fn name(&self) -> &str;
}

/// Configuration for HTTP-backed generation clients.
///
/// The API key is never serialized and is redacted in debug output;
/// the client converts it to a `SecretString` internally.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL (OpenAI-compatible chat completions endpoint)
    #[serde(default)]
    pub api_base: Option<String>,
    /// API key; falls back to the `OPENAI_API_KEY` environment variable
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Sampling temperature
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Maximum tokens to generate
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

fn default_timeout_secs() -> u64 {
    crate::constants::network::DEFAULT_TIMEOUT_SECS
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            api_key: None,
            timeout_secs: default_timeout_secs(),
            temperature: None,
            max_tokens: None,
        }
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

// =============================================================================
// Test Support
// =============================================================================


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_message_roles() {
        assert_eq!(ChatMessage::system("a").role, "system");
        assert_eq!(ChatMessage::user("b").role, "user");
    }

    #[test]
    fn test_client_config_debug_redacts_key() {
        let config = ClientConfig {
            api_key: Some("sk-secret".to_string()),
            ..Default::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
