//! Generation Client Layer
//!
//! Abstraction over the hosted language model: the `GenerationClient` trait,
//! an OpenAI-compatible HTTP implementation, and the bounded retry wrapper
//! that absorbs rate-limit responses.

pub mod client;
pub mod openai;
pub mod retry;

pub use client::{ChatMessage, ClientConfig, GenerationClient, SharedClient};
pub use openai::OpenAiClient;
pub use retry::{RetryClient, RetryPolicy};
