//! Unified Error Type System
//!
//! Centralized error types for the documentation engine.
//! Generation failures are classified so the retry wrapper and the
//! orchestrator can make containment decisions:
//!
//! - **RateLimited**: transient, retried with a fixed cooldown
//! - **Exhausted**: retries used up, fatal for the one file or section
//! - **Service**: non-rate-limit generation failure, never retried
//! - **Persistence**: a store write failed, contained at the failing node
//!
//! Traversal skips (folder not selected, folder already processed) are
//! normal control flow and are never represented as errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Generation Errors
    // -------------------------------------------------------------------------
    /// The generation service signalled a rate limit. Retryable.
    #[error("rate limited by generation service: {message}")]
    RateLimited { message: String },

    /// Any other generation service failure. Not retried.
    #[error("generation service error: {0}")]
    Service(String),

    /// Bounded retry gave up after repeated rate-limit responses.
    #[error("generation retries exhausted after {attempts} attempts")]
    Exhausted { attempts: u32 },

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("persistence error: {0}")]
    Persistence(String),

    #[error("config error: {0}")]
    Config(String),
}

impl DocError {
    /// Create a rate-limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Check whether the retry wrapper should retry this error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}

pub type Result<T> = std::result::Result<T, DocError>;

// =============================================================================
// Error Classifier
// =============================================================================

/// Classifies raw generation service failures into `RateLimited` vs `Service`.
///
/// The upstream API reports rate limiting either through HTTP 429 or through
/// an error body mentioning the limit, so both signals are checked.
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from the generation service.
    pub fn classify(message: &str) -> DocError {
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("rate_limit_exceeded")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota exceeded")
        {
            return DocError::rate_limited(message);
        }

        DocError::Service(message.to_string())
    }

    /// Classify an HTTP status code directly (more accurate than string matching).
    pub fn classify_http_status(status: u16, message: &str) -> DocError {
        match status {
            429 => DocError::rate_limited(message),
            _ => DocError::Service(format!("HTTP {}: {}", status, message)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rate_limit_message() {
        let err = ErrorClassifier::classify("rate_limit_exceeded: slow down");
        assert!(err.is_rate_limited());

        let err = ErrorClassifier::classify("Too Many Requests");
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_classify_service_error() {
        let err = ErrorClassifier::classify("model not found");
        assert!(!err.is_rate_limited());
        assert!(matches!(err, DocError::Service(_)));
    }

    #[test]
    fn test_classify_http_status() {
        assert!(ErrorClassifier::classify_http_status(429, "slow down").is_rate_limited());
        assert!(matches!(
            ErrorClassifier::classify_http_status(500, "oops"),
            DocError::Service(_)
        ));
    }

    #[test]
    fn test_exhausted_is_not_retryable() {
        let err = DocError::Exhausted { attempts: 3 };
        assert!(!err.is_rate_limited());
    }
}
