//! Bounded Retry Wrapper
//!
//! Wraps a `GenerationClient` with the rate-limit retry policy: up to 3
//! attempts, sleeping a fixed 60-second cooldown after each rate-limit
//! response. Any other failure propagates immediately. Exhausting the
//! attempts yields `DocError::Exhausted`, which the call sites contain at
//! the smallest possible scope (one file, or one section).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::warn;

use super::client::{ChatMessage, GenerationClient, SharedClient};
use crate::constants::retry as retry_constants;
use crate::types::{DocError, Result};

/// Retry policy for rate-limited generation calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the initial call
    pub max_attempts: u32,
    /// Fixed cooldown after a rate-limit response
    pub cooldown: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: retry_constants::MAX_ATTEMPTS,
            cooldown: Duration::from_secs(retry_constants::RATE_LIMIT_COOLDOWN_SECS),
        }
    }
}

/// Generation client wrapper applying `RetryPolicy`.
///
/// The documenters stay retry-free; they see either a final result or a
/// terminal error through this wrapper.
pub struct RetryClient {
    inner: SharedClient,
    policy: RetryPolicy,
}

impl RetryClient {
    pub fn new(inner: SharedClient, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    /// Wrap a client with the default policy.
    pub fn wrap(inner: SharedClient) -> Arc<Self> {
        Arc::new(Self::new(inner, RetryPolicy::default()))
    }
}

#[async_trait]
impl GenerationClient for RetryClient {
    async fn generate(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            match self.inner.generate(model, messages).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_rate_limited() => {
                    if attempts >= self.policy.max_attempts {
                        return Err(DocError::Exhausted { attempts });
                    }
                    warn!(
                        attempt = attempts,
                        cooldown_secs = self.policy.cooldown.as_secs(),
                        "rate limited, cooling down before retry"
                    );
                    sleep(self.policy.cooldown).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;
    use crate::ai::client::testing::RecordingClient;
    use tokio::time::Instant;

    fn rate_limit_then_succeed(failures: u32) -> Arc<RecordingClient> {
        let remaining = AtomicU32::new(failures);
        Arc::new(RecordingClient::new(move |_| {
            if remaining.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                Err(DocError::rate_limited("429"))
            } else {
                Ok("done".to_string())
            }
        }))
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_rate_limits_then_success() {
        let inner = rate_limit_then_succeed(2);
        let client = RetryClient::new(inner.clone(), RetryPolicy::default());

        let start = Instant::now();
        let result = client
            .generate("m", &[ChatMessage::user("hi")])
            .await
            .unwrap();

        assert_eq!(result, "done");
        assert_eq!(inner.call_count(), 3);
        // Two cooldowns of 60 seconds each (auto-advanced paused clock).
        assert_eq!(start.elapsed(), Duration::from_secs(120));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_after_three_rate_limits() {
        let inner = rate_limit_then_succeed(10);
        let client = RetryClient::new(inner.clone(), RetryPolicy::default());

        let start = Instant::now();
        let err = client
            .generate("m", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert!(matches!(err, DocError::Exhausted { attempts: 3 }));
        assert_eq!(inner.call_count(), 3);
        // The final failed attempt is not followed by a cooldown.
        assert_eq!(start.elapsed(), Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_service_error_propagates_without_retry() {
        let inner = Arc::new(RecordingClient::new(|_| {
            Err(DocError::Service("boom".to_string()))
        }));
        let client = RetryClient::new(inner.clone(), RetryPolicy::default());

        let err = client
            .generate("m", &[ChatMessage::user("hi")])
            .await
            .unwrap_err();

        assert!(matches!(err, DocError::Service(_)));
        assert_eq!(inner.call_count(), 1);
    }
}
