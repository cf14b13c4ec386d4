//! Bounded-retry decorator for any `GenerativeClient`.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::{GenerativeClient, LlmError, PromptRequest};

/// Retries transient upstream failures (transport, 429, 5xx) with exponential backoff.
/// Auth errors, other 4xx responses and timeouts are returned immediately.
pub struct RetryingClient {
    inner: Arc<dyn GenerativeClient>,
    max_retries: u32,
    base_delay: Duration,
}

impl RetryingClient {
    pub fn new(inner: Arc<dyn GenerativeClient>, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            base_delay: Duration::from_millis(1000),
        }
    }

    fn backoff(&self, retry: u32) -> Duration {
        // Exponential backoff: 1s, 2s, 4s, ...
        self.base_delay * (1u32 << (retry - 1).min(16))
    }
}

#[async_trait]
impl GenerativeClient for RetryingClient {
    async fn invoke(&self, request: &PromptRequest) -> Result<String, LlmError> {
        let mut retry = 0;
        loop {
            match self.inner.invoke(request).await {
                Err(e) if e.is_transient() && retry < self.max_retries => {
                    retry += 1;
                    let delay = self.backoff(retry);
                    warn!(
                        "Upstream call failed ({}), retry {}/{} after {}ms",
                        e.kind(),
                        retry,
                        self.max_retries,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::ScriptedClient;
    use crate::llm_client::OutputMode;

    fn request() -> PromptRequest {
        PromptRequest {
            system: "sys",
            prompt: "prompt".to_string(),
            output_mode: OutputMode::Structured,
        }
    }

    fn rate_limited() -> Result<String, LlmError> {
        Err(LlmError::RateLimited {
            message: "quota".to_string(),
        })
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_rate_limit_then_succeeds() {
        let inner = Arc::new(ScriptedClient::scripted(vec![
            rate_limited(),
            rate_limited(),
            Ok("{}".to_string()),
        ]));
        let client = RetryingClient::new(inner.clone(), 3);

        let text = client.invoke(&request()).await.unwrap();
        assert_eq!(text, "{}");
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_retries() {
        let inner = Arc::new(ScriptedClient::scripted(vec![
            rate_limited(),
            rate_limited(),
            rate_limited(),
        ]));
        let client = RetryingClient::new(inner.clone(), 2);

        let err = client.invoke(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited { .. }));
        assert_eq!(inner.calls(), 3);
    }

    #[tokio::test]
    async fn test_auth_error_is_not_retried() {
        let inner = Arc::new(ScriptedClient::scripted(vec![Err(LlmError::Auth {
            status: 401,
            message: "bad key".to_string(),
        })]));
        let client = RetryingClient::new(inner.clone(), 5);

        let err = client.invoke(&request()).await.unwrap_err();
        assert!(matches!(err, LlmError::Auth { .. }));
        assert_eq!(inner.calls(), 1);
    }

    #[test]
    fn test_backoff_doubles() {
        let client = RetryingClient::new(Arc::new(ScriptedClient::replying("{}")), 3);
        assert_eq!(client.backoff(1), Duration::from_secs(1));
        assert_eq!(client.backoff(2), Duration::from_secs(2));
        assert_eq!(client.backoff(3), Duration::from_secs(4));
    }
}
