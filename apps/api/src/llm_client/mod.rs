/// LLM Client: the single point of entry for all generative-model calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Everything upstream goes through `GenerativeClient`, so the orchestrator can be
/// driven by a scripted client in tests and wrapped by `RetryingClient` in production.
use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;
pub mod prompts;
pub mod retry;

pub use gemini::GeminiClient;
pub use retry::RetryingClient;

/// How the upstream should shape its reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// JSON object output; the provider is asked for `application/json`.
    Structured,
    /// Plain conversational text.
    FreeText,
}

/// One fully composed invocation: persona instruction plus prompt body.
/// Derived per request, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub system: &'static str,
    pub prompt: String,
    pub output_mode: OutputMode,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out")]
    Timeout,

    #[error("authentication rejected (status {status}): {message}")]
    Auth { status: u16, message: String },

    #[error("rate limited: {message}")]
    RateLimited { message: String },

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Short machine-readable label used in logs and error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            LlmError::Http(_) => "transport",
            LlmError::Timeout => "timeout",
            LlmError::Auth { .. } => "auth",
            LlmError::RateLimited { .. } => "rate_limited",
            LlmError::Api { .. } => "provider",
            LlmError::Parse(_) => "provider_payload",
            LlmError::EmptyContent => "empty_content",
        }
    }

    /// Transport failures, 429 and 5xx are worth another attempt; nothing else is.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Http(e) => !e.is_timeout(),
            LlmError::RateLimited { .. } => true,
            LlmError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// The capability the orchestrator needs from a generative service: one prompt in,
/// raw text out. Implementations must not retry internally.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn invoke(&self, request: &PromptRequest) -> Result<String, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    use super::*;

    /// Replays a fixed script of replies and records every request it receives.
    /// When the script runs dry the last reply is repeated.
    pub struct ScriptedClient {
        script: Mutex<VecDeque<Result<String, LlmError>>>,
        fallback_text: Option<String>,
        delay: Option<Duration>,
        pub received: Mutex<Vec<PromptRequest>>,
    }

    impl ScriptedClient {
        pub fn replying(text: &str) -> Self {
            Self {
                script: Mutex::new(VecDeque::new()),
                fallback_text: Some(text.to_string()),
                delay: None,
                received: Mutex::new(Vec::new()),
            }
        }

        pub fn scripted(script: Vec<Result<String, LlmError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback_text: None,
                delay: None,
                received: Mutex::new(Vec::new()),
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        pub fn calls(&self) -> usize {
            self.received.lock().unwrap().len()
        }

        pub fn last_request(&self) -> Option<PromptRequest> {
            self.received.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl GenerativeClient for ScriptedClient {
        async fn invoke(&self, request: &PromptRequest) -> Result<String, LlmError> {
            self.received.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(reply) => reply,
                None => self.fallback_text.clone().ok_or(LlmError::EmptyContent),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_and_server_errors_are_transient() {
        assert!(LlmError::RateLimited {
            message: "slow down".to_string()
        }
        .is_transient());
        assert!(LlmError::Api {
            status: 503,
            message: "unavailable".to_string()
        }
        .is_transient());
    }

    #[test]
    fn test_client_errors_are_not_transient() {
        assert!(!LlmError::Auth {
            status: 401,
            message: "bad key".to_string()
        }
        .is_transient());
        assert!(!LlmError::Api {
            status: 400,
            message: "bad request".to_string()
        }
        .is_transient());
        assert!(!LlmError::Timeout.is_transient());
        assert!(!LlmError::EmptyContent.is_transient());
    }

    #[test]
    fn test_error_kinds_are_distinct_labels() {
        assert_eq!(LlmError::Timeout.kind(), "timeout");
        assert_eq!(
            LlmError::RateLimited {
                message: String::new()
            }
            .kind(),
            "rate_limited"
        );
    }
}
