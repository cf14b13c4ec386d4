//! Request orchestrator: drives one request through the pipeline.
//!
//! Flow: build prompt → invoke generative client → sanitize → validate → done.
//! The first failing stage short-circuits the rest; no partial results are returned.
//! Nothing is retained between requests. The only shared state is the read-only
//! corpus inside `PromptBuilder`.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::advisor::builder::PromptBuilder;
use crate::advisor::contract::{validate, ContractPolicy, StructuredResult};
use crate::advisor::error::AdvisorError;
use crate::advisor::intent::{Intent, IntentExtra, StudentProfile};
use crate::advisor::persona::persona_for;
use crate::advisor::sanitizer;
use crate::config::Config;
use crate::grounding::GroundingCorpus;
use crate::llm_client::{GeminiClient, GenerativeClient, LlmError, RetryingClient};

/// Environment variable holding the generative-service credential.
pub const CREDENTIAL_VAR: &str = "GEMINI_API_KEY";

/// Per-request pipeline stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Built,
    Invoked,
    Sanitized,
    Validated,
    Done,
}

/// A successful pipeline run. `degraded` names the failure kind when the result is the
/// intent's fallback value rather than a validated model answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub result: StructuredResult,
    pub degraded: Option<&'static str>,
}

pub struct RequestOrchestrator {
    builder: PromptBuilder,
    client: Arc<dyn GenerativeClient>,
    policy: ContractPolicy,
    invoke_timeout: Duration,
}

impl RequestOrchestrator {
    pub fn new(
        builder: PromptBuilder,
        client: Arc<dyn GenerativeClient>,
        policy: ContractPolicy,
        invoke_timeout: Duration,
    ) -> Self {
        Self {
            builder,
            client,
            policy,
            invoke_timeout,
        }
    }

    /// Wires the production pipeline. Fails with `MissingCredential` before any client
    /// is constructed when no API key is configured.
    pub fn from_config(config: &Config, corpus: Arc<GroundingCorpus>) -> Result<Self, AdvisorError> {
        let api_key = config
            .gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AdvisorError::MissingCredential {
                var: CREDENTIAL_VAR,
            })?;

        let invoke_timeout = Duration::from_secs(config.upstream_timeout_secs);
        let gemini = GeminiClient::new(
            api_key.to_string(),
            config.gemini_model.clone(),
            invoke_timeout,
        )?;
        info!("Generative client initialized (model: {})", gemini.model());

        let client: Arc<dyn GenerativeClient> = if config.max_retries > 0 {
            info!("Upstream retries enabled (max {})", config.max_retries);
            Arc::new(RetryingClient::new(Arc::new(gemini), config.max_retries))
        } else {
            Arc::new(gemini)
        };

        let policy = if config.fallback_intents.is_empty() {
            ContractPolicy::strict()
        } else {
            let mut names: Vec<&str> = config.fallback_intents.iter().map(Intent::as_str).collect();
            names.sort_unstable();
            warn!("Fallback responses enabled for: {}", names.join(", "));
            ContractPolicy::with_fallback(config.fallback_intents.iter().copied())
        };

        Ok(Self::new(
            PromptBuilder::new(corpus, config.institution.clone(), config.market_year),
            client,
            policy,
            invoke_timeout,
        ))
    }

    pub fn corpus(&self) -> &GroundingCorpus {
        self.builder.corpus()
    }

    pub async fn handle(
        &self,
        intent: Intent,
        profile: &StudentProfile,
        extra: &IntentExtra,
    ) -> Result<Outcome, AdvisorError> {
        let request_id = Uuid::new_v4();
        let span = info_span!("advisor_request", %request_id, %intent);
        self.run(intent, profile, extra).instrument(span).await
    }

    async fn run(
        &self,
        intent: Intent,
        profile: &StudentProfile,
        extra: &IntentExtra,
    ) -> Result<Outcome, AdvisorError> {
        let prompt = self.builder.build(intent, profile, extra);
        debug!(
            stage = ?Stage::Built,
            persona = persona_for(intent).name,
            prompt_chars = prompt.prompt.len()
        );

        // The timeout drops the in-flight call, which aborts the outbound request.
        let raw = match tokio::time::timeout(self.invoke_timeout, self.client.invoke(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => return Err(failed(Stage::Invoked, e.into())),
            Err(_) => return Err(failed(Stage::Invoked, LlmError::Timeout.into())),
        };
        debug!(stage = ?Stage::Invoked, raw_chars = raw.len());

        let candidate = sanitizer::clean(&raw);
        debug!(stage = ?Stage::Sanitized, candidate_chars = candidate.len());

        let outcome = match validate(candidate, intent) {
            Ok(result) => Outcome {
                result,
                degraded: None,
            },
            Err(failure) => {
                let err = AdvisorError::from_validation(intent, failure);
                match self.policy.fallback_for(intent) {
                    Some(result) => {
                        warn!("Serving {intent} fallback after {}: {err}", err.kind());
                        Outcome {
                            result,
                            degraded: Some(err.kind()),
                        }
                    }
                    None => return Err(failed(Stage::Validated, err)),
                }
            }
        };
        debug!(stage = ?Stage::Validated, degraded = outcome.degraded.is_some());

        debug!(stage = ?Stage::Done);
        Ok(outcome)
    }
}

/// Logs the stage a request failed to reach and hands the error back.
fn failed(stage: Stage, err: AdvisorError) -> AdvisorError {
    warn!(failed_stage = ?stage, kind = err.kind(), "Request failed: {err}");
    err
}
