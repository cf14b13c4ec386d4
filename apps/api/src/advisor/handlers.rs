//! Axum route handlers for the advisor endpoints.

use axum::{
    extract::{FromRequest, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::advisor::contract::StructuredResult;
use crate::advisor::intent::{
    Intent, IntentExtra, StudentProfile, DEFAULT_PROGRAM, NEUTRAL_SCORES,
};
use crate::advisor::orchestrator::Outcome;
use crate::advisor::programs::{ProgramMajors, CATALOGUE};
use crate::errors::AppError;
use crate::state::AppState;

/// Set on responses that carry an intent's fallback value instead of a model answer.
pub const DEGRADED_HEADER: &str = "x-advisor-degraded";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

/// `Json` extractor whose rejections (bad syntax, wrong types, missing content type)
/// come back as `INVALID_REQUEST` errors.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(AppError))]
pub struct JsonBody<T>(pub T);

/// Student fields shared by every endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    #[serde(default = "default_scores")]
    pub scores: Vec<f64>,
    #[serde(default = "default_program")]
    pub program: String,
    #[serde(default, alias = "selected_major")]
    pub selected_major: Option<String>,
}

fn default_scores() -> Vec<f64> {
    NEUTRAL_SCORES.to_vec()
}

fn default_program() -> String {
    DEFAULT_PROGRAM.to_string()
}

impl ProfileBody {
    fn into_profile(self) -> Result<StudentProfile, AppError> {
        Ok(StudentProfile::new(
            &self.scores,
            self.program,
            self.selected_major,
        )?)
    }
}

#[derive(Debug, Deserialize)]
pub struct RoadmapRequest {
    #[serde(flatten)]
    pub profile: ProfileBody,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub profile: ProfileBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotRequest {
    #[serde(default, alias = "dream_job")]
    pub dream_job: String,
    #[serde(flatten)]
    pub profile: ProfileBody,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostgradRequest {
    #[serde(default, alias = "postgrad_choice")]
    pub postgrad_choice: String,
    #[serde(flatten)]
    pub profile: ProfileBody,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /roadmap
///
/// Best-fit career, three-year module roadmap and top five roles.
pub async fn handle_roadmap(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RoadmapRequest>,
) -> Result<Response, AppError> {
    let profile = request.profile.into_profile()?;
    let outcome = state
        .orchestrator
        .handle(Intent::Roadmap, &profile, &IntentExtra::default())
        .await?;
    Ok(respond(outcome))
}

/// POST /chat
///
/// Free-text advice. An empty message is answered, not rejected.
pub async fn handle_chat(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ChatRequest>,
) -> Result<Response, AppError> {
    let profile = request.profile.into_profile()?;
    let outcome = state
        .orchestrator
        .handle(Intent::Chat, &profile, &IntentExtra::chat(request.message))
        .await?;
    Ok(respond(outcome))
}

/// POST /pivot
pub async fn handle_pivot(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PivotRequest>,
) -> Result<Response, AppError> {
    if request.dream_job.trim().is_empty() {
        return Err(AppError::Validation("dreamJob cannot be empty".to_string()));
    }
    let profile = request.profile.into_profile()?;
    let outcome = state
        .orchestrator
        .handle(Intent::Pivot, &profile, &IntentExtra::pivot(request.dream_job))
        .await?;
    Ok(respond(outcome))
}

/// POST /postgrad
pub async fn handle_postgrad(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<PostgradRequest>,
) -> Result<Response, AppError> {
    if request.postgrad_choice.trim().is_empty() {
        return Err(AppError::Validation(
            "postgradChoice cannot be empty".to_string(),
        ));
    }
    let profile = request.profile.into_profile()?;
    let outcome = state
        .orchestrator
        .handle(
            Intent::Postgrad,
            &profile,
            &IntentExtra::postgrad(request.postgrad_choice),
        )
        .await?;
    Ok(respond(outcome))
}

/// GET /programs
///
/// Programmes that branch into majors, with their majors.
pub async fn handle_programs() -> Json<&'static [ProgramMajors]> {
    Json(CATALOGUE)
}

/// Structured results are returned as-is; free text is wrapped as `{"response": ...}`.
/// A fallback value is served as 203 with the degraded header, never as a plain 200.
fn respond(outcome: Outcome) -> Response {
    let body = match outcome.result {
        StructuredResult::Json(value) => value,
        StructuredResult::Text(text) => json!({ "response": text }),
    };

    match outcome.degraded {
        None => (StatusCode::OK, Json(body)).into_response(),
        Some(reason) => (
            StatusCode::NON_AUTHORITATIVE_INFORMATION,
            [(DEGRADED_HEADER, HeaderValue::from_static(reason))],
            Json(body),
        )
            .into_response(),
    }
}
