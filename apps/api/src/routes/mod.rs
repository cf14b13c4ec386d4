pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::advisor::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/programs", get(handlers::handle_programs))
        .route("/roadmap", post(handlers::handle_roadmap))
        .route("/chat", post(handlers::handle_chat))
        .route("/pivot", post(handlers::handle_pivot))
        .route("/postgrad", post(handlers::handle_postgrad))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::advisor::builder::PromptBuilder;
    use crate::advisor::contract::ContractPolicy;
    use crate::advisor::handlers::DEGRADED_HEADER;
    use crate::advisor::intent::Intent;
    use crate::advisor::orchestrator::RequestOrchestrator;
    use crate::grounding::GroundingCorpus;
    use crate::llm_client::mock::ScriptedClient;
    use crate::llm_client::LlmError;

    fn app_with(client: ScriptedClient, policy: ContractPolicy) -> Router {
        let orchestrator = RequestOrchestrator::new(
            PromptBuilder::new(
                Arc::new(GroundingCorpus::from_text("Prospectus text")),
                "Richfield".to_string(),
                2026,
            ),
            Arc::new(client),
            policy,
            Duration::from_secs(5),
        );
        build_router(AppState {
            orchestrator: Arc::new(orchestrator),
        })
    }

    fn app(reply: &str) -> Router {
        app_with(ScriptedClient::replying(reply), ContractPolicy::strict())
    }

    async fn post_json(app: Router, uri: &str, body: Value) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_loaded_corpus() {
        let response = app("{}")
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["corpus"], "loaded");
    }

    #[tokio::test]
    async fn test_programs_lists_catalogue() {
        let response = app("{}")
            .oneshot(Request::get("/programs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .any(|p| p["program"] == "Diploma in Information Technology"));
    }

    #[tokio::test]
    async fn test_chat_with_empty_message_returns_response_field() {
        let response = post_json(
            app("Hello! What would you like to know?"),
            "/chat",
            json!({"message": "", "program": "Accounting", "scores": [50, 50, 50, 50, 50]}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body, json!({"response": "Hello! What would you like to know?"}));
    }

    #[tokio::test]
    async fn test_pivot_returns_contract_shape() {
        let reply = r#"```json
{"feasibility_score": 31, "gap_analysis": "a", "richfield_bridge": "b", "market_reality": "c"}
```"#;
        let response = post_json(
            app(reply),
            "/pivot",
            json!({"dreamJob": "Astronaut", "program": "Accounting", "scores": [80, 20, 30, 40, 60]}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["feasibility_score"], 31);
        assert_eq!(body["market_reality"], "c");
    }

    #[tokio::test]
    async fn test_pivot_without_dream_job_is_bad_request() {
        let response = post_json(app("{}"), "/pivot", json!({"program": "Accounting"})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_wrong_score_count_is_bad_request() {
        let response = post_json(app("{}"), "/roadmap", json!({"scores": [1, 2, 3]})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_non_numeric_score_is_structured_bad_request() {
        let response = post_json(
            app("{}"),
            "/roadmap",
            json!({"scores": [80, "high", 30, 40, 60]}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
        assert!(body["error"]["message"].as_str().unwrap().contains("high"));
    }

    #[tokio::test]
    async fn test_null_program_is_structured_bad_request() {
        let response = post_json(app("{}"), "/chat", json!({"program": null})).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_missing_content_type_is_structured_bad_request() {
        let response = app("{}")
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/postgrad")
                    .body(Body::from(r#"{"postgradChoice": "MBA"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_REQUEST");
    }

    #[tokio::test]
    async fn test_malformed_upstream_is_reported_not_faked() {
        let response = post_json(
            app("not json at all"),
            "/postgrad",
            json!({"postgradChoice": "MBA", "program": "Accounting"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "MALFORMED_RESPONSE");
    }

    #[tokio::test]
    async fn test_missing_keys_report_validation_failure() {
        let response = post_json(app(r#"{"top_role": {}}"#), "/roadmap", json!({})).await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_FAILURE");
    }

    #[tokio::test]
    async fn test_upstream_rate_limit_carries_kind() {
        let client = ScriptedClient::scripted(vec![Err(LlmError::RateLimited {
            message: "quota exceeded".to_string(),
        })]);
        let response = post_json(
            app_with(client, ContractPolicy::strict()),
            "/chat",
            json!({"message": "hi"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UPSTREAM_SERVICE_ERROR");
        assert_eq!(body["error"]["kind"], "rate_limited");
    }

    #[tokio::test]
    async fn test_fallback_is_flagged_with_203_and_header() {
        let response = post_json(
            app_with(
                ScriptedClient::replying("not json at all"),
                ContractPolicy::with_fallback([Intent::Postgrad]),
            ),
            "/postgrad",
            json!({"postgradChoice": "MBA"}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NON_AUTHORITATIVE_INFORMATION);
        assert_eq!(
            response.headers().get(DEGRADED_HEADER).unwrap(),
            "malformed_response"
        );
        let body = body_json(response).await;
        assert_eq!(body["focus_areas"], "Advanced theory.");
    }
}
