use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use httpmock::prelude::*;
use serde_json::{json, Value};
use stratplan::adapters::http::build_router;
use stratplan::{AnthropicClient, GenerationSettings, PlanGenerator};
use tower::ServiceExt;

fn acme_body() -> Value {
    json!({
        "companyName": "Acme",
        "industry": "SaaS",
        "companyStage": "startup",
        "goals": "Grow revenue 2x",
        "strengths": "Strong team",
        "weaknesses": "Low brand awareness",
        "opportunities": "Market expansion",
        "threats": "New competitor"
    })
}

fn minimal_plan() -> Value {
    json!({
        "executiveSummary": "Acme doubles revenue.",
        "strategicPriorities": [],
        "actionPlans": [],
        "implementationRoadmap": {
            "immediate": [],
            "shortTerm": [],
            "mediumTerm": [],
            "longTerm": []
        },
        "riskMitigation": []
    })
}

fn message_with_text(text: &str) -> Value {
    json!({
        "id": "msg_01",
        "type": "message",
        "role": "assistant",
        "model": "claude-sonnet-4-20250514",
        "content": [{"type": "text", "text": text}],
        "stop_reason": "end_turn",
        "stop_sequence": null,
        "usage": {"input_tokens": 812, "output_tokens": 64}
    })
}

fn app_for(server: &MockServer, settings: GenerationSettings) -> Router {
    let client = AnthropicClient::new("sk-test")
        .unwrap()
        .with_base_url(server.base_url());
    build_router(Arc::new(PlanGenerator::new(client, settings)))
}

async fn post_plan(app: Router, body: &Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-plan")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_generate_plan_end_to_end() {
    let server = MockServer::start_async().await;
    let plan_text = minimal_plan().to_string();
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/messages")
                .header("x-api-key", "sk-test")
                .header("anthropic-version", "2023-06-01")
                .json_body_partial(
                    r#"{
                        "model": "claude-sonnet-4-20250514",
                        "max_tokens": 8000,
                        "response_format": {
                            "type": "json_schema",
                            "json_schema": {"name": "business_plan", "strict": true}
                        }
                    }"#,
                )
                .body_contains("Company Name: Acme")
                .body_contains("Grow revenue 2x");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(message_with_text(&plan_text));
        })
        .await;

    let app = app_for(&server, GenerationSettings::default());
    let (status, body) = post_plan(app, &acme_body()).await;

    api_mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["plan"], minimal_plan());
}

#[tokio::test]
async fn test_generate_plan_returns_full_plan() {
    let full_plan = json!({
        "executiveSummary": "Acme will double revenue through EU expansion.",
        "strategicPriorities": [{
            "id": "sp-1",
            "title": "Expand to Europe",
            "description": "Open a Berlin office",
            "swotAlignment": "opportunity",
            "priority": "high",
            "rationale": "EU demand is growing"
        }],
        "actionPlans": [{
            "id": "ap-1",
            "initiative": "Berlin office",
            "objective": "Sign 10 EU customers",
            "timeline": "6 months",
            "resources": "Two account executives",
            "successMetrics": ["10 signed contracts"],
            "risks": ["Hiring delays"]
        }],
        "implementationRoadmap": {
            "immediate": ["Hire a country manager"],
            "shortTerm": ["Localize the product"],
            "mediumTerm": ["Open the office"],
            "longTerm": ["Expand to France"]
        },
        "riskMitigation": [{"risk": "Currency swings", "mitigation": "Price in EUR"}]
    });

    let server = MockServer::start_async().await;
    let plan_text = full_plan.to_string();
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(message_with_text(&plan_text));
        })
        .await;

    let app = app_for(&server, GenerationSettings::default());
    let (status, body) = post_plan(app, &acme_body()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["plan"], full_plan);
}

#[tokio::test]
async fn test_missing_company_name_never_calls_model() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(message_with_text("{}"));
        })
        .await;

    let mut body = acme_body();
    body["companyName"] = json!("");
    body["industry"] = json!("SaaS");
    body["goals"] = json!("x");

    let app = app_for(&server, GenerationSettings::default());
    let (status, payload) = post_plan(app, &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["error"], "Missing required fields");
    assert_eq!(payload["details"], "companyName");
    api_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_absent_required_fields_are_reported_together() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(message_with_text("{}"));
        })
        .await;

    let app = app_for(&server, GenerationSettings::default());
    let (status, payload) = post_plan(app, &json!({"companyStage": "growth"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"], "companyName, industry, goals");
    api_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_require_all_fields_rejects_empty_swot() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(message_with_text("{}"));
        })
        .await;

    let mut body = acme_body();
    body["opportunities"] = json!("");

    let settings = GenerationSettings {
        require_all_fields: true,
        ..GenerationSettings::default()
    };
    let (status, payload) = post_plan(app_for(&server, settings), &body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(payload["details"], "opportunities");
    api_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_non_json_model_output_is_generation_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200)
                .json_body(message_with_text("Here is your business plan: ..."));
        })
        .await;

    let app = app_for(&server, GenerationSettings::default());
    let (status, payload) = post_plan(app, &acme_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload["error"], "Failed to generate business plan");
    assert!(payload["details"].is_string());
    assert!(payload.get("plan").is_none());
}

#[tokio::test]
async fn test_schema_violation_is_generation_failure() {
    let mut plan = minimal_plan();
    plan["strategicPriorities"] = json!([{
        "id": "sp-1",
        "title": "Expand",
        "description": "Go",
        "swotAlignment": "luck",
        "priority": "high",
        "rationale": "Why not"
    }]);

    let server = MockServer::start_async().await;
    let plan_text = plan.to_string();
    server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(200).json_body(message_with_text(&plan_text));
        })
        .await;

    let app = app_for(&server, GenerationSettings::default());
    let (status, payload) = post_plan(app, &acme_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(payload["details"].as_str().unwrap().contains("luck"));
}

#[tokio::test]
async fn test_vendor_error_is_reported_with_details() {
    let server = MockServer::start_async().await;
    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/v1/messages");
            then.status(401).json_body(json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            }));
        })
        .await;

    let app = app_for(&server, GenerationSettings::default());
    let (status, payload) = post_plan(app, &acme_body()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(payload["error"], "Failed to generate business plan");
    assert!(payload["details"]
        .as_str()
        .unwrap()
        .contains("authentication_error: invalid x-api-key"));
    api_mock.assert_hits_async(1).await;
}
