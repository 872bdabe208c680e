use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::generator::PlanGenerator;
use crate::core::schema::business_plan_schema;
use crate::domain::model::{ErrorResponse, GeneratePlanResponse, QuestionnaireResponses};
use crate::domain::ports::ModelClient;
use crate::utils::error::{PlanError, Result};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

const GENERATION_FAILED: &str = "Failed to generate business plan";

pub struct AppError {
    status: StatusCode,
    body: ErrorResponse,
}

impl From<PlanError> for AppError {
    fn from(err: PlanError) -> Self {
        // Every server-side failure is reported as a generation failure.
        let (status, error) = if err.is_client_error() {
            (StatusCode::BAD_REQUEST, err.user_friendly_message())
        } else {
            (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED)
        };
        Self {
            status,
            body: ErrorResponse {
                error: error.to_string(),
                details: Some(err.details()),
            },
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        PlanError::InvalidBodyError {
            message: rejection.body_text(),
        }
        .into()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router<M>(generator: Arc<PlanGenerator<M>>) -> Router
where
    M: ModelClient + 'static,
{
    Router::new()
        .route("/api/generate-plan", post(generate_plan::<M>))
        .route("/api/schema", get(schema))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(generator)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_server<M>(generator: Arc<PlanGenerator<M>>, addr: SocketAddr) -> Result<()>
where
    M: ModelClient + 'static,
{
    let app = build_router(generator);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("stratplan listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("stratplan shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn generate_plan<M: ModelClient + 'static>(
    State(generator): State<Arc<PlanGenerator<M>>>,
    payload: std::result::Result<Json<QuestionnaireResponses>, JsonRejection>,
) -> std::result::Result<Json<GeneratePlanResponse>, AppError> {
    let Json(responses) = payload.map_err(|rejection| {
        tracing::warn!("Rejected generation request body: {}", rejection.body_text());
        AppError::from(rejection)
    })?;

    match generator.generate(&responses).await {
        Ok(plan) => Ok(Json(GeneratePlanResponse::new(plan))),
        Err(e) if e.is_client_error() => {
            tracing::warn!("Rejected generation request: {}", e);
            Err(e.into())
        }
        Err(e) => {
            tracing::error!("Error generating business plan: {}", e);
            Err(e.into())
        }
    }
}

async fn schema() -> Json<Value> {
    Json(business_plan_schema())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::generator::GenerationSettings;
    use crate::domain::ports::StructuredRequest;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    struct CannedModel {
        reply: String,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl ModelClient for CannedModel {
        async fn generate_structured(&self, _request: StructuredRequest) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }
    }

    fn router(reply: &str) -> (Router, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let model = CannedModel {
            reply: reply.to_string(),
            calls: calls.clone(),
        };
        let generator = Arc::new(PlanGenerator::new(model, GenerationSettings::default()));
        (build_router(generator), calls)
    }

    async fn post_json(app: Router, body: &str) -> axum::response::Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-plan")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let (app, calls) = router("{}");

        let resp = post_json(app, "{\"companyName\": ").await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Invalid request body");
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparseable_model_output_is_server_error() {
        let (app, calls) = router("not json at all");

        let resp = post_json(
            app,
            r#"{"companyName": "Acme", "industry": "SaaS", "goals": "Grow"}"#,
        )
        .await;

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Failed to generate business plan");
        assert!(body["details"].as_str().unwrap().contains("expected"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_schema_route() {
        let (app, _) = router("{}");

        let resp = app
            .oneshot(Request::builder().uri("/api/schema").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await, business_plan_schema());
    }
}
