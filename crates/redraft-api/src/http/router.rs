//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::ApiState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Drafts (owner-scoped)
        .route(
            "/draft",
            get(handlers::draft::get_draft)
                .post(handlers::draft::save_draft)
                .delete(handlers::draft::delete_draft),
        )
        // Writing assistant
        .route("/assist/summary", post(handlers::assist::generate_summary))
        .route("/assist/enhance", post(handlers::assist::enhance_description))
        .route("/assist/import-profile", post(handlers::assist::import_profile));

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no owner required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use reqwest::StatusCode;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    use redraft_core::assist::service::ResumeAssistant;
    use redraft_core::draft::store::DurableDraftStore;
    use redraft_core::llm::box_provider::BoxLlmProvider;
    use redraft_core::llm::provider::LlmProvider;
    use redraft_infra::remote::http_store::{HttpDraftStore, OWNER_HEADER};
    use redraft_infra::sqlite::draft::SqliteDraftStore;
    use redraft_infra::sqlite::pool::DatabasePool;
    use redraft_types::document::ResumeDocument;
    use redraft_types::draft::{OwnerId, Step};
    use redraft_types::llm::{CompletionRequest, CompletionResponse, LlmError, Usage};

    /// Always answers with the same body.
    struct FixedReply(&'static str);

    impl LlmProvider for FixedReply {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn complete(
            &self,
            request: &CompletionRequest,
        ) -> Result<CompletionResponse, LlmError> {
            Ok(CompletionResponse {
                id: "r1".into(),
                content: self.0.to_string(),
                model: request.model.clone(),
                usage: Usage::default(),
            })
        }
    }

    struct TestServer {
        base_url: String,
        _dir: TempDir,
    }

    async fn spawn_server(assistant: Option<ResumeAssistant>) -> TestServer {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("api.db").display());
        let pool = DatabasePool::new(&url).await.unwrap();
        let state = ApiState {
            drafts: Arc::new(SqliteDraftStore::new(pool)),
            assistant: assistant.map(Arc::new),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, build_router(state)).await.unwrap();
        });

        TestServer {
            base_url: format!("http://{addr}"),
            _dir: dir,
        }
    }

    fn draft_url(server: &TestServer) -> String {
        format!("{}/api/v1/draft", server.base_url)
    }

    #[tokio::test]
    async fn test_health() {
        let server = spawn_server(None).await;
        let body: Value = reqwest::get(format!("{}/health", server.base_url))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_missing_owner_is_unauthorized() {
        let server = spawn_server(None).await;
        let http = reqwest::Client::new();

        let resp = http.get(draft_url(&server)).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["errors"][0]["code"], "UNAUTHORIZED");

        let resp = http
            .post(draft_url(&server))
            .header(OWNER_HEADER, "   ")
            .json(&json!({"data": {}}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_post_creates_then_updates() {
        let server = spawn_server(None).await;
        let http = reqwest::Client::new();

        let first = http
            .post(draft_url(&server))
            .header(OWNER_HEADER, "user-1")
            .json(&json!({"data": {"skills": ["Rust"]}, "step_completed": "basic_info"}))
            .send()
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);

        let second = http
            .post(draft_url(&server))
            .header(OWNER_HEADER, "user-1")
            .json(&json!({"data": {"summary": "Builder"}, "step_completed": "summary"}))
            .send()
            .await
            .unwrap();
        assert_eq!(second.status(), StatusCode::OK);

        let body: Value = second.json().await.unwrap();
        let draft = &body["data"]["draft"];
        assert_eq!(draft["document"]["skills"], json!(["Rust"]));
        assert_eq!(draft["document"]["summary"], "Builder");
        assert_eq!(draft["last_completed_step"], "summary");
        assert!(body["meta"]["request_id"].is_string());
    }

    #[tokio::test]
    async fn test_get_without_draft_returns_null() {
        let server = spawn_server(None).await;
        let body: Value = reqwest::Client::new()
            .get(draft_url(&server))
            .header(OWNER_HEADER, "user-1")
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["data"]["draft"], Value::Null);
    }

    #[tokio::test]
    async fn test_http_store_round_trips_through_server() {
        let server = spawn_server(None).await;
        let store = HttpDraftStore::new(&server.base_url);
        let owner = OwnerId::new("user-1").unwrap();

        assert!(store.load(&owner).await.unwrap().is_none());

        let document = ResumeDocument {
            skills: Some(vec!["Rust".into(), "SQL".into()]),
            ..Default::default()
        };
        let saved = store
            .save(&owner, document.clone(), Some(Step::Education))
            .await
            .unwrap();
        assert_eq!(saved.document, document);
        assert!(saved.expires_at.is_none());

        let loaded = store.load(&owner).await.unwrap().unwrap();
        assert_eq!(loaded, saved);

        store.delete(&owner).await.unwrap();
        store.delete(&owner).await.unwrap();
        assert!(store.load(&owner).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_assist_without_provider_is_unavailable() {
        let server = spawn_server(None).await;
        let resp = reqwest::Client::new()
            .post(format!("{}/api/v1/assist/enhance", server.base_url))
            .json(&json!({"job_description": "Maintained the billing service"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_assist_enhance_and_validation() {
        let provider = FixedReply(r#"{"needs_clarification":false,"suggestions":["Cut billing latency by 40%"]}"#);
        let assistant = ResumeAssistant::new(BoxLlmProvider::new(provider), "gpt-4o");
        let server = spawn_server(Some(assistant)).await;
        let http = reqwest::Client::new();
        let url = format!("{}/api/v1/assist/enhance", server.base_url);

        let body: Value = http
            .post(&url)
            .json(&json!({"job_description": "Maintained the billing service"}))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["data"]["suggestions"][0], "Cut billing latency by 40%");

        let resp = http
            .post(&url)
            .json(&json!({"job_description": "short"}))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["errors"][0]["code"], "VALIDATION_ERROR");
    }
}
